mod container;
pub use self::container::WeaveContainer;

mod instance_loader;
pub use self::instance_loader::WeaveInstanceLoader;
mod module;

mod dependency_graph;
pub use self::dependency_graph::DependencyGraph;

mod instance_wrapper;
pub use self::instance_wrapper::{InstanceWrapper, SeedLocals};

mod context;
pub use self::context::Context;

mod locals;
pub use self::locals::LocalsContainer;

mod scope_resolver;
pub use self::scope_resolver::ScopeResolver;
