#[path = "adapter/mod.rs"]
pub mod adapter;
#[path = "adapter/http_adapter.rs"]
pub mod http_adapter;
mod builtin_module;
mod compiler;
pub mod di;
pub mod extractors;
mod executor;
pub mod error;
mod hooks;
pub mod http_helpers;
pub mod injector;
pub mod lifecycle;
mod middleware;
pub mod module_helpers;
pub mod provider_scope;
mod request;
pub mod router;
mod scanner;
pub mod structs_helpers;
pub mod traits_helpers;
mod weave_application;
pub mod weave_factory;

// Re-exports for adapter crates
pub use adapter::RouteAdapter;
pub use http_adapter::HttpAdapter;
pub use http_helpers::{Body, HttpMethod, HttpRequest, HttpResponse, IntoResponse};
pub use injector::InstanceWrapper;

pub use builtin_module::BuiltinModule;
pub use compiler::{compile, classify, CompiledRoute, ParamBinding, ParamKind, RouteProfile, Tier};
pub use error::WeaveError;
pub use executor::Executor;
pub use extractors::FromRequest;
pub use hooks::{ApplicationHook, HookDispatcher, RequestHook};
pub use lifecycle::{ApplicationState, RequestState};
pub use provider_scope::ProviderScope;
pub use request::{Request, RequestManager};
pub use weave_application::WeaveApplication;
pub use weave_factory::WeaveFactory;

// Re-export dependencies used in macro-generated code
// This allows users to only depend on `weave-core` without needing to add these explicitly
pub use async_trait::async_trait;
pub use rustc_hash::FxHashMap;
pub use tracing;

// Re-export macros
pub use weave_macros::*;
