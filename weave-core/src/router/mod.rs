mod radix;
pub use self::radix::{Matched, RadixRouter, normalize_path};

mod routes_resolve;
pub use self::routes_resolve::RoutesResolver;
