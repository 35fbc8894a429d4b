use std::sync::Arc;

use anyhow::Result;

use crate::hooks::HookDispatcher;
use crate::http_helpers::HttpMethod;
use crate::injector::InstanceWrapper;

pub trait HttpAdapter: Clone + Send + Sync {
    fn new() -> Self;

    /// Hands the adapter the application's hook dispatcher so `add_route` can
    /// factor hook presence into each route's tier classification. Called once
    /// by `WeaveApplication::init` before routes are resolved; a no-op default
    /// for adapters that don't compile routes ahead of time.
    fn set_hooks(&mut self, _hooks: Arc<HookDispatcher>) {}

    fn add_route(&mut self, path: &str, method: HttpMethod, handler: Arc<InstanceWrapper>);
    fn listen(self, port: u16, hostname: &str) -> impl Future<Output = Result<()>> + Send;
}
