//! Per-request store for request-scoped provider instances.

use std::any::Any;
use std::sync::Arc;

use rustc_hash::FxHashMap;

use super::Context;

/// A per-request mapping from token to instance, built once for routes that
/// need it (`CompiledRoute::needs_locals`, i.e. any tier above `Simple`), owned
/// exclusively by that request's executor, and dropped when the response is
/// produced. Always holds at least the `Context` entry, which it owns
/// mutably — unlike the request-scoped provider cache, which is read almost
/// immediately after being written, the `Context` is read and written
/// throughout the request's lifetime (hooks, guards, interceptors, pipes).
pub struct LocalsContainer {
    context: Context,
    instances: FxHashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl LocalsContainer {
    pub fn new(context: Context) -> Self {
        Self {
            context,
            instances: FxHashMap::default(),
        }
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// Unwraps the container, handing ownership of its `Context` back to the
    /// caller — used once the container's job (carrying locals across a
    /// request-scoped boundary) is done.
    pub fn into_context(self) -> Context {
        self.context
    }

    pub fn insert(&mut self, token: impl Into<String>, instance: Arc<dyn Any + Send + Sync>) {
        self.instances.insert(token.into(), instance);
    }

    pub fn get(&self, token: &str) -> Option<&Arc<dyn Any + Send + Sync>> {
        self.instances.get(token)
    }

    pub fn contains(&self, token: &str) -> bool {
        self.instances.contains_key(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http_helpers::HttpRequest;

    #[test]
    fn context_identity_is_stable_across_gets() {
        let locals = LocalsContainer::new(Context::from_request(HttpRequest::new("GET", "/")));
        let a = locals.context() as *const Context;
        let b = locals.context() as *const Context;
        assert_eq!(a, b);
    }

    #[test]
    fn insert_and_get_roundtrip() {
        let mut locals = LocalsContainer::new(Context::from_request(HttpRequest::new("GET", "/")));
        locals.insert("UserService", Arc::new(42i32) as Arc<dyn Any + Send + Sync>);
        assert!(locals.contains("UserService"));
        assert!(locals.get("Missing").is_none());
    }

    #[test]
    fn context_mut_edits_survive_into_context() {
        let mut locals = LocalsContainer::new(Context::from_request(HttpRequest::new("GET", "/")));
        locals.context_mut().set_local("answer", 42i32);
        let ctx = locals.into_context();
        assert_eq!(ctx.get_local::<i32>("answer"), Some(&42));
    }
}
