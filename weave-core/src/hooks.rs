//! Lifecycle hook dispatch.
//!
//! Two families share one ordering rule (higher priority first, stable among
//! ties): application hooks (`onApplicationBoot` / `onApplicationInit` /
//! `onApplicationShutdown`) and per-request hooks (`onRequest` / `onResponse`).
//! Boot and shutdown failures are logged and do not block the transition; init
//! and onRequest failures propagate (init aborts startup, onRequest becomes a
//! `500`), per the error taxonomy in the top-level design.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::WeaveError;
use crate::injector::Context;

#[async_trait]
pub trait ApplicationHook: Send + Sync {
    async fn run(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait RequestHook: Send + Sync {
    async fn run(&self, context: &mut Context) -> anyhow::Result<()>;
}

#[derive(Clone)]
struct Entry<H> {
    priority: i32,
    target: &'static str,
    hook: H,
}

fn insert_sorted<H>(entries: &mut Vec<Entry<H>>, entry: Entry<H>) {
    let pos = entries
        .iter()
        .position(|e| e.priority < entry.priority)
        .unwrap_or(entries.len());
    entries.insert(pos, entry);
}

/// Registry of lifecycle and per-request hooks, ordered by descending priority.
///
/// Populated once at load time from controller/provider metadata; read-only for
/// the life of the application after that (mirrors the metadata registry's own
/// invariant).
#[derive(Default, Clone)]
pub struct HookDispatcher {
    boot: Vec<Entry<Arc<dyn ApplicationHook>>>,
    init: Vec<Entry<Arc<dyn ApplicationHook>>>,
    shutdown: Vec<Entry<Arc<dyn ApplicationHook>>>,
    on_request: Vec<Entry<Arc<dyn RequestHook>>>,
    on_response: Vec<Entry<Arc<dyn RequestHook>>>,
}

impl HookDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_boot(&mut self, target: &'static str, priority: i32, hook: Arc<dyn ApplicationHook>) {
        insert_sorted(&mut self.boot, Entry { priority, target, hook });
    }

    pub fn register_init(&mut self, target: &'static str, priority: i32, hook: Arc<dyn ApplicationHook>) {
        insert_sorted(&mut self.init, Entry { priority, target, hook });
    }

    pub fn register_shutdown(&mut self, target: &'static str, priority: i32, hook: Arc<dyn ApplicationHook>) {
        insert_sorted(&mut self.shutdown, Entry { priority, target, hook });
    }

    pub fn register_on_request(&mut self, target: &'static str, priority: i32, hook: Arc<dyn RequestHook>) {
        insert_sorted(&mut self.on_request, Entry { priority, target, hook });
    }

    pub fn register_on_response(&mut self, target: &'static str, priority: i32, hook: Arc<dyn RequestHook>) {
        insert_sorted(&mut self.on_response, Entry { priority, target, hook });
    }

    /// Whether any `onRequest` hook is registered — the executor skips the call
    /// entirely otherwise, per the compiled route's `needsLocals`/hook flags.
    pub fn has_request_hooks(&self) -> bool {
        !self.on_request.is_empty()
    }

    pub fn has_response_hooks(&self) -> bool {
        !self.on_response.is_empty()
    }

    /// Runs `onApplicationBoot` hooks in order; a failing hook is logged and does
    /// not prevent the others from running or the transition from completing.
    pub async fn run_boot(&self) {
        for entry in &self.boot {
            if let Err(err) = entry.hook.run().await {
                tracing::error!(target = entry.target, error = %err, "onApplicationBoot hook failed");
            }
        }
    }

    /// Runs `onApplicationInit` hooks in order; the first failure aborts startup.
    pub async fn run_init(&self) -> Result<(), WeaveError> {
        for entry in &self.init {
            entry.hook.run().await.map_err(|source| WeaveError::HookFailure {
                hook: "onApplicationInit",
                target: entry.target.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Runs `onApplicationShutdown` hooks in order; failures are logged, same as boot.
    pub async fn run_shutdown(&self) {
        for entry in &self.shutdown {
            if let Err(err) = entry.hook.run().await {
                tracing::error!(target = entry.target, error = %err, "onApplicationShutdown hook failed");
            }
        }
    }

    /// Runs `onRequest` hooks in priority order; a failure propagates (the executor
    /// turns it into an error response and skips the handler and `onResponse`).
    pub async fn run_on_request(&self, context: &mut Context) -> Result<(), WeaveError> {
        for entry in &self.on_request {
            entry
                .hook
                .run(context)
                .await
                .map_err(|source| WeaveError::HookFailure {
                    hook: "onRequest",
                    target: entry.target.to_string(),
                    source,
                })?;
        }
        Ok(())
    }

    /// Runs `onResponse` hooks in priority order, after the handler (or a
    /// short-circuiting middleware) has produced a result.
    pub async fn run_on_response(&self, context: &mut Context) -> Result<(), WeaveError> {
        for entry in &self.on_response {
            entry
                .hook
                .run(context)
                .await
                .map_err(|source| WeaveError::HookFailure {
                    hook: "onResponse",
                    target: entry.target.to_string(),
                    source,
                })?;
        }
        Ok(())
    }
}
