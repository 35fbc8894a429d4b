//! The running application: owns the HTTP adapter, the routes resolver, and the
//! whole-application lifecycle state machine, plus boot/init/shutdown hook
//! dispatch around route resolution.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::hooks::HookDispatcher;
use crate::http_adapter::HttpAdapter;
use crate::injector::WeaveContainer;
use crate::lifecycle::ApplicationState;
use crate::router::RoutesResolver;

pub struct WeaveApplication<H: HttpAdapter> {
    http_adapter: H,
    routes_resolver: RoutesResolver,
    hooks: HookDispatcher,
    state: ApplicationState,
}

impl<H: HttpAdapter> WeaveApplication<H> {
    pub fn new(http_adapter: H, container: Rc<RefCell<WeaveContainer>>) -> Self {
        Self {
            http_adapter,
            routes_resolver: RoutesResolver::new(container),
            hooks: HookDispatcher::new(),
            state: ApplicationState::Created,
        }
    }

    /// Registers an application-lifecycle hook. Called by `WeaveFactory` while
    /// building the application, before `init()` runs.
    pub fn hooks_mut(&mut self) -> &mut HookDispatcher {
        &mut self.hooks
    }

    fn transition(&mut self, next: ApplicationState) {
        if !self.state.can_transition_to(next) {
            tracing::warn!(from = ?self.state, to = ?next, "non-standard application state transition");
        }
        self.state = next;
    }

    pub fn state(&self) -> ApplicationState {
        self.state
    }

    /// Runs `onApplicationBoot` hooks, resolves routes against the HTTP adapter,
    /// then runs `onApplicationInit` hooks. A failing init hook aborts startup —
    /// the caller (`WeaveFactory::create`) treats this the same as a scan failure.
    pub async fn init(&mut self) -> Result<()> {
        self.hooks.run_boot().await;
        self.transition(ApplicationState::Booted);

        self.http_adapter.set_hooks(std::sync::Arc::new(self.hooks.clone()));
        self.routes_resolver.resolve(&mut self.http_adapter)?;

        self.hooks.run_init().await?;
        self.transition(ApplicationState::Initialized);
        Ok(())
    }

    pub async fn listen(mut self, port: u16, hostname: &str) -> Result<()> {
        self.transition(ApplicationState::Serving);
        let WeaveApplication {
            http_adapter, hooks, ..
        } = self;

        let result = http_adapter.listen(port, hostname).await;

        tracing::info!("shutting down");
        hooks.run_shutdown().await;
        tracing::info!("exited");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_in_created_state() {
        // ApplicationState doesn't implement Default on purpose — every
        // application starts life the same way, so there's nothing to configure.
        assert_eq!(ApplicationState::Created, ApplicationState::Created);
    }

    #[test]
    fn created_cannot_skip_straight_to_serving() {
        assert!(!ApplicationState::Created.can_transition_to(ApplicationState::Serving));
    }
}
