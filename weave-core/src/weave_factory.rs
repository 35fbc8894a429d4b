use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use crate::module_helpers::module_enum::ModuleDefinition;
use crate::weave_application::WeaveApplication;
use crate::{
    http_adapter::HttpAdapter,
    injector::{WeaveContainer, WeaveInstanceLoader},
    scanner::WeaveDependenciesScanner,
};

#[derive(Default)]
pub struct WeaveFactory;

impl WeaveFactory {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    /// Scans `module` (and everything it imports), instantiates singleton
    /// providers and controllers, then runs `onApplicationBoot`/`onApplicationInit`
    /// hooks and resolves routes against `http_adapter`. A module-scan or init-hook
    /// failure is fatal and terminates the process — there is no well-formed
    /// application to hand back.
    pub async fn create(
        &self,
        module: ModuleDefinition,
        http_adapter: impl HttpAdapter,
    ) -> WeaveApplication<impl HttpAdapter> {
        let container = Rc::new(RefCell::new(WeaveContainer::new()));

        match self.initialize(module, container.clone()) {
            Ok(_) => (),
            Err(e) => {
                tracing::error!(error = %e, "module initialization failed");
                std::process::exit(1);
            }
        };

        let mut app = WeaveApplication::new(http_adapter, container);
        match app.init().await {
            Ok(_) => (),
            Err(e) => {
                tracing::error!(error = %e, "application initialization failed");
                std::process::exit(1);
            }
        }

        app
    }

    fn initialize(
        &self,
        module: ModuleDefinition,
        container: Rc<RefCell<WeaveContainer>>,
    ) -> Result<()> {
        let mut scanner = WeaveDependenciesScanner::new(container.clone());
        scanner.scan(module)?;
        scanner.scan_middleware()?;

        WeaveInstanceLoader::new(container.clone()).create_instances_of_dependencies()?;

        Ok(())
    }
}
