//! The value a `#[module]`-annotated struct's generated `module_definition()`
//! constructor hands to [`crate::weave_factory::WeaveFactory::create`].
//!
//! A single-variant enum rather than a bare `Box<dyn ModuleMetadata>` so the
//! scanner's recursive-descent over imports reads as a match, and so a second
//! module kind (e.g. a dynamic module built from a factory function) can be
//! added later without changing every call site.

use crate::traits_helpers::ModuleMetadata;

pub enum ModuleDefinition {
    DefaultModule(Box<dyn ModuleMetadata>),
}

impl ModuleDefinition {
    pub fn metadata(&self) -> &dyn ModuleMetadata {
        match self {
            ModuleDefinition::DefaultModule(metadata) => metadata.as_ref(),
        }
    }
}
