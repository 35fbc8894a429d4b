//! Built-in Global Module
//!
//! This module provides built-in providers that should be globally available
//! to all modules without requiring explicit imports.

use crate::RequestManager;
use crate::module_helpers::module_enum::ModuleDefinition;
use crate::traits_helpers::{Controller, ModuleMetadata, Provider};

/// Built-in global module that provides core framework functionality
///
/// Currently provides:
/// - Request: HTTP request data access for handlers
pub struct BuiltinModule;

impl ModuleMetadata for BuiltinModule {
    fn get_id(&self) -> String {
        "WeaveBuiltinModule".to_string()
    }

    fn get_name(&self) -> String {
        "WeaveBuiltinModule".to_string()
    }

    fn is_global(&self) -> bool {
        true // Global module - exports are available everywhere
    }

    fn imports(&self) -> Option<Vec<Box<dyn ModuleMetadata>>> {
        None
    }

    fn controllers(&self) -> Option<Vec<Box<dyn Controller>>> {
        None
    }

    fn providers(&self) -> Option<Vec<Box<dyn Provider>>> {
        Some(vec![Box::new(RequestManager)])
    }

    fn exports(&self) -> Option<Vec<String>> {
        Some(vec!["Request".to_string()])
    }
}

impl From<BuiltinModule> for ModuleDefinition {
    fn from(module: BuiltinModule) -> Self {
        ModuleDefinition::DefaultModule(Box::new(module))
    }
}
