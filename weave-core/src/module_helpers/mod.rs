pub mod module_enum;
pub use self::module_enum::ModuleDefinition;
