pub mod module_struct;
