pub mod controller_utils;
pub mod create_struct_name;
pub mod derive_utils;
pub mod extracts;
pub mod modify_impl_function_body;
pub mod modify_return_body;
pub mod snake_to_upper;
pub mod types;
