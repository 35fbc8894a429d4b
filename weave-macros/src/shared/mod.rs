pub mod dependency_info;
pub mod generate_make_instances;
pub mod metadata_info;
pub mod scope_parser;
pub mod token_parser;

pub use token_parser::TokenType;
