pub mod enhancer;
pub mod use_guards;
pub mod use_interceptors;
pub mod use_pipes;
