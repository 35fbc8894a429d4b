pub mod validate;
pub use self::validate::Validatable;

mod adapter;
pub use self::adapter::{ValidatorAdapter, ValidatorCrateAdapter};
