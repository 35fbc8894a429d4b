use std::fmt::Debug;

use validator::{Validate, ValidationErrors};

pub trait Validatable: Send + Sync + Debug {
    fn validate_dto(&self) -> Result<(), ValidationErrors>;
}

/// Any type the `validator` crate can validate is `Validatable` for free — this
/// is what lets `#[body]`-bound DTOs satisfy `Box<dyn Validatable>` without a
/// hand-written impl per DTO.
impl<T: Validate + Debug + Send + Sync> Validatable for T {
    fn validate_dto(&self) -> Result<(), ValidationErrors> {
        self.validate()
    }
}
