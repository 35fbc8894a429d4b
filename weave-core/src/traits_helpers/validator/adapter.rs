use validator::{Validate, ValidationErrors};

/// Collaborator interface the route compiler/extractor layer consults to decide
/// whether a bound parameter needs a validation pass before the handler runs, and
/// to actually run it.
///
/// `has_validation` is a type-level question ("does this DTO carry `#[derive(Validate)]`
/// rules at all"), not an instance-level one — for any `T: Validate` the answer is
/// always `true`, since the `validator` crate only implements the trait for types that
/// declared at least a derive. The method still exists on the trait (rather than being
/// inlined as a `T: Validate` bound everywhere) so callers that work with a boxed/erased
/// DTO can ask without naming `T`.
pub trait ValidatorAdapter<T> {
    fn has_validation(&self) -> bool;
    fn validate(&self, value: &T) -> Result<(), ValidationErrors>;
}

/// The in-tree `ValidatorAdapter`, backed directly by the `validator` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct ValidatorCrateAdapter;

impl<T: Validate> ValidatorAdapter<T> for ValidatorCrateAdapter {
    fn has_validation(&self) -> bool {
        true
    }

    fn validate(&self, value: &T) -> Result<(), ValidationErrors> {
        value.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Validate)]
    struct Dto {
        #[validate(length(min = 3))]
        name: String,
    }

    #[test]
    fn has_validation_is_always_true_for_a_validate_impl() {
        let adapter = ValidatorCrateAdapter;
        assert!(ValidatorAdapter::<Dto>::has_validation(&adapter));
    }

    #[test]
    fn validate_delegates_to_the_validator_crate() {
        let adapter = ValidatorCrateAdapter;
        let bad = Dto { name: "ab".to_string() };
        assert!(adapter.validate(&bad).is_err());

        let good = Dto { name: "abc".to_string() };
        assert!(adapter.validate(&good).is_ok());
    }
}
