use crate::types::InterestError;

/// Trait for builders that produce a calculator input or configuration.
///
/// This creates a unified interface for object creation across the crate.
pub trait Build<T> {
    /// Builds the final object, returning a Result.
    fn build(self) -> Result<T, InterestError>;
}

/// Early validation for builders, run before anything is constructed.
pub trait Validate {
    fn validate(&self) -> Result<(), InterestError>;
}
