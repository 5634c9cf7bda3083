use crate::config::InterestConfig;
use crate::types::{CalculationResult, InterestError};

/// Trait to be implemented by all interest scenarios.
pub trait CalculateInterest {
    /// Calculate the interest for this scenario under `config`.
    ///
    /// * `Result<CalculationResult, InterestError>`
    fn calculate_interest(&self, config: &InterestConfig) -> Result<CalculationResult, InterestError>;

    /// Returns the label of the scenario, if any.
    fn get_label(&self) -> Option<String> {
        None
    }

    /// Returns the stable unique identifier for this scenario.
    fn get_id(&self) -> uuid::Uuid;
}

/// Async version of the CalculateInterest trait.
///
/// This trait is automatically implemented for any type that implements `CalculateInterest + Send + Sync`.
#[cfg(feature = "async")]
#[async_trait::async_trait]
pub trait AsyncCalculateInterest: Send + Sync {
    /// Calculate the interest asynchronously.
    async fn calculate_interest_async(&self, config: &InterestConfig) -> Result<CalculationResult, InterestError>;

    /// Returns the label of the scenario, if any.
    fn get_label(&self) -> Option<String> {
        None
    }

    /// Returns the stable unique identifier for this scenario.
    fn get_id(&self) -> uuid::Uuid;
}

#[cfg(feature = "async")]
#[async_trait::async_trait]
impl<T> AsyncCalculateInterest for T
where
    T: CalculateInterest + Sync + Send,
{
    async fn calculate_interest_async(&self, config: &InterestConfig) -> Result<CalculationResult, InterestError> {
        self.calculate_interest(config)
    }

    fn get_label(&self) -> Option<String> {
        CalculateInterest::get_label(self)
    }

    fn get_id(&self) -> uuid::Uuid {
        CalculateInterest::get_id(self)
    }
}
