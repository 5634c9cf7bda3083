//! Evaluation of many independent scenarios.
//!
//! Every scenario is computed on its own; no scenario can affect another. A
//! failing scenario (e.g. non-numeric input under the strict policy) is reported
//! next to the successes instead of aborting the batch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InterestConfig;
use crate::traits::CalculateInterest;
#[cfg(feature = "async")]
use crate::traits::AsyncCalculateInterest;
use crate::types::{CalculationResult, InterestError};

/// Individual result for a scenario in the batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum BatchItemResult {
    /// Calculation succeeded
    Success(CalculationResult),
    /// Calculation failed
    Failure {
        source: String, // Label or Index
        error: InterestError,
    },
}

/// Status of the batch calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatchStatus {
    /// All items calculated successfully.
    Complete,
    /// Some items failed, but others succeeded. Result contains partial totals.
    Partial,
    /// All items failed.
    Failed,
}

/// Result of a batch calculation, including successes and failures.
///
/// Totals cover successful items only. A total is `None` when any contributing
/// item was not computable or the sum itself overflowed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub status: BatchStatus,
    pub results: Vec<BatchItemResult>,
    pub total_principal: Option<Decimal>,
    pub total_interest: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub items_attempted: usize,
    pub items_failed: usize,
}

impl BatchResult {
    /// Returns a list of failed calculations.
    pub fn failures(&self) -> Vec<&BatchItemResult> {
        self.results
            .iter()
            .filter(|r| matches!(r, BatchItemResult::Failure { .. }))
            .collect()
    }

    /// Returns a list of successful calculation results.
    pub fn successes(&self) -> Vec<&CalculationResult> {
        self.results
            .iter()
            .filter_map(|r| match r {
                BatchItemResult::Success(d) => Some(d),
                _ => None,
            })
            .collect()
    }

    /// Returns true if there were no failures.
    pub fn is_clean(&self) -> bool {
        self.status == BatchStatus::Complete
    }

    /// Returns the result if Complete, otherwise returns an error describing the failure(s).
    pub fn expect_complete(self) -> Result<Self, InterestError> {
        match self.status {
            BatchStatus::Complete => Ok(self),
            BatchStatus::Partial => Err(InterestError::CalculationError {
                reason: format!(
                    "Batch calculation incomplete. {}/{} items failed.",
                    self.items_failed, self.items_attempted
                ),
                source_label: Some("Batch".to_string()),
            }),
            BatchStatus::Failed => Err(InterestError::CalculationError {
                reason: "Batch calculation failed completely.".to_string(),
                source_label: Some("Batch".to_string()),
            }),
        }
    }
}

pub struct InterestBatch {
    calculators: Vec<Box<dyn CalculateInterest + Send + Sync>>,
}

impl InterestBatch {
    pub fn new() -> Self {
        Self {
            calculators: Vec::new(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<T: CalculateInterest + Send + Sync + 'static>(mut self, calculator: T) -> Self {
        self.calculators.push(Box::new(calculator));
        self
    }

    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }

    /// Calculates every scenario independently and sums the successes.
    pub fn calculate_all(&self, config: &InterestConfig) -> BatchResult {
        if let Err(e) = config.validate() {
            return config_failure(e, self.calculators.len());
        }

        let results = self
            .calculators
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let outcome = item.calculate_interest(config);
                to_item_result(outcome, item.get_label(), index)
            })
            .collect();

        summarize(results)
    }

    /// Re-runs only the failed items of a previous calculation, e.g. after relaxing the input policy.
    ///
    /// Falls back to a full calculation when `previous` does not line up with this batch.
    pub fn retry_failures(&self, previous: &BatchResult, config: &InterestConfig) -> BatchResult {
        if let Err(e) = config.validate() {
            return config_failure(e, self.calculators.len());
        }
        if previous.results.len() != self.calculators.len() {
            return self.calculate_all(config);
        }

        let results = previous
            .results
            .iter()
            .zip(&self.calculators)
            .enumerate()
            .map(|(index, (prev, item))| match prev {
                BatchItemResult::Success(res) => BatchItemResult::Success(res.clone()),
                BatchItemResult::Failure { .. } => {
                    to_item_result(item.calculate_interest(config), item.get_label(), index)
                }
            })
            .collect();

        summarize(results)
    }
}

impl Default for InterestBatch {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "async")]
pub struct AsyncInterestBatch {
    calculators: Vec<Box<dyn AsyncCalculateInterest>>,
}

#[cfg(feature = "async")]
impl AsyncInterestBatch {
    pub fn new() -> Self {
        Self {
            calculators: Vec::new(),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn add<T: AsyncCalculateInterest + 'static>(mut self, calculator: T) -> Self {
        self.calculators.push(Box::new(calculator));
        self
    }

    /// Calculates every scenario asynchronously, one after another.
    pub async fn calculate_all_async(&self, config: &InterestConfig) -> BatchResult {
        if let Err(e) = config.validate() {
            return config_failure(e, self.calculators.len());
        }

        let mut results = Vec::with_capacity(self.calculators.len());
        for (index, item) in self.calculators.iter().enumerate() {
            let outcome = item.calculate_interest_async(config).await;
            results.push(to_item_result(outcome, item.get_label(), index));
        }

        summarize(results)
    }
}

#[cfg(feature = "async")]
impl Default for AsyncInterestBatch {
    fn default() -> Self {
        Self::new()
    }
}

fn config_failure(error: InterestError, len: usize) -> BatchResult {
    BatchResult {
        status: BatchStatus::Failed,
        results: vec![BatchItemResult::Failure {
            source: "Configuration".to_string(),
            error,
        }],
        total_principal: Some(Decimal::ZERO),
        total_interest: Some(Decimal::ZERO),
        total_amount: Some(Decimal::ZERO),
        items_attempted: len,
        items_failed: len,
    }
}

fn to_item_result(
    outcome: Result<CalculationResult, InterestError>,
    label: Option<String>,
    index: usize,
) -> BatchItemResult {
    match outcome {
        Ok(result) => BatchItemResult::Success(result),
        Err(e) => {
            let source = label.unwrap_or_else(|| format!("Item {}", index + 1));
            BatchItemResult::Failure {
                error: e.with_source(source.clone()),
                source,
            }
        }
    }
}

fn checked_sum(values: impl Iterator<Item = Option<Decimal>>) -> Option<Decimal> {
    values.fold(Some(Decimal::ZERO), |acc, v| acc?.checked_add(v?))
}

fn summarize(results: Vec<BatchItemResult>) -> BatchResult {
    let items_attempted = results.len();
    let items_failed = results
        .iter()
        .filter(|r| matches!(r, BatchItemResult::Failure { .. }))
        .count();

    let successes = || {
        results.iter().filter_map(|r| match r {
            BatchItemResult::Success(d) => Some(d),
            _ => None,
        })
    };
    let total_principal = checked_sum(successes().map(|d| Some(d.principal)));
    let total_interest = checked_sum(successes().map(|d| d.interest));
    let total_amount = checked_sum(successes().map(|d| d.total_amount));

    let status = if items_failed == 0 {
        BatchStatus::Complete
    } else if items_failed == items_attempted {
        BatchStatus::Failed
    } else {
        BatchStatus::Partial
    };

    BatchResult {
        status,
        results,
        total_principal,
        total_interest,
        total_amount,
        items_attempted,
        items_failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::SimpleInterestCalculator;
    use crate::inputs::InputPolicy;
    use rust_decimal_macros::dec;

    fn scenarios() -> InterestBatch {
        InterestBatch::new()
            .add(SimpleInterestCalculator::new().principal(10000).rate(5).time(3).label("Personal Loan"))
            .add(SimpleInterestCalculator::new().principal(20000).rate(4).time(5).label("Car Loan"))
            .add(SimpleInterestCalculator::new().principal("ten").rate(5).time(3))
    }

    #[test]
    fn test_lenient_totals() {
        let report = scenarios().calculate_all(&InterestConfig::default());
        assert!(report.is_clean());
        assert_eq!(report.items_attempted, 3);
        assert_eq!(report.total_principal, Some(dec!(30000)));
        assert_eq!(report.total_interest, Some(dec!(5500)));
        assert_eq!(report.total_amount, Some(dec!(35500)));
    }

    #[test]
    fn test_strict_partial_then_retry() {
        let batch = scenarios();
        let strict = InterestConfig::default().with_policy(InputPolicy::Strict);
        let report = batch.calculate_all(&strict);

        assert_eq!(report.status, BatchStatus::Partial);
        assert_eq!(report.items_failed, 1);
        match report.failures()[0] {
            BatchItemResult::Failure { source, error } => {
                assert_eq!(source, "Item 3");
                assert!(matches!(error, InterestError::InvalidInput { field, .. } if field == "principal"));
            }
            _ => unreachable!(),
        }
        assert_eq!(report.total_interest, Some(dec!(5500)));
        assert!(report.clone().expect_complete().is_err());

        let retried = batch.retry_failures(&report, &InterestConfig::default());
        assert!(retried.is_clean());
        assert_eq!(retried.successes().len(), 3);
    }

    #[test]
    fn test_not_computable_poisons_totals() {
        let report = InterestBatch::new()
            .add(SimpleInterestCalculator::new().principal(Decimal::MAX).rate(5).time(2))
            .add(SimpleInterestCalculator::new().principal(100).rate(5).time(2))
            .calculate_all(&InterestConfig::default());

        assert!(report.is_clean());
        assert_eq!(report.total_interest, None);
        assert_eq!(report.total_amount, None);
        assert_eq!(report.total_principal, None);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config = InterestConfig {
            decimal_places: 99,
            ..Default::default()
        };
        let report = scenarios().calculate_all(&config);
        assert_eq!(report.status, BatchStatus::Failed);
        assert_eq!(report.items_failed, 3);
    }
}
