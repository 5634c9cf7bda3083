//! Two-slice proportion of a result (principal vs. interest) for doughnut or
//! pie charts. A projection of [`CalculationResult`], kept apart from the engine.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::CalculationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, strum::Display)]
#[serde(rename_all = "camelCase")]
pub enum SliceKind {
    Principal,
    Interest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartSlice {
    pub kind: SliceKind,
    pub label: String,
    pub value: Decimal,
    /// Share of the total in percent, rounded to two places.
    /// `None` when the total is zero or not computable.
    pub share_percent: Option<Decimal>,
    pub color: String,
    pub hover_color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChartData {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl ChartData {
    /// Builds the principal/interest proportion of a result.
    ///
    /// Interest that is not computable is plotted as zero, and no shares are reported.
    pub fn from_result(result: &CalculationResult) -> Self {
        let principal = result.principal;
        let interest = result.interest.unwrap_or(Decimal::ZERO);
        let total = result.total_amount;

        let share = |value: Decimal| -> Option<Decimal> {
            let total = total.filter(|t| !t.is_zero())?;
            let ratio = value.checked_div(total)?.checked_mul(dec!(100))?;
            Some(
                ratio
                    .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
                    .normalize(),
            )
        };

        ChartData {
            title: "Amount Distribution".to_string(),
            slices: vec![
                ChartSlice {
                    kind: SliceKind::Principal,
                    label: SliceKind::Principal.to_string(),
                    value: principal,
                    share_percent: share(principal),
                    color: "#4CAF50".to_string(),
                    hover_color: "#45A049".to_string(),
                },
                ChartSlice {
                    kind: SliceKind::Interest,
                    label: SliceKind::Interest.to_string(),
                    value: interest,
                    share_percent: share(interest),
                    color: "#FF6384".to_string(),
                    hover_color: "#FF4364".to_string(),
                },
            ],
        }
    }

    pub fn slice(&self, kind: SliceKind) -> Option<&ChartSlice> {
        self.slices.iter().find(|s| s.kind == kind)
    }

    /// `(label, value)` pairs in plotting order.
    pub fn pairs(&self) -> Vec<(&str, Decimal)> {
        self.slices.iter().map(|s| (s.label.as_str(), s.value)).collect()
    }
}

impl From<&CalculationResult> for ChartData {
    fn from(result: &CalculationResult) -> Self {
        ChartData::from_result(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;

    #[test]
    fn test_personal_loan_shares() {
        let chart = ChartData::from_result(&compute(10000, 5, 3));
        let principal = chart.slice(SliceKind::Principal).unwrap();
        let interest = chart.slice(SliceKind::Interest).unwrap();

        assert_eq!(principal.value, dec!(10000));
        assert_eq!(interest.value, dec!(1500));
        // 10000 / 11500 = 86.956...%, 1500 / 11500 = 13.043...%
        assert_eq!(principal.share_percent, Some(dec!(86.96)));
        assert_eq!(interest.share_percent, Some(dec!(13.04)));
        assert_eq!(chart.pairs(), vec![("Principal", dec!(10000)), ("Interest", dec!(1500))]);
    }

    #[test]
    fn test_zero_total_has_no_shares() {
        let chart = ChartData::from_result(&compute(0, 10, 10));
        assert!(chart.slices.iter().all(|s| s.share_percent.is_none()));
        assert!(chart.slices.iter().all(|s| s.value.is_zero()));
    }

    #[test]
    fn test_not_computable_plots_zero_interest() {
        let chart = ChartData::from(&compute(Decimal::MAX, 5, 2));
        let interest = chart.slice(SliceKind::Interest).unwrap();
        assert_eq!(interest.value, Decimal::ZERO);
        assert_eq!(interest.share_percent, None);
    }
}
