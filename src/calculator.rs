use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::InterestConfig;
use crate::engine::InterestEngine;
use crate::inputs::RawInput;
use crate::traits::CalculateInterest;
use crate::types::{CalculationResult, InterestError};

/// One simple-interest scenario holding the raw values as the user entered them.
///
/// Coercion is deferred to [`CalculateInterest::calculate_interest`], so the
/// same scenario can be evaluated under a lenient or a strict policy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct SimpleInterestCalculator {
    #[serde(default)]
    pub principal: RawInput,
    #[serde(default)]
    pub rate: RawInput,
    #[serde(default)]
    pub time: RawInput,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default = "uuid::Uuid::new_v4")]
    pub id: uuid::Uuid,
}

impl SimpleInterestCalculator {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            ..Default::default()
        }
    }

    pub fn principal(mut self, value: impl Into<RawInput>) -> Self {
        self.principal = value.into();
        self
    }

    pub fn rate(mut self, value: impl Into<RawInput>) -> Self {
        self.rate = value.into();
        self
    }

    pub fn time(mut self, value: impl Into<RawInput>) -> Self {
        self.time = value.into();
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl CalculateInterest for SimpleInterestCalculator {
    fn calculate_interest(&self, config: &InterestConfig) -> Result<CalculationResult, InterestError> {
        let result = InterestEngine::new(config).compute_raw(&self.principal, &self.rate, &self.time)?;
        Ok(match &self.label {
            Some(label) => result.with_label(label.clone()),
            None => result,
        })
    }

    fn get_label(&self) -> Option<String> {
        self.label.clone()
    }

    fn get_id(&self) -> uuid::Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::InputPolicy;
    use rust_decimal_macros::dec;

    #[test]
    fn test_car_loan() {
        let calc = SimpleInterestCalculator::new()
            .principal(20000)
            .rate("4")
            .time(5.0)
            .label("Car Loan");
        let res = calc.calculate_interest(&InterestConfig::default()).unwrap();

        assert_eq!(res.interest, Some(dec!(4000)));
        assert_eq!(res.total_amount, Some(dec!(24000)));
        assert_eq!(res.label.as_deref(), Some("Car Loan"));
    }

    #[test]
    fn test_policy_applies_at_calculation() {
        let calc = SimpleInterestCalculator::new().principal("abc").rate(5).time(2);

        let lenient = calc.calculate_interest(&InterestConfig::default()).unwrap();
        assert_eq!(lenient.interest, Some(dec!(0)));

        let strict = InterestConfig::default().with_policy(InputPolicy::Strict);
        assert!(calc.calculate_interest(&strict).is_err());
    }

    #[test]
    fn test_deserialize_raw_scenario() {
        let calc: SimpleInterestCalculator =
            serde_json::from_str(r#"{"principal": "10000", "rate": 5, "label": "No time"}"#).unwrap();
        assert_eq!(calc.time, RawInput::default());
        assert!(!calc.id.is_nil());

        // A missing field is empty text, treated as zero.
        let res = calc.calculate_interest(&InterestConfig::default()).unwrap();
        assert_eq!(res.interest, Some(dec!(0)));
        assert_eq!(res.total_amount, Some(dec!(10000)));
    }

    #[test]
    fn test_null_and_bool_fields_coerce() {
        let scenarios: Vec<SimpleInterestCalculator> = serde_json::from_str(
            r#"[{"principal": null, "rate": 5, "time": 2}, {"principal": 1000, "rate": true, "time": 2}]"#,
        )
        .unwrap();

        let res = scenarios[0].calculate_interest(&InterestConfig::default()).unwrap();
        assert_eq!(res.principal, dec!(0));
        assert_eq!(res.interest, Some(dec!(0)));
        assert!(res.calculation_trace[0].description.contains("principal 'null'"));

        let strict = InterestConfig::default().with_policy(InputPolicy::Strict);
        match scenarios[1].calculate_interest(&strict) {
            Err(InterestError::InvalidInput { field, value, .. }) => {
                assert_eq!(field, "rate");
                assert_eq!(value, "true");
            }
            other => panic!("expected invalid rate, got {other:?}"),
        }
    }
}
