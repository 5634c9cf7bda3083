//! Numeric coercion of raw form values.
//!
//! Values arrive as whatever the presentation layer has at hand: text typed into
//! a form, JSON numbers, integers or ready-made `Decimal`s. Every one of them is
//! funnelled through [`IntoInterestDecimal`] and then through an [`InputPolicy`].

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::types::InterestError;

/// Why a raw value did not convert cleanly into a `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NumericIssue {
    /// Unparseable text, empty text, `NaN` or an infinity.
    NotANumber { value: String },
    /// A finite number whose magnitude exceeds what `Decimal` can hold.
    OutOfRange { value: String, negative: bool },
}

/// Trait for converting various types into `Decimal` for interest calculations.
///
/// This allows callers to pass `i32`, `f64`, `&str`, etc. directly, without
/// wrapping them in `dec!()` or `Decimal::from()`.
pub trait IntoInterestDecimal {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue>;
}

impl IntoInterestDecimal for Decimal {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        Ok(self)
    }
}

macro_rules! impl_into_interest_decimal_int {
    ($($t:ty),*) => {
        $(
            impl IntoInterestDecimal for $t {
                fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

impl_into_interest_decimal_int!(i32, u32, i64, u64, isize, usize);

impl IntoInterestDecimal for f64 {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        if !self.is_finite() {
            return Err(NumericIssue::NotANumber {
                value: self.to_string(),
            });
        }
        // The shortest round-trip text keeps 0.1 as 0.1 instead of its binary expansion.
        parse_decimal_text(&self.to_string())
    }
}

impl IntoInterestDecimal for f32 {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        if !self.is_finite() {
            return Err(NumericIssue::NotANumber {
                value: self.to_string(),
            });
        }
        parse_decimal_text(&self.to_string())
    }
}

impl IntoInterestDecimal for &str {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        parse_decimal_text(self)
    }
}

impl IntoInterestDecimal for String {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        parse_decimal_text(&self)
    }
}

impl IntoInterestDecimal for &String {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        parse_decimal_text(self)
    }
}

impl<T: IntoInterestDecimal> IntoInterestDecimal for Option<T> {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        match self {
            Some(v) => v.into_interest_decimal(),
            None => Err(NumericIssue::NotANumber {
                value: String::new(),
            }),
        }
    }
}

/// Standard decimal parsing: trimmed, plain or scientific notation.
fn parse_decimal_text(raw: &str) -> Result<Decimal, NumericIssue> {
    let text = raw.trim();
    let not_a_number = || NumericIssue::NotANumber {
        value: raw.to_string(),
    };

    // Digit separators are not part of standard decimal notation.
    if text.is_empty() || text.contains('_') {
        return Err(not_a_number());
    }

    let parsed = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text)
    } else {
        Decimal::from_str(text)
    };
    if let Ok(value) = parsed {
        return Ok(value);
    }

    // Decimal rejected it; distinguish garbage from numbers it cannot hold.
    match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Decimal::from_f64(f).ok_or(NumericIssue::OutOfRange {
            value: raw.to_string(),
            negative: f.is_sign_negative(),
        }),
        _ => Err(not_a_number()),
    }
}

/// A raw value as received from a form or a JSON document.
///
/// JSON integers are kept exact; any other number goes through `f64`. Values
/// that are neither numbers nor text (`null`, booleans, arrays, objects) are
/// kept as-is and coerce like any other non-number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawInput {
    Integer(i64),
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl Default for RawInput {
    fn default() -> Self {
        RawInput::Text(String::new())
    }
}

impl std::fmt::Display for RawInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawInput::Integer(n) => write!(f, "{}", n),
            RawInput::Number(n) => write!(f, "{}", n),
            RawInput::Text(s) => f.write_str(s),
            RawInput::Other(v) => write!(f, "{}", v),
        }
    }
}

impl From<f64> for RawInput {
    fn from(value: f64) -> Self {
        RawInput::Number(value)
    }
}

impl From<i32> for RawInput {
    fn from(value: i32) -> Self {
        RawInput::Integer(i64::from(value))
    }
}

impl From<i64> for RawInput {
    fn from(value: i64) -> Self {
        RawInput::Integer(value)
    }
}

impl From<&str> for RawInput {
    fn from(value: &str) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl From<String> for RawInput {
    fn from(value: String) -> Self {
        RawInput::Text(value)
    }
}

impl From<Decimal> for RawInput {
    fn from(value: Decimal) -> Self {
        RawInput::Text(value.to_string())
    }
}

impl IntoInterestDecimal for &RawInput {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        match self {
            RawInput::Integer(n) => Ok(Decimal::from(*n)),
            RawInput::Number(n) => n.into_interest_decimal(),
            RawInput::Text(s) => parse_decimal_text(s),
            RawInput::Other(v) => Err(NumericIssue::NotANumber {
                value: v.to_string(),
            }),
        }
    }
}

impl IntoInterestDecimal for RawInput {
    fn into_interest_decimal(self) -> Result<Decimal, NumericIssue> {
        (&self).into_interest_decimal()
    }
}

/// How raw values that are not finite numbers are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, JsonSchema)]
#[derive(strum::Display, strum::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InputPolicy {
    /// Non-numbers become zero; out-of-range magnitudes saturate.
    #[default]
    Lenient,
    /// Non-numbers and out-of-range magnitudes are rejected.
    Strict,
}

/// The three inputs of the formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Field {
    Principal,
    Rate,
    Time,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum AdjustmentKind {
    DefaultedToZero,
    Saturated,
}

/// Records a lenient coercion that changed what the caller supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Adjustment {
    pub field: Field,
    pub original: String,
    pub kind: AdjustmentKind,
}

impl std::fmt::Display for Adjustment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AdjustmentKind::DefaultedToZero => {
                write!(f, "{} '{}' is not a number - treated as 0", self.field, self.original)
            }
            AdjustmentKind::Saturated => write!(
                f,
                "{} '{}' exceeds the representable range - saturated",
                self.field, self.original
            ),
        }
    }
}

fn coerce_lenient(field: Field, value: Result<Decimal, NumericIssue>) -> (Decimal, Option<Adjustment>) {
    match value {
        Ok(v) => (v, None),
        Err(NumericIssue::NotANumber { value }) => {
            debug!(%field, value = %value, "non-numeric input treated as zero");
            (
                Decimal::ZERO,
                Some(Adjustment {
                    field,
                    original: value,
                    kind: AdjustmentKind::DefaultedToZero,
                }),
            )
        }
        Err(NumericIssue::OutOfRange { value, negative }) => {
            debug!(%field, value = %value, "out-of-range input saturated");
            let saturated = if negative { Decimal::MIN } else { Decimal::MAX };
            (
                saturated,
                Some(Adjustment {
                    field,
                    original: value,
                    kind: AdjustmentKind::Saturated,
                }),
            )
        }
    }
}

fn coerce_strict(field: Field, value: impl IntoInterestDecimal) -> Result<Decimal, InterestError> {
    value.into_interest_decimal().map_err(|issue| match issue {
        NumericIssue::NotANumber { value } => InterestError::InvalidInput {
            field: field.to_string(),
            value,
            reason: "is not a finite number".to_string(),
        },
        NumericIssue::OutOfRange { value, .. } => InterestError::InvalidInput {
            field: field.to_string(),
            value,
            reason: "exceeds the representable range".to_string(),
        },
    })
}

/// The three scalar inputs of one calculation, already coerced to `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct CalculationInput {
    /// Amount the interest accrues on, in any currency.
    pub principal: Decimal,
    /// Interest rate in percent per period (5 means 5%).
    pub rate: Decimal,
    /// Number of periods, typically years.
    pub time: Decimal,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    adjustments: Vec<Adjustment>,
}

impl CalculationInput {
    pub fn new(principal: Decimal, rate: Decimal, time: Decimal) -> Self {
        Self {
            principal,
            rate,
            time,
            adjustments: Vec::new(),
        }
    }

    /// Coerces raw values, treating anything that is not a finite number as zero.
    pub fn lenient(
        principal: impl IntoInterestDecimal,
        rate: impl IntoInterestDecimal,
        time: impl IntoInterestDecimal,
    ) -> Self {
        let mut adjustments = Vec::new();
        let mut take = |field: Field, value: Result<Decimal, NumericIssue>| {
            let (v, adj) = coerce_lenient(field, value);
            adjustments.extend(adj);
            v
        };
        let principal = take(Field::Principal, principal.into_interest_decimal());
        let rate = take(Field::Rate, rate.into_interest_decimal());
        let time = take(Field::Time, time.into_interest_decimal());

        Self {
            principal,
            rate,
            time,
            adjustments,
        }
    }

    /// Coerces raw values, rejecting anything that is not a finite, representable number.
    pub fn strict(
        principal: impl IntoInterestDecimal,
        rate: impl IntoInterestDecimal,
        time: impl IntoInterestDecimal,
    ) -> Result<Self, InterestError> {
        Ok(Self::new(
            coerce_strict(Field::Principal, principal)?,
            coerce_strict(Field::Rate, rate)?,
            coerce_strict(Field::Time, time)?,
        ))
    }

    /// Coerces raw values under the given policy.
    pub fn parse(
        principal: impl IntoInterestDecimal,
        rate: impl IntoInterestDecimal,
        time: impl IntoInterestDecimal,
        policy: InputPolicy,
    ) -> Result<Self, InterestError> {
        match policy {
            InputPolicy::Lenient => Ok(Self::lenient(principal, rate, time)),
            InputPolicy::Strict => Self::strict(principal, rate, time),
        }
    }

    /// Coercions applied while building this input (always empty for strict or direct construction).
    pub fn adjustments(&self) -> &[Adjustment] {
        &self.adjustments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_parsing() {
        assert_eq!("1500".into_interest_decimal(), Ok(dec!(1500)));
        assert_eq!("  -3.25 ".into_interest_decimal(), Ok(dec!(-3.25)));
        assert_eq!("1e3".into_interest_decimal(), Ok(dec!(1000)));
        assert_eq!("2.5E-1".into_interest_decimal(), Ok(dec!(0.25)));
    }

    #[test]
    fn test_not_a_number() {
        for raw in ["abc", "", "   ", "NaN", "inf", "12abc", "1_000", "_5", "1e_3"] {
            assert!(
                matches!(raw.into_interest_decimal(), Err(NumericIssue::NotANumber { .. })),
                "{raw:?} should not parse"
            );
        }
        assert!(matches!(
            f64::NAN.into_interest_decimal(),
            Err(NumericIssue::NotANumber { .. })
        ));
        assert!(matches!(
            f64::NEG_INFINITY.into_interest_decimal(),
            Err(NumericIssue::NotANumber { .. })
        ));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            "-1e40".into_interest_decimal(),
            Err(NumericIssue::OutOfRange {
                value: "-1e40".to_string(),
                negative: true
            })
        );
        assert!(matches!(
            1e300_f64.into_interest_decimal(),
            Err(NumericIssue::OutOfRange { negative: false, .. })
        ));
    }

    #[test]
    fn test_float_keeps_short_representation() {
        assert_eq!(0.1_f64.into_interest_decimal(), Ok(dec!(0.1)));
        assert_eq!(5.0_f64.into_interest_decimal(), Ok(dec!(5)));
    }

    #[test]
    fn test_raw_input_deserialization() {
        let values: Vec<RawInput> =
            serde_json::from_str(r#"[10000, 2.5, "5", "abc", null, true]"#).unwrap();
        assert_eq!(values[0], RawInput::Integer(10000));
        assert_eq!(values[1], RawInput::Number(2.5));
        assert_eq!(values[2], RawInput::Text("5".to_string()));
        assert_eq!(values[4], RawInput::Other(serde_json::Value::Null));
        assert_eq!((&values[0]).into_interest_decimal(), Ok(dec!(10000)));
        assert_eq!((&values[1]).into_interest_decimal(), Ok(dec!(2.5)));
        assert!((&values[3]).into_interest_decimal().is_err());
        assert_eq!(
            (&values[5]).into_interest_decimal(),
            Err(NumericIssue::NotANumber {
                value: "true".to_string()
            })
        );
    }

    #[test]
    fn test_large_json_integer_is_exact() {
        // 2^53 + 1 has no exact f64 representation.
        let value: RawInput = serde_json::from_str("9007199254740993").unwrap();
        assert_eq!(value.into_interest_decimal(), Ok(dec!(9007199254740993)));
    }

    #[test]
    fn test_digit_separators_follow_policy() {
        let input = CalculationInput::lenient("1_000", 5, 2);
        assert_eq!(input.principal, Decimal::ZERO);
        assert_eq!(input.adjustments()[0].kind, AdjustmentKind::DefaultedToZero);
        assert_eq!(input.adjustments()[0].original, "1_000");

        let err = CalculationInput::strict("1_000", 5, 2).unwrap_err();
        assert!(matches!(err, InterestError::InvalidInput { ref field, .. } if field == "principal"));
    }

    #[test]
    fn test_lenient_records_adjustments() {
        let input = CalculationInput::lenient("abc", 5, "1e40");
        assert_eq!(input.principal, Decimal::ZERO);
        assert_eq!(input.rate, dec!(5));
        assert_eq!(input.time, Decimal::MAX);
        assert_eq!(input.adjustments().len(), 2);
        assert_eq!(input.adjustments()[0].field, Field::Principal);
        assert_eq!(input.adjustments()[0].kind, AdjustmentKind::DefaultedToZero);
        assert_eq!(input.adjustments()[1].kind, AdjustmentKind::Saturated);
    }

    #[test]
    fn test_strict_rejects_with_field() {
        let err = CalculationInput::strict(1000, "five", 2).unwrap_err();
        assert_eq!(
            err,
            InterestError::InvalidInput {
                field: "rate".to_string(),
                value: "five".to_string(),
                reason: "is not a finite number".to_string(),
            }
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("STRICT".parse::<InputPolicy>().unwrap(), InputPolicy::Strict);
        assert_eq!(InputPolicy::default().to_string(), "lenient");
    }
}
