//! # Simple Interest
//!
//! `SI = (P x R x T) / 100` and `Total = P + SI`, where `R` is a percentage per
//! period and `T` a number of periods. Interest accrues on the principal only,
//! never on previously accrued interest.
//!
//! The engine is a pure formula evaluator. Negative principal, rate or time are
//! evaluated as-is; whether they deserve a warning is the caller's decision.
//! Results that leave the range of `Decimal` are returned as *not computable*
//! (`None`) instead of an error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::warn;

use crate::config::InterestConfig;
use crate::inputs::{CalculationInput, InputPolicy, IntoInterestDecimal};
use crate::types::{CalculationResult, CalculationStep, InterestError};

const PERCENT: Decimal = dec!(100);

/// Stateless simple-interest evaluator.
///
/// The only thing it carries is the [`InputPolicy`] used by [`InterestEngine::compute_raw`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InterestEngine {
    policy: InputPolicy,
}

impl InterestEngine {
    pub fn new(config: &InterestConfig) -> Self {
        Self {
            policy: config.input_policy,
        }
    }

    pub fn with_policy(policy: InputPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    /// Evaluates the formula for an already coerced input.
    pub fn compute(&self, input: &CalculationInput) -> CalculationResult {
        let (principal, rate, time) = (input.principal, input.rate, input.time);

        let mut trace: Vec<CalculationStep> = input
            .adjustments()
            .iter()
            .map(|adj| CalculationStep::info(adj.to_string()))
            .collect();
        trace.push(CalculationStep::initial("Principal (P)", principal));
        trace.push(CalculationStep::multiply("Rate (R, % per period)", rate));
        trace.push(CalculationStep::multiply("Time (T, periods)", time));

        let interest = simple_interest(principal, rate, time);
        let total_amount = interest.and_then(|i| principal.checked_add(i));

        match (interest, total_amount) {
            (Some(i), Some(total)) => {
                trace.push(CalculationStep::divide("Percent Divisor", PERCENT));
                trace.push(CalculationStep::result("Simple Interest (SI)", i));
                trace.push(CalculationStep::add("Principal (P)", principal));
                trace.push(CalculationStep::result("Total Amount", total));
            }
            (Some(i), None) => {
                warn!(%principal, interest = %i, "total amount overflowed");
                trace.push(CalculationStep::divide("Percent Divisor", PERCENT));
                trace.push(CalculationStep::result("Simple Interest (SI)", i));
                trace.push(CalculationStep::info(
                    "Total amount exceeds the representable range - not computable",
                ));
            }
            (None, _) => {
                warn!(%principal, %rate, %time, "simple interest overflowed");
                trace.push(CalculationStep::info(
                    "Interest exceeds the representable range - not computable",
                ));
            }
        }

        CalculationResult {
            principal,
            rate,
            time,
            // A total that cannot be represented invalidates the whole result.
            interest: total_amount.and(interest),
            total_amount,
            label: None,
            calculation_trace: trace,
        }
    }

    /// Coerces raw values under this engine's policy, then evaluates the formula.
    ///
    /// Only fails under [`InputPolicy::Strict`].
    pub fn compute_raw(
        &self,
        principal: impl IntoInterestDecimal,
        rate: impl IntoInterestDecimal,
        time: impl IntoInterestDecimal,
    ) -> Result<CalculationResult, InterestError> {
        let input = CalculationInput::parse(principal, rate, time, self.policy)?;
        Ok(self.compute(&input))
    }
}

/// `(P x R x T) / 100`, or `None` when the interest itself is out of range.
///
/// The natural order `P x R x T / 100` is tried first. If an intermediate
/// product overflows, the factors are regrouped (and the divisor applied
/// earlier) before giving up, so a representable result is never lost to
/// evaluation order.
pub fn simple_interest(principal: Decimal, rate: Decimal, time: Decimal) -> Option<Decimal> {
    let (p, r, t) = (principal, rate, time);
    let orders = [(p, r, t), (p, t, r), (r, t, p), (r, p, t), (t, p, r), (t, r, p)];

    let divide_last = |&(a, b, c): &(Decimal, Decimal, Decimal)| {
        a.checked_mul(b)?.checked_mul(c)?.checked_div(PERCENT)
    };
    let divide_between = |&(a, b, c): &(Decimal, Decimal, Decimal)| {
        a.checked_mul(b)?.checked_div(PERCENT)?.checked_mul(c)
    };
    let divide_first = |&(a, b, c): &(Decimal, Decimal, Decimal)| {
        a.checked_div(PERCENT)?.checked_mul(b)?.checked_mul(c)
    };

    orders
        .iter()
        .find_map(divide_last)
        .or_else(|| orders.iter().find_map(divide_between))
        .or_else(|| orders.iter().find_map(divide_first))
}

/// Computes simple interest with lenient coercion of every argument.
///
/// Anything that is not a finite number is treated as zero; this never fails.
///
/// ```
/// use rust_decimal_macros::dec;
///
/// let res = interest::compute(10000, 5, 3);
/// assert_eq!(res.interest, Some(dec!(1500)));
/// assert_eq!(res.total_amount, Some(dec!(11500)));
/// ```
pub fn compute(
    principal: impl IntoInterestDecimal,
    rate: impl IntoInterestDecimal,
    time: impl IntoInterestDecimal,
) -> CalculationResult {
    let input = CalculationInput::lenient(principal, rate, time);
    InterestEngine::default().compute(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Operation;

    #[test]
    fn test_personal_loan() {
        let res = compute(10000, 5, 3);
        assert_eq!(res.interest, Some(dec!(1500)));
        assert_eq!(res.total_amount, Some(dec!(11500)));
        assert_eq!(res.principal, dec!(10000));
        assert!(res.is_computable());
    }

    #[test]
    fn test_fractional_inputs() {
        let res = compute("2500.50", "3.75", "1.5");
        // 2500.50 * 3.75 * 1.5 / 100 = 140.653125
        assert_eq!(res.interest, Some(dec!(140.653125)));
        assert_eq!(res.total_amount, Some(dec!(2641.153125)));
    }

    #[test]
    fn test_trace_shape() {
        let res = compute(20000, 4, 5);
        let ops: Vec<Operation> = res.calculation_trace.iter().map(|s| s.operation).collect();
        assert_eq!(
            ops,
            vec![
                Operation::Initial,
                Operation::Multiply,
                Operation::Multiply,
                Operation::Divide,
                Operation::Result,
                Operation::Add,
                Operation::Result,
            ]
        );
    }

    #[test]
    fn test_coercion_note_leads_trace() {
        let res = compute("abc", 5, 2);
        assert_eq!(res.calculation_trace[0].operation, Operation::Info);
        assert!(res.calculation_trace[0].description.contains("principal 'abc'"));
        assert_eq!(res.interest, Some(Decimal::ZERO));
    }

    #[test]
    fn test_overflow_is_not_computable() {
        let res = compute(Decimal::MAX, 5, 2);
        assert_eq!(res.interest, None);
        assert_eq!(res.total_amount, None);
        assert!(!res.is_computable());
    }

    #[test]
    fn test_total_overflow_hides_interest() {
        // Interest alone fits, the sum does not.
        let res = compute(Decimal::MAX, 1, 1);
        assert!(!res.is_computable());
        assert_eq!(res.interest, None);
    }

    #[test]
    fn test_intermediate_overflow_is_regrouped() {
        // P x R alone exceeds Decimal::MAX, the interest (1e25) does not.
        let p = Decimal::from_scientific("1e27").unwrap();
        let res = compute(p, 10000, dec!(0.0001));
        assert_eq!(res.interest, Decimal::from_scientific("1e25").ok());
        assert_eq!(res.total_amount, Decimal::from_scientific("1.01e27").ok());
        assert!(res.is_computable());
    }

    #[test]
    fn test_interest_out_of_range_in_every_order() {
        assert_eq!(simple_interest(Decimal::MAX, Decimal::MAX, dec!(1)), None);
        let res = compute(Decimal::MAX, Decimal::MAX, 1);
        assert_eq!(res.interest, None);
        assert_eq!(res.calculation_trace.last().map(|s| s.operation), Some(Operation::Info));
    }

    #[test]
    fn test_strict_engine() {
        let engine = InterestEngine::with_policy(InputPolicy::Strict);
        assert!(engine.compute_raw("abc", 5, 2).is_err());
        let res = engine.compute_raw("1000", "-5", "2").unwrap();
        assert_eq!(res.interest, Some(dec!(-100)));
    }
}
