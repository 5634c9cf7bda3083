use rust_decimal::{Decimal, RoundingStrategy};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The kind of arithmetic performed by a single trace step.
///
/// Serialized as camelCase strings (`"initial"`, `"multiply"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum Operation {
    Initial,
    Multiply,
    Divide,
    Add,
    Result,
    Info,
}

impl Operation {
    fn symbol(&self) -> &'static str {
        match self {
            Operation::Initial | Operation::Info => " ",
            Operation::Multiply => "x",
            Operation::Divide => "/",
            Operation::Add => "+",
            Operation::Result => "=",
        }
    }
}

/// Represents a single step in the interest calculation.
///
/// The trace makes the formula `(P x R x T) / 100` auditable step by step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct CalculationStep {
    /// Human-readable description of what this step does.
    pub description: String,
    /// The operand or intermediate value at this step (if applicable).
    pub amount: Option<Decimal>,
    pub operation: Operation,
}

impl CalculationStep {
    fn new(description: impl Into<String>, amount: Option<Decimal>, operation: Operation) -> Self {
        Self {
            description: description.into(),
            amount,
            operation,
        }
    }

    pub fn initial(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, Some(amount), Operation::Initial)
    }

    pub fn multiply(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, Some(amount), Operation::Multiply)
    }

    pub fn divide(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, Some(amount), Operation::Divide)
    }

    pub fn add(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, Some(amount), Operation::Add)
    }

    pub fn result(description: impl Into<String>, amount: Decimal) -> Self {
        Self::new(description, Some(amount), Operation::Result)
    }

    pub fn info(description: impl Into<String>) -> Self {
        Self::new(description, None, Operation::Info)
    }
}

/// Outcome of a simple-interest calculation.
///
/// `interest` and `total_amount` are `None` when the arithmetic left the
/// representable range of `Decimal`. Such a result is display-only: callers
/// should render it as "not computable" and never feed it into further math.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    /// Echo of the principal the interest was computed on.
    pub principal: Decimal,
    /// Echo of the rate, in percent per period.
    pub rate: Decimal,
    /// Echo of the number of periods.
    pub time: Decimal,
    /// `(principal x rate x time) / 100`.
    pub interest: Option<Decimal>,
    /// `principal + interest`.
    pub total_amount: Option<Decimal>,
    /// Optional label for the scenario (e.g. "Car Loan").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Step-by-step trace of how this result was derived.
    #[serde(default)]
    pub calculation_trace: Vec<CalculationStep>,
}

impl CalculationResult {
    /// Returns `true` when both interest and total amount are representable.
    pub fn is_computable(&self) -> bool {
        self.interest.is_some() && self.total_amount.is_some()
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Returns the interest rounded to `dp` decimal places, or "—" when not computable.
    pub fn format_interest(&self, dp: u32) -> String {
        format_amount(self.interest, dp)
    }

    /// Returns the total amount rounded to `dp` decimal places, or "—" when not computable.
    pub fn format_total(&self, dp: u32) -> String {
        format_amount(self.total_amount, dp)
    }

    /// Returns a concise status string.
    /// Format: "{Label}: Interest {interest} - Total: {total}"
    pub fn summary(&self) -> String {
        let label = self.label.as_deref().unwrap_or("Scenario");
        format!(
            "{}: Interest {} - Total: {}",
            label,
            self.format_interest(2),
            self.format_total(2)
        )
    }

    /// Generates a human-readable, step-by-step explanation of the calculation.
    pub fn explain(&self) -> String {
        Explanation(self).to_string()
    }
}

struct Explanation<'a>(&'a CalculationResult);

impl std::fmt::Display for Explanation<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let result = self.0;
        let label = result.label.as_deref().unwrap_or("Scenario");

        writeln!(f, "Explanation for '{}':", label)?;
        writeln!(f, "{:-<50}", "")?;

        let width = result
            .calculation_trace
            .iter()
            .map(|step| step.description.chars().count())
            .max()
            .unwrap_or(20)
            .max(20);

        for step in &result.calculation_trace {
            match step.amount {
                Some(amount) => writeln!(
                    f,
                    "  {:<width$} : {} {:>14} ({})",
                    step.description,
                    step.operation.symbol(),
                    format!("{:.2}", amount),
                    step.operation,
                    width = width
                )?,
                None => writeln!(f, "  INFO: {}", step.description)?,
            }
        }

        writeln!(f, "{:-<50}", "")?;
        if result.is_computable() {
            writeln!(f, "Simple Interest: {}", result.format_interest(2))?;
            writeln!(f, "Total Amount: {}", result.format_total(2))
        } else {
            writeln!(f, "Status: NOT COMPUTABLE (value exceeds representable range)")
        }
    }
}

impl std::fmt::Display for CalculationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = self.label.as_deref().unwrap_or("Scenario");
        writeln!(f, "Scenario: {}", label)?;
        writeln!(f, "P: {} | R: {}% | T: {}", self.principal, self.rate, self.time)?;
        write!(
            f,
            "Interest: {} | Total: {}",
            self.format_interest(2),
            self.format_total(2)
        )
    }
}

/// Placeholder shown wherever a value is not computable.
pub const NOT_COMPUTABLE: &str = "—";

/// Rounds half away from zero to `dp` places and strips trailing zeros.
///
/// `None` renders as [`NOT_COMPUTABLE`].
pub fn format_amount(amount: Option<Decimal>, dp: u32) -> String {
    match amount {
        Some(value) => value
            .round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string(),
        None => NOT_COMPUTABLE.to_string(),
    }
}

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, JsonSchema)]
pub enum InterestError {
    #[error("Invalid Input [{field}]: '{value}' {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Configuration Error: {reason}")]
    ConfigurationError { reason: String },
    #[error("Calculation Error [Scenario: {}]: {reason}", .source_label.as_deref().unwrap_or("Unknown"))]
    CalculationError {
        reason: String,
        source_label: Option<String>,
    },
}

impl InterestError {
    pub fn config(reason: impl Into<String>) -> Self {
        InterestError::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Attaches the scenario label to errors that carry one.
    pub fn with_source(self, label: impl Into<String>) -> Self {
        match self {
            InterestError::CalculationError { reason, .. } => InterestError::CalculationError {
                reason,
                source_label: Some(label.into()),
            },
            other => other,
        }
    }
}
