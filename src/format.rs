use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::InterestConfig;
use crate::currency::Currency;
use crate::types::{CalculationResult, NOT_COMPUTABLE, format_amount};

/// One labelled amount of a rendered result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewLine {
    pub label: String,
    pub value: Option<Decimal>,
    /// e.g. "$ 11500", or "—" when not computable.
    pub text: String,
}

/// Display projection of a [`CalculationResult`]: currency label plus rounded amounts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultView {
    pub currency: Currency,
    pub principal: ViewLine,
    pub interest: ViewLine,
    pub total_amount: ViewLine,
}

fn line(label: &str, value: Option<Decimal>, currency: Currency, dp: u32) -> ViewLine {
    let text = match value {
        Some(_) => format!("{} {}", currency.symbol(), format_amount(value, dp)),
        None => NOT_COMPUTABLE.to_string(),
    };
    ViewLine {
        label: label.to_string(),
        value,
        text,
    }
}

impl ResultView {
    pub fn new(result: &CalculationResult, currency: Currency, decimal_places: u32) -> Self {
        ResultView {
            currency,
            principal: line("Principal Amount", Some(result.principal), currency, decimal_places),
            interest: line("Simple Interest", result.interest, currency, decimal_places),
            total_amount: line("Total Amount", result.total_amount, currency, decimal_places),
        }
    }

    pub fn with_config(result: &CalculationResult, config: &InterestConfig) -> Self {
        Self::new(result, config.currency, config.decimal_places)
    }

    pub fn lines(&self) -> [&ViewLine; 3] {
        [&self.principal, &self.interest, &self.total_amount]
    }
}

impl std::fmt::Display for ResultView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.lines().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", line.label, line.text)?;
        }
        Ok(())
    }
}
