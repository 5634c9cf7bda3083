use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// Currency label attached to formatted amounts.
///
/// Purely cosmetic: no exchange rate exists anywhere in this crate, and the
/// label never takes part in arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize, JsonSchema)]
#[derive(EnumIter, EnumString)]
#[serde(rename_all = "UPPERCASE")]
#[strum(ascii_case_insensitive)]
pub enum Currency {
    /// Nepali Rupee.
    #[default]
    #[strum(serialize = "NPR", serialize = "रु")]
    Npr,
    /// US Dollar.
    #[strum(serialize = "USD", serialize = "$")]
    Usd,
    /// Euro.
    #[strum(serialize = "EUR", serialize = "€")]
    Eur,
    /// Indian Rupee.
    #[strum(serialize = "INR", serialize = "₹")]
    Inr,
    /// Japanese Yen.
    #[strum(serialize = "JPY", serialize = "¥")]
    Jpy,
    /// No currency picked yet.
    #[serde(rename = "NONE")]
    #[strum(serialize = "NONE", serialize = "💸")]
    Unspecified,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Npr => "रु",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Inr => "₹",
            Currency::Jpy => "¥",
            Currency::Unspecified => "💸",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Npr => "NPR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Jpy => "JPY",
            Currency::Unspecified => "NONE",
        }
    }

    /// Menu text, e.g. "NPR - Nepali Rupee (रु)".
    pub fn display_name(&self) -> String {
        let name = match self {
            Currency::Npr => "Nepali Rupee",
            Currency::Usd => "US Dollar",
            Currency::Eur => "Euro",
            Currency::Inr => "Indian Rupee",
            Currency::Jpy => "Japanese Yen",
            Currency::Unspecified => "Select Currency",
        };
        match self {
            Currency::Unspecified => format!("{} ({})", name, self.symbol()),
            _ => format!("{} - {} ({})", self.code(), name, self.symbol()),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_code_or_symbol() {
        assert_eq!("usd".parse::<Currency>().unwrap(), Currency::Usd);
        assert_eq!("€".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!("रु".parse::<Currency>().unwrap(), Currency::Npr);
        assert!("GBP".parse::<Currency>().is_err());
    }

    #[test]
    fn test_round_trip_through_code() {
        for currency in Currency::iter() {
            assert_eq!(currency.code().parse::<Currency>().unwrap(), currency);
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(Currency::Inr.display_name(), "INR - Indian Rupee (₹)");
        assert_eq!(Currency::default(), Currency::Npr);
    }
}
