use serde::{Deserialize, Serialize};
use std::env;
use std::fs;

use crate::builder::{Build, Validate};
use crate::currency::Currency;
use crate::inputs::InputPolicy;
use crate::types::InterestError;

/// Highest number of decimal places a `Decimal` can carry.
pub const MAX_DECIMAL_PLACES: u32 = 28;

/// Global configuration for interest calculations and their presentation.
///
/// None of these settings alter the formula itself: `input_policy` decides how
/// raw values are coerced, `currency` and `decimal_places` only affect display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    pub input_policy: InputPolicy,
    pub currency: Currency,
    /// Rounding applied when formatting amounts for display.
    pub decimal_places: u32,
}

impl Default for InterestConfig {
    fn default() -> Self {
        InterestConfig {
            input_policy: InputPolicy::default(),
            currency: Currency::default(),
            decimal_places: 2,
        }
    }
}

// Ensure the caller can easily create a config
impl std::str::FromStr for InterestConfig {
    type Err = InterestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: InterestConfig = serde_json::from_str(s)
            .map_err(|e| InterestError::config(format!("Failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

impl InterestConfig {
    pub fn builder() -> InterestConfigBuilder {
        InterestConfigBuilder::default()
    }

    /// Validates the configuration for logical consistency.
    pub fn validate(&self) -> Result<(), InterestError> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(InterestError::config(format!(
                "decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, self.decimal_places
            )));
        }
        Ok(())
    }

    /// Loads the defaults overridden by `INTEREST_*` environment variables.
    pub fn from_env() -> Result<Self, InterestError> {
        Self::default().with_env_overrides()
    }

    /// Applies any of `INTEREST_INPUT_POLICY`, `INTEREST_CURRENCY` and
    /// `INTEREST_DECIMAL_PLACES` that are set. Unset variables leave the field alone.
    pub fn with_env_overrides(self) -> Result<Self, InterestError> {
        self.with_overrides(|key| env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self, InterestError> {
        if let Some(raw) = lookup("INTEREST_INPUT_POLICY") {
            self.input_policy = raw.trim().parse().map_err(|_| {
                InterestError::config(format!("Invalid INTEREST_INPUT_POLICY: '{}'", raw))
            })?;
        }
        if let Some(raw) = lookup("INTEREST_CURRENCY") {
            self.currency = raw.trim().parse().map_err(|_| {
                InterestError::config(format!("Invalid INTEREST_CURRENCY: '{}'", raw))
            })?;
        }
        if let Some(raw) = lookup("INTEREST_DECIMAL_PLACES") {
            self.decimal_places = raw.trim().parse().map_err(|e| {
                InterestError::config(format!("Invalid INTEREST_DECIMAL_PLACES '{}': {}", raw, e))
            })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Attempts to load configuration from a JSON file.
    pub fn try_from_json(path: &str) -> Result<Self, InterestError> {
        let content = fs::read_to_string(path)
            .map_err(|e| InterestError::config(format!("Failed to read config file: {}", e)))?;
        content.parse()
    }

    // ========== Fluent Helper Methods ==========

    pub fn with_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = policy;
        self
    }

    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_decimal_places(mut self, dp: u32) -> Result<Self, InterestError> {
        self.decimal_places = dp;
        self.validate()?;
        Ok(self)
    }
}

// ========== InterestConfigBuilder ==========

#[derive(Default)]
pub struct InterestConfigBuilder {
    input_policy: Option<InputPolicy>,
    currency: Option<Currency>,
    decimal_places: Option<u32>,
}

impl InterestConfigBuilder {
    pub fn input_policy(mut self, policy: InputPolicy) -> Self {
        self.input_policy = Some(policy);
        self
    }

    pub fn strict(self) -> Self {
        self.input_policy(InputPolicy::Strict)
    }

    pub fn currency(mut self, currency: Currency) -> Self {
        self.currency = Some(currency);
        self
    }

    pub fn decimal_places(mut self, dp: u32) -> Self {
        self.decimal_places = Some(dp);
        self
    }
}

impl Validate for InterestConfigBuilder {
    fn validate(&self) -> Result<(), InterestError> {
        if let Some(dp) = self.decimal_places
            && dp > MAX_DECIMAL_PLACES
        {
            return Err(InterestError::config(format!(
                "decimal_places must be at most {}, got {}",
                MAX_DECIMAL_PLACES, dp
            )));
        }
        Ok(())
    }
}

impl Build<InterestConfig> for InterestConfigBuilder {
    fn build(self) -> Result<InterestConfig, InterestError> {
        Validate::validate(&self)?;

        let defaults = InterestConfig::default();
        let config = InterestConfig {
            input_policy: self.input_policy.unwrap_or(defaults.input_policy),
            currency: self.currency.unwrap_or(defaults.currency),
            decimal_places: self.decimal_places.unwrap_or(defaults.decimal_places),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_builder_validation() {
        let config = InterestConfig::builder()
            .strict()
            .currency(Currency::Usd)
            .build()
            .unwrap();
        assert_eq!(config.input_policy, InputPolicy::Strict);
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.decimal_places, 2);

        let res = InterestConfig::builder().decimal_places(29).build();
        assert!(matches!(res, Err(InterestError::ConfigurationError { .. })));
    }

    #[test]
    fn test_from_json_with_defaults() {
        let config: InterestConfig = r#"{"currency": "EUR"}"#.parse().unwrap();
        assert_eq!(config.currency, Currency::Eur);
        assert_eq!(config.input_policy, InputPolicy::Lenient);

        let config: InterestConfig = r#"{"input_policy": "strict", "decimal_places": 4}"#.parse().unwrap();
        assert_eq!(config.input_policy, InputPolicy::Strict);
        assert_eq!(config.decimal_places, 4);

        assert!("{not json".parse::<InterestConfig>().is_err());
        assert!(r#"{"decimal_places": 40}"#.parse::<InterestConfig>().is_err());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("INTEREST_INPUT_POLICY", "Strict"),
            ("INTEREST_CURRENCY", "$"),
        ]);
        let config = InterestConfig::default()
            .with_overrides(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.input_policy, InputPolicy::Strict);
        assert_eq!(config.currency, Currency::Usd);
        assert_eq!(config.decimal_places, 2);

        let bad = InterestConfig::default()
            .with_overrides(|k| (k == "INTEREST_DECIMAL_PLACES").then(|| "two".to_string()));
        assert!(bad.is_err());
    }
}
