use colored::Colorize;
use inquire::{Select, Text};
use interest::calculator::SimpleInterestCalculator;
use interest::currency::Currency;
use strum::IntoEnumIterator;

struct CurrencyChoice(Currency);

impl std::fmt::Display for CurrencyChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.display_name())
    }
}

/// Runs the guided form: currency, principal, time, rate.
///
/// Values are kept as typed; coercion happens when the scenario is calculated.
pub fn run_wizard_mode(
    default_currency: Currency,
) -> Result<(SimpleInterestCalculator, Currency), Box<dyn std::error::Error>> {
    println!("\n{}", "SIMPLE INTEREST CALCULATOR".bright_cyan().bold());
    println!("{}", "SI = (P x R x T) / 100".dimmed());
    println!("{}", "You can press Ctrl+C at any time to exit.".dimmed());
    println!();

    let options: Vec<CurrencyChoice> = Currency::iter().map(CurrencyChoice).collect();
    let start = options
        .iter()
        .position(|c| c.0 == default_currency)
        .unwrap_or(0);
    let currency = Select::new("Currency:", options)
        .with_starting_cursor(start)
        .prompt()?
        .0;

    let principal = Text::new("Principal (P):")
        .with_placeholder("Enter Principal")
        .prompt()?;
    let time = Text::new("Time (T):")
        .with_placeholder("Enter Time in Years")
        .prompt()?;
    let rate = Text::new("Rate of Interest (R):")
        .with_placeholder("Enter Rate in %")
        .prompt()?;

    let calc = SimpleInterestCalculator::new()
        .principal(principal)
        .rate(rate)
        .time(time)
        .label("Wizard");

    Ok((calc, currency))
}
