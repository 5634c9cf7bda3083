//! Table rendering of results for the terminal.

use colored::Colorize;
use interest::batch::{BatchItemResult, BatchResult};
use interest::chart::{ChartData, SliceKind};
use interest::format::ResultView;
use interest::types::{NOT_COMPUTABLE, format_amount};
use interest::{CalculationResult, InterestConfig};
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Tabled)]
struct AmountRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Share")]
    share: String,
}

#[derive(Tabled)]
struct ScenarioRow {
    #[tabled(rename = "Scenario")]
    scenario: String,
    #[tabled(rename = "Principal")]
    principal: String,
    #[tabled(rename = "Rate %")]
    rate: String,
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Interest")]
    interest: String,
    #[tabled(rename = "Total")]
    total: String,
}

fn share_text(chart: &ChartData, kind: SliceKind) -> String {
    chart
        .slice(kind)
        .and_then(|s| s.share_percent)
        .map(|p| format!("{}%", p))
        .unwrap_or_else(|| NOT_COMPUTABLE.to_string())
}

/// Renders the three display lines plus chart shares of a single result.
pub fn render_result(result: &CalculationResult, config: &InterestConfig) -> String {
    let view = ResultView::with_config(result, config);
    let chart = ChartData::from_result(result);

    let rows = vec![
        AmountRow {
            item: view.principal.label.clone(),
            amount: view.principal.text.clone(),
            share: share_text(&chart, SliceKind::Principal),
        },
        AmountRow {
            item: view.interest.label.clone(),
            amount: view.interest.text.clone(),
            share: share_text(&chart, SliceKind::Interest),
        },
        AmountRow {
            item: view.total_amount.label.clone(),
            amount: view.total_amount.text.clone(),
            share: String::new(),
        },
    ];

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Warnings a user may want to see; the engine itself accepts all of these.
pub fn input_warnings(result: &CalculationResult) -> Vec<String> {
    let mut warnings = Vec::new();
    for (name, value) in [
        ("Principal", result.principal),
        ("Rate", result.rate),
        ("Time", result.time),
    ] {
        if value.is_sign_negative() && !value.is_zero() {
            warnings.push(format!("{} is negative ({})", name, value));
        }
    }
    if !result.is_computable() {
        warnings.push("Result exceeds the representable range and is shown as \"—\"".to_string());
    }
    warnings
}

pub fn print_warnings(result: &CalculationResult) {
    for warning in input_warnings(result) {
        println!("{} {}", "⚠".yellow(), warning.yellow());
    }
}

/// Renders a batch report: one row per scenario, failures and totals underneath.
pub fn render_batch(report: &BatchResult, config: &InterestConfig) -> String {
    let dp = config.decimal_places;
    let rows: Vec<ScenarioRow> = report
        .results
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match item {
            BatchItemResult::Success(res) => Some(ScenarioRow {
                scenario: res.label.clone().unwrap_or_else(|| format!("Item {}", index + 1)),
                principal: format_amount(Some(res.principal), dp),
                rate: res.rate.normalize().to_string(),
                time: res.time.normalize().to_string(),
                interest: res.format_interest(dp),
                total: res.format_total(dp),
            }),
            BatchItemResult::Failure { .. } => None,
        })
        .collect();

    let mut out = String::new();
    if !rows.is_empty() {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        out.push_str(&table.to_string());
        out.push('\n');
    }

    for failure in report.failures() {
        if let BatchItemResult::Failure { source, error } = failure {
            out.push_str(&format!("{} {}: {}\n", "✗".red(), source, error));
        }
    }

    let symbol = config.currency.symbol();
    out.push_str(&format!(
        "{} {} {} | {} {} {} | {} {} {}\n",
        "Total Principal:".bold(),
        symbol,
        format_amount(report.total_principal, dp),
        "Total Interest:".bold(),
        symbol,
        format_amount(report.total_interest, dp),
        "Total Amount:".bold(),
        symbol,
        format_amount(report.total_amount, dp),
    ));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use interest::compute;

    #[test]
    fn test_render_result_contains_amounts() {
        colored::control::set_override(false);
        let text = render_result(&compute(10000, 5, 3), &InterestConfig::default());
        assert!(text.contains("रु 11500"));
        assert!(text.contains("13.04%"));
    }

    #[test]
    fn test_negative_warnings() {
        let warnings = input_warnings(&compute(1000, -5, 2));
        assert_eq!(warnings, vec!["Rate is negative (-5)".to_string()]);
        assert!(input_warnings(&compute(1000, 5, 2)).is_empty());
    }
}
