//! # Interest CLI - Simple Interest Calculator
//!
//! ## Usage
//! ```bash
//! # One calculation
//! interest-cli calc --principal 10000 --rate 5 --time 3 --currency USD
//!
//! # Many scenarios from a JSON array of {principal, rate, time, label}
//! interest-cli batch loans.json
//!
//! # Guided form
//! interest-cli wizard
//!
//! # Create ~/.config/interest/config.toml
//! interest-cli config init
//! ```

use clap::{Args as ClapArgs, Parser, Subcommand};
use colored::Colorize;
use interest::batch::InterestBatch;
use interest::calculator::SimpleInterestCalculator;
use interest::currency::Currency;
use interest::{CalculateInterest, InputPolicy, InterestConfig};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

mod config_loader;
mod report;
mod wizard;

use config_loader::CliConfig;

/// Simple interest calculator: SI = (P x R x T) / 100
#[derive(Parser, Debug)]
#[command(name = "interest-cli")]
#[command(author = "interest contributors")]
#[command(version)]
#[command(about = "Simple interest calculator with chart shares and currency labels", long_about = None)]
struct Args {
    /// Enable file logging to logs/ directory
    #[arg(long, global = true, default_value = "false")]
    log: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug, Default)]
struct OutputArgs {
    /// Currency label, as code or symbol (display only)
    #[arg(long)]
    currency: Option<String>,

    /// Reject non-numeric input instead of treating it as 0
    #[arg(long, default_value = "false")]
    strict: bool,

    /// Decimal places for displayed amounts
    #[arg(long)]
    decimal_places: Option<u32>,

    /// Output results as JSON
    #[arg(long, default_value = "false")]
    json: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculate simple interest for one scenario
    Calc {
        /// Principal (P)
        #[arg(short, long, allow_hyphen_values = true, default_value = "0")]
        principal: String,

        /// Rate of interest in percent per period (R)
        #[arg(short, long, allow_hyphen_values = true, default_value = "0")]
        rate: String,

        /// Time in periods, usually years (T)
        #[arg(short, long, allow_hyphen_values = true, default_value = "0")]
        time: String,

        /// Label shown in explanations
        #[arg(long)]
        label: Option<String>,

        /// Print the step-by-step calculation trace
        #[arg(long, default_value = "false")]
        explain: bool,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Calculate every scenario in a JSON file
    Batch {
        /// JSON array of {principal, rate, time, label}
        file: PathBuf,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Fill in the calculator form interactively
    Wizard,
    /// Manage the persistent configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Write a sample config file
    Init,
    /// Print the effective configuration
    Show,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    let args = Args::parse();
    let file_config = CliConfig::load();

    let _file_guard = init_tracing(args.log || file_config.enable_logging.unwrap_or(false))?;

    match args.command {
        Commands::Calc {
            principal,
            rate,
            time,
            label,
            explain,
            output,
        } => {
            let config = resolve_config(&file_config, &output)?;
            let mut calc = SimpleInterestCalculator::new()
                .principal(principal)
                .rate(rate)
                .time(time);
            if let Some(label) = label {
                calc = calc.label(label);
            }
            run_calc(&calc, &config, output.json, explain)
        }
        Commands::Batch { file, output } => {
            let config = resolve_config(&file_config, &output)?;
            run_batch(&file, &config, output.json)
        }
        Commands::Wizard => {
            let config = resolve_config(&file_config, &OutputArgs::default())?;
            let (calc, currency) = wizard::run_wizard_mode(config.currency)?;
            run_calc(&calc, &config.with_currency(currency), false, false)
        }
        Commands::Config { action } => run_config(action, &file_config),
    }
}

/// Installs the subscriber. With `log`, events also go to a daily file under `logs/`.
fn init_tracing(log: bool) -> CliResult<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let level = if log { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("interest={}", level).parse()?)
        .add_directive(format!("interest_cli={}", level).parse()?);
    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    if !log {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        return Ok(None);
    }

    std::fs::create_dir_all("logs")?;
    let file_appender = tracing_appender::rolling::daily("logs", "interest.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false),
        )
        .init();

    info!(
        "--- Interest Calculation Session Started [{}] ---",
        chrono::Utc::now()
    );
    Ok(Some(guard))
}

/// Defaults < config file < `INTEREST_*` environment < command-line flags.
fn resolve_config(file_config: &CliConfig, output: &OutputArgs) -> CliResult<InterestConfig> {
    let mut config = file_config.to_interest_config()?.with_env_overrides()?;

    if let Some(raw) = &output.currency {
        let currency: Currency = raw
            .parse()
            .map_err(|_| format!("Unknown currency '{}'", raw))?;
        config = config.with_currency(currency);
    }
    if output.strict {
        config = config.with_policy(InputPolicy::Strict);
    }
    if let Some(dp) = output.decimal_places {
        config = config.with_decimal_places(dp)?;
    }

    debug!(?config, "resolved configuration");
    Ok(config)
}

fn run_calc(
    calc: &SimpleInterestCalculator,
    config: &InterestConfig,
    json: bool,
    explain: bool,
) -> CliResult<()> {
    let result = calc.calculate_interest(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\n{}", "Simple Interest Calculator".bright_cyan().bold());
    println!("{}", report::render_result(&result, config));
    report::print_warnings(&result);

    if explain {
        println!("\n{}", result.explain());
    }
    Ok(())
}

fn run_batch(file: &Path, config: &InterestConfig, json: bool) -> CliResult<()> {
    let content = std::fs::read_to_string(file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let scenarios: Vec<SimpleInterestCalculator> = serde_json::from_str(&content)
        .map_err(|e| format!("Failed to parse {}: {}", file.display(), e))?;
    info!(count = scenarios.len(), "loaded scenarios");

    let batch = scenarios
        .into_iter()
        .fold(InterestBatch::new(), |batch, calc| batch.add(calc));
    let report = batch.calculate_all(config);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_batch(&report, config));
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(format!(
            "{}/{} scenarios failed",
            report.items_failed, report.items_attempted
        )
        .into())
    }
}

fn run_config(action: ConfigAction, file_config: &CliConfig) -> CliResult<()> {
    match action {
        ConfigAction::Init => {
            let path = CliConfig::create_sample()?;
            println!("{} {}", "Created".green(), path.display());
        }
        ConfigAction::Show => {
            match CliConfig::config_path() {
                Some(path) => println!("Config file: {}", path.display()),
                None => println!("Config file: (no config directory on this platform)"),
            }
            let effective = resolve_config(file_config, &OutputArgs::default())?;
            println!("{}", serde_json::to_string_pretty(&effective)?);
        }
    }
    Ok(())
}
