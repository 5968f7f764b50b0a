pub mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use listwise_core::{
    ConfigOverrides, EngineConfig, LoadOptions, LogFormat, LoggingConfig, SeasonType, StorageState,
};
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "listwise",
    about = "Listwise pricing and offer advisor CLI",
    long_about = "Evaluate a resale listing: price/probability curve, optimal list price, \
                  offer assessment, and counter-offer recommendation.",
    after_help = "Examples:\n  listwise advise --price 40 --offer 25 --days 7 --item-type summer\n  listwise curve --price 40 --item-type winter --json\n  listwise config"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Evaluate an offer against the optimal price and recommend a response")]
    Advise(AdviseArgs),
    #[command(about = "Print the 13-point price/probability/expected-value curve")]
    Curve(CurveArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

#[derive(Debug, Args)]
struct AdviseArgs {
    #[arg(long, help = "Listed price of the item")]
    price: Decimal,
    #[arg(long, help = "Received offer to evaluate")]
    offer: Decimal,
    #[arg(long, default_value_t = 0, help = "Days the item has been listed")]
    days: u32,
    #[arg(long, value_parser = parse_season, help = "Item category: summer|winter|spring|fall|allYear")]
    item_type: SeasonType,
    #[arg(long, help = "Calendar month 1-12 (defaults to the current month)")]
    month: Option<u32>,
    #[arg(long, default_value_t = 30, help = "Items currently in storage")]
    storage_current: u32,
    #[arg(long, default_value_t = 50, help = "Maximum storage capacity")]
    storage_max: u32,
    #[command(flatten)]
    tuning: TuningArgs,
    #[arg(long, help = "Emit machine-readable JSON output")]
    json: bool,
}

#[derive(Debug, Args)]
struct CurveArgs {
    #[arg(long, help = "Listed price of the item")]
    price: Decimal,
    #[arg(long, default_value_t = 0, help = "Days the item has been listed")]
    days: u32,
    #[arg(long, value_parser = parse_season, help = "Item category: summer|winter|spring|fall|allYear")]
    item_type: SeasonType,
    #[arg(long, help = "Calendar month 1-12 (defaults to the current month)")]
    month: Option<u32>,
    #[command(flatten)]
    tuning: TuningArgs,
    #[arg(long, help = "Emit machine-readable JSON output")]
    json: bool,
}

/// Advanced knobs mirrored from the engine configuration; flags win over
/// `LISTWISE_*` environment variables and the config file.
#[derive(Debug, Args)]
struct TuningArgs {
    #[arg(long, help = "Path to a listwise.toml config file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Peak season demand multiplier")]
    peak_multiplier: Option<Decimal>,
    #[arg(long, help = "Off-season demand multiplier")]
    off_season_multiplier: Option<Decimal>,
    #[arg(long, help = "Days after which a listing counts as stale")]
    days_listed_threshold: Option<u32>,
    #[arg(long, help = "Storage pressure percent above which urgency is High")]
    high_threshold: Option<u32>,
    #[arg(long, help = "Storage pressure percent above which urgency is Medium")]
    medium_threshold: Option<u32>,
}

impl TuningArgs {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            peak_multiplier: self.peak_multiplier,
            off_season_multiplier: self.off_season_multiplier,
            days_listed_threshold: self.days_listed_threshold,
            high_threshold: self.high_threshold,
            medium_threshold: self.medium_threshold,
            log_level: None,
        }
    }
}

fn parse_season(value: &str) -> Result<SeasonType, String> {
    value.parse()
}

fn current_month() -> u32 {
    chrono::Local::now().month()
}

/// Logging section of the effective configuration for this invocation. A
/// broken config falls back to default logging; the command itself reloads
/// the config and reports the failure through its own error envelope.
fn effective_logging(config_path: Option<PathBuf>) -> LoggingConfig {
    EngineConfig::load(LoadOptions { config_path, ..LoadOptions::default() })
        .map(|config| config.logging)
        .unwrap_or_default()
}

// RUST_LOG wins over the configured level when set.
fn logging_filter(logging: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level))
}

fn init_tracing(logging: &LoggingConfig) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(logging_filter(logging))
        .with_target(false);
    let _ = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

fn config_path(command: &Command) -> Option<PathBuf> {
    match command {
        Command::Advise(args) => args.tuning.config.clone(),
        Command::Curve(args) => args.tuning.config.clone(),
        Command::Config => None,
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&effective_logging(config_path(&cli.command)));

    let result = match cli.command {
        Command::Advise(args) => {
            let input = commands::advise::AdviseInput {
                listed_price: args.price,
                days_listed: args.days,
                received_offer: args.offer,
                item_type: args.item_type,
                month: args.month.unwrap_or_else(current_month),
                storage: StorageState { current: args.storage_current, max: args.storage_max },
            };
            commands::advise::run(
                &input,
                args.tuning.config.clone(),
                args.tuning.overrides(),
                args.json,
            )
        }
        Command::Curve(args) => {
            let input = commands::curve::CurveInput {
                listed_price: args.price,
                days_listed: args.days,
                item_type: args.item_type,
                month: args.month.unwrap_or_else(current_month),
            };
            commands::curve::run(
                &input,
                args.tuning.config.clone(),
                args.tuning.overrides(),
                args.json,
            )
        }
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
