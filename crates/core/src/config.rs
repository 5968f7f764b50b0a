use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    pub pricing: PricingConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PricingConfig {
    /// Demand multiplier applied in peak months.
    pub peak_multiplier: Decimal,
    /// Demand multiplier applied in low months.
    pub off_season_multiplier: Decimal,
    /// Days after which the listing-age probability boost saturates. Not a
    /// cutoff; the curve is generated for any listing age.
    pub days_listed_cap: u32,
    /// Days after which an unsold listing counts as stale for counter-offer
    /// purposes.
    pub days_listed_threshold: u32,
    /// Minimum offer-to-optimal expected-value ratio for acceptance.
    pub accept_ratio_threshold: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StorageConfig {
    /// Occupancy percent above which pressure is High (strict comparison).
    pub high_threshold: u32,
    /// Occupancy percent above which pressure is Medium (strict comparison).
    pub medium_threshold: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigOverrides {
    pub peak_multiplier: Option<Decimal>,
    pub off_season_multiplier: Option<Decimal>,
    pub days_listed_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub medium_threshold: Option<u32>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("invalid value for `{key}`: `{value}`")]
    InvalidValue { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            peak_multiplier: Decimal::new(13, 1),
            off_season_multiplier: Decimal::new(7, 1),
            days_listed_cap: 30,
            days_listed_threshold: 30,
            accept_ratio_threshold: Decimal::new(9, 1),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { high_threshold: 80, medium_threshold: 60 }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: LogFormat::Compact }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pricing: PricingConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl EngineConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch)?;
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("listwise.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(pricing) = patch.pricing {
            if let Some(value) = pricing.peak_multiplier {
                self.pricing.peak_multiplier = decimal_value("pricing.peak_multiplier", value)?;
            }
            if let Some(value) = pricing.off_season_multiplier {
                self.pricing.off_season_multiplier =
                    decimal_value("pricing.off_season_multiplier", value)?;
            }
            if let Some(value) = pricing.days_listed_cap {
                self.pricing.days_listed_cap = value;
            }
            if let Some(value) = pricing.days_listed_threshold {
                self.pricing.days_listed_threshold = value;
            }
            if let Some(value) = pricing.accept_ratio_threshold {
                self.pricing.accept_ratio_threshold =
                    decimal_value("pricing.accept_ratio_threshold", value)?;
            }
        }

        if let Some(storage) = patch.storage {
            if let Some(value) = storage.high_threshold {
                self.storage.high_threshold = value;
            }
            if let Some(value) = storage.medium_threshold {
                self.storage.medium_threshold = value;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("LISTWISE_PRICING_PEAK_MULTIPLIER") {
            self.pricing.peak_multiplier =
                parse_decimal("LISTWISE_PRICING_PEAK_MULTIPLIER", &value)?;
        }
        if let Some(value) = read_env("LISTWISE_PRICING_OFF_SEASON_MULTIPLIER") {
            self.pricing.off_season_multiplier =
                parse_decimal("LISTWISE_PRICING_OFF_SEASON_MULTIPLIER", &value)?;
        }
        if let Some(value) = read_env("LISTWISE_PRICING_DAYS_LISTED_CAP") {
            self.pricing.days_listed_cap = parse_u32("LISTWISE_PRICING_DAYS_LISTED_CAP", &value)?;
        }
        if let Some(value) = read_env("LISTWISE_PRICING_DAYS_LISTED_THRESHOLD") {
            self.pricing.days_listed_threshold =
                parse_u32("LISTWISE_PRICING_DAYS_LISTED_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("LISTWISE_PRICING_ACCEPT_RATIO_THRESHOLD") {
            self.pricing.accept_ratio_threshold =
                parse_decimal("LISTWISE_PRICING_ACCEPT_RATIO_THRESHOLD", &value)?;
        }

        if let Some(value) = read_env("LISTWISE_STORAGE_HIGH_THRESHOLD") {
            self.storage.high_threshold = parse_u32("LISTWISE_STORAGE_HIGH_THRESHOLD", &value)?;
        }
        if let Some(value) = read_env("LISTWISE_STORAGE_MEDIUM_THRESHOLD") {
            self.storage.medium_threshold = parse_u32("LISTWISE_STORAGE_MEDIUM_THRESHOLD", &value)?;
        }

        let log_level =
            read_env("LISTWISE_LOGGING_LEVEL").or_else(|| read_env("LISTWISE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("LISTWISE_LOGGING_FORMAT").or_else(|| read_env("LISTWISE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(value) = overrides.peak_multiplier {
            self.pricing.peak_multiplier = value;
        }
        if let Some(value) = overrides.off_season_multiplier {
            self.pricing.off_season_multiplier = value;
        }
        if let Some(value) = overrides.days_listed_threshold {
            self.pricing.days_listed_threshold = value;
        }
        if let Some(value) = overrides.high_threshold {
            self.storage.high_threshold = value;
        }
        if let Some(value) = overrides.medium_threshold {
            self.storage.medium_threshold = value;
        }
        if let Some(value) = overrides.log_level {
            self.logging.level = value;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_pricing(&self.pricing)?;
        validate_storage(&self.storage)?;
        validate_logging(&self.logging)?;
        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("listwise.toml"), PathBuf::from("config/listwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_pricing(pricing: &PricingConfig) -> Result<(), ConfigError> {
    if pricing.peak_multiplier < Decimal::ONE {
        return Err(ConfigError::Validation(
            "pricing.peak_multiplier must be at least 1".to_string(),
        ));
    }

    if pricing.off_season_multiplier <= Decimal::ZERO
        || pricing.off_season_multiplier > Decimal::ONE
    {
        return Err(ConfigError::Validation(
            "pricing.off_season_multiplier must be in range (0, 1]".to_string(),
        ));
    }

    if pricing.days_listed_cap == 0 {
        return Err(ConfigError::Validation(
            "pricing.days_listed_cap must be greater than zero".to_string(),
        ));
    }

    if pricing.days_listed_threshold == 0 {
        return Err(ConfigError::Validation(
            "pricing.days_listed_threshold must be greater than zero".to_string(),
        ));
    }

    if pricing.accept_ratio_threshold <= Decimal::ZERO
        || pricing.accept_ratio_threshold > Decimal::ONE
    {
        return Err(ConfigError::Validation(
            "pricing.accept_ratio_threshold must be in range (0, 1]".to_string(),
        ));
    }

    Ok(())
}

fn validate_storage(storage: &StorageConfig) -> Result<(), ConfigError> {
    if storage.high_threshold > 100 || storage.medium_threshold > 100 {
        return Err(ConfigError::Validation(
            "storage thresholds are percentages and must not exceed 100".to_string(),
        ));
    }

    if storage.medium_threshold > storage.high_threshold {
        return Err(ConfigError::Validation(
            "storage.medium_threshold must not exceed storage.high_threshold".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    value.trim().parse::<Decimal>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

// TOML numbers arrive as f64; round-tripping through the shortest display
// form keeps `1.3` as the exact decimal 1.3.
fn decimal_value(key: &str, value: f64) -> Result<Decimal, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::InvalidValue { key: key.to_string(), value: value.to_string() });
    }
    value.to_string().parse::<Decimal>().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    pricing: Option<PricingPatch>,
    storage: Option<StoragePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct PricingPatch {
    peak_multiplier: Option<f64>,
    off_season_multiplier: Option<f64>,
    days_listed_cap: Option<u32>,
    days_listed_threshold: Option<u32>,
    accept_ratio_threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct StoragePatch {
    high_threshold: Option<u32>,
    medium_threshold: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
