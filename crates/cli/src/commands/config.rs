use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use listwise_core::{EngineConfig, LoadOptions, LogFormat};
use toml::Value;

pub fn run() -> String {
    let config = match EngineConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];

    let fields: [(&str, String, &[&str]); 9] = [
        (
            "pricing.peak_multiplier",
            config.pricing.peak_multiplier.to_string(),
            &["LISTWISE_PRICING_PEAK_MULTIPLIER"],
        ),
        (
            "pricing.off_season_multiplier",
            config.pricing.off_season_multiplier.to_string(),
            &["LISTWISE_PRICING_OFF_SEASON_MULTIPLIER"],
        ),
        (
            "pricing.days_listed_cap",
            config.pricing.days_listed_cap.to_string(),
            &["LISTWISE_PRICING_DAYS_LISTED_CAP"],
        ),
        (
            "pricing.days_listed_threshold",
            config.pricing.days_listed_threshold.to_string(),
            &["LISTWISE_PRICING_DAYS_LISTED_THRESHOLD"],
        ),
        (
            "pricing.accept_ratio_threshold",
            config.pricing.accept_ratio_threshold.to_string(),
            &["LISTWISE_PRICING_ACCEPT_RATIO_THRESHOLD"],
        ),
        (
            "storage.high_threshold",
            config.storage.high_threshold.to_string(),
            &["LISTWISE_STORAGE_HIGH_THRESHOLD"],
        ),
        (
            "storage.medium_threshold",
            config.storage.medium_threshold.to_string(),
            &["LISTWISE_STORAGE_MEDIUM_THRESHOLD"],
        ),
        (
            "logging.level",
            config.logging.level.clone(),
            &["LISTWISE_LOGGING_LEVEL", "LISTWISE_LOG_LEVEL"],
        ),
        (
            "logging.format",
            log_format_name(config.logging.format).to_string(),
            &["LISTWISE_LOGGING_FORMAT", "LISTWISE_LOG_FORMAT"],
        ),
    ];

    for (field, value, env_keys) in fields {
        let source = field_source(
            field,
            env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(format!("{field} = {value}  [{source}]"));
    }

    lines.join("\n")
}

fn log_format_name(format: LogFormat) -> &'static str {
    match format {
        LogFormat::Compact => "compact",
        LogFormat::Pretty => "pretty",
        LogFormat::Json => "json",
    }
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("listwise.toml"), PathBuf::from("config/listwise.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let raw = fs::read_to_string(path?).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    field: &str,
    env_keys: &[&str],
    doc: Option<&Value>,
    path: Option<&Path>,
) -> String {
    for key in env_keys {
        if env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false) {
            return format!("env:{key}");
        }
    }

    if let (Some(doc), Some(path)) = (doc, path) {
        if doc_has_field(doc, field) {
            return format!("file:{}", path.display());
        }
    }

    "default".to_string()
}

fn doc_has_field(doc: &Value, field: &str) -> bool {
    let mut current = doc;
    for part in field.split('.') {
        match current.get(part) {
            Some(next) => current = next,
            None => return false,
        }
    }
    true
}
