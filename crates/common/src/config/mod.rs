//! Configuration management for citenet
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Graph construction and ranking configuration
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Number of candidates kept per role when the option is `top`
    #[serde(default = "default_top_limit")]
    pub top_limit: usize,

    /// Multiplier applied to a candidate's own citation count
    #[serde(default = "default_citation_weight")]
    pub citation_weight: f64,

    /// Points per direct connection to a seed paper
    #[serde(default = "default_connection_weight")]
    pub connection_weight: f64,

    /// A paper at most this many years old earns the recency bonus
    #[serde(default = "default_recency_window")]
    pub recency_window_years: i32,

    /// Bonus for recent papers
    #[serde(default = "default_recency_bonus")]
    pub recency_bonus: f64,

    /// Bonus for venues whose name mentions "journal"
    #[serde(default = "default_journal_bonus")]
    pub journal_bonus: f64,

    /// Maximum characters of the title shown in a node label
    #[serde(default = "default_label_max_chars")]
    pub label_max_chars: usize,

    /// Pin the scoring year (defaults to the current UTC year)
    pub reference_year: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilityConfig {
    /// Log level (debug, info, warn, error) or a full filter directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_top_limit() -> usize { 20 }
fn default_citation_weight() -> f64 { 1.0 }
fn default_connection_weight() -> f64 { 10.0 }
fn default_recency_window() -> i32 { 5 }
fn default_recency_bonus() -> f64 { 2.0 }
fn default_journal_bonus() -> f64 { 1.0 }
fn default_label_max_chars() -> usize { 25 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { false }
fn default_service_name() -> String { "citenet".to_string() }

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_limit: default_top_limit(),
            citation_weight: default_citation_weight(),
            connection_weight: default_connection_weight(),
            recency_window_years: default_recency_window(),
            recency_bonus: default_recency_bonus(),
            journal_bonus: default_journal_bonus(),
            label_max_chars: default_label_max_chars(),
            reference_year: None,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))

            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))

            // Load local overrides
            .add_source(File::with_name("config/local").required(false))

            // Load from environment variables with APP__ prefix
            // e.g., APP__ANALYSIS__TOP_LIMIT=50
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )

            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific configuration file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true)
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            analysis: AnalysisConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analysis.top_limit, 20);
        assert_eq!(config.analysis.connection_weight, 10.0);
        assert_eq!(config.analysis.recency_window_years, 5);
        assert_eq!(config.observability.service_name, "citenet");
        assert!(config.analysis.reference_year.is_none());
    }

    #[test]
    fn test_from_file_fills_missing_fields() {
        let path = std::env::temp_dir().join(format!("citenet-config-{}.toml", std::process::id()));
        std::fs::write(
            &path,
            "[analysis]\ntop_limit = 5\nreference_year = 2024\n",
        )
        .unwrap();

        let config = AppConfig::from_file(path.to_str().unwrap()).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.analysis.top_limit, 5);
        assert_eq!(config.analysis.reference_year, Some(2024));
        assert_eq!(config.analysis.label_max_chars, 25);
        assert_eq!(config.observability.log_level, "info");
    }
}
