//! Application Configuration Module
//!
//! This module centralizes the configuration for the coach service.
//! It loads settings from environment variables and provides a single
//! struct that the replay and the summary controller are built from.

use coach_core::SummaryLimits;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

// --- Application Constants ---

/// Where prompt overrides are looked up when `COACH_PROMPTS_DIR` is unset.
pub const DEFAULT_PROMPTS_DIR: &str = "prompts";
/// Capacity of the outbound request channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 16;

/// Holds all configuration loaded from the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prompts_dir: PathBuf,
    pub limits: SummaryLimits,
    pub max_malformed_events: Option<usize>,
    pub channel_capacity: usize,
    pub log_level: Level,
}

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
    #[error("Invalid log level provided for RUST_LOG: {0}")]
    InvalidLogLevel(String),
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    // *   `COACH_PROMPTS_DIR`: (Optional) Directory of `.md` prompt overrides. Defaults to "prompts".
    // *   `COACH_MIN_SECTION_ITEMS`: (Optional) Bullets each list section needs. Defaults to 2.
    // *   `COACH_PROGRESS_LONGER_THAN`: (Optional) Characters the progress text must exceed. Defaults to 20.
    // *   `COACH_MAX_MALFORMED_EVENTS`: (Optional) Unreadable events tolerated per snapshot. Unbounded if unset.
    // *   `COACH_CHANNEL_CAPACITY`: (Optional) Outbound request channel capacity. Defaults to 16.
    // *   `RUST_LOG`: (Optional) The logging level. Defaults to "INFO". Can be "TRACE", "DEBUG", "INFO", "WARN", or "ERROR".
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file. This is useful for local development and is ignored if not present.
        dotenvy::dotenv().ok();
        Self::from_vars(|name| env::var(name).ok())
    }

    /// Builds the configuration from any variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prompts_dir = lookup("COACH_PROMPTS_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PROMPTS_DIR));

        let defaults = SummaryLimits::default();
        let limits = SummaryLimits {
            min_section_items: parse_var(&lookup, "COACH_MIN_SECTION_ITEMS")?
                .unwrap_or(defaults.min_section_items),
            progress_longer_than: parse_var(&lookup, "COACH_PROGRESS_LONGER_THAN")?
                .unwrap_or(defaults.progress_longer_than),
        };

        let max_malformed_events = parse_var(&lookup, "COACH_MAX_MALFORMED_EVENTS")?;

        let channel_capacity = match parse_var::<usize, _>(&lookup, "COACH_CHANNEL_CAPACITY")? {
            // tokio channels panic on a zero capacity.
            Some(0) => {
                return Err(ConfigError::InvalidValue {
                    name: "COACH_CHANNEL_CAPACITY".to_string(),
                    value: "0".to_string(),
                });
            }
            Some(capacity) => capacity,
            None => DEFAULT_CHANNEL_CAPACITY,
        };

        // Configure logging level from RUST_LOG, with a sensible default.
        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str
            .parse::<Level>()
            .map_err(|_| ConfigError::InvalidLogLevel(log_level_str))?;

        Ok(Self {
            prompts_dir,
            limits,
            max_malformed_events,
            channel_capacity,
            log_level,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.prompts_dir, PathBuf::from("prompts"));
        assert_eq!(config.limits, SummaryLimits::default());
        assert_eq!(config.max_malformed_events, None);
        assert_eq!(config.channel_capacity, 16);
        assert_eq!(config.log_level, Level::INFO);
    }

    #[test]
    fn test_every_variable_is_read() {
        let config = config_from(&[
            ("COACH_PROMPTS_DIR", "/etc/coach/prompts"),
            ("COACH_MIN_SECTION_ITEMS", "3"),
            ("COACH_PROGRESS_LONGER_THAN", " 40 "),
            ("COACH_MAX_MALFORMED_EVENTS", "5"),
            ("COACH_CHANNEL_CAPACITY", "4"),
            ("RUST_LOG", "debug"),
        ])
        .unwrap();

        assert_eq!(config.prompts_dir, PathBuf::from("/etc/coach/prompts"));
        assert_eq!(
            config.limits,
            SummaryLimits {
                min_section_items: 3,
                progress_longer_than: 40,
            }
        );
        assert_eq!(config.max_malformed_events, Some(5));
        assert_eq!(config.channel_capacity, 4);
        assert_eq!(config.log_level, Level::DEBUG);
    }

    #[test]
    fn test_bad_numbers_are_rejected_with_the_variable_name() {
        let err = config_from(&[("COACH_MIN_SECTION_ITEMS", "two")]).unwrap_err();

        assert_eq!(err.to_string(), "Invalid value for COACH_MIN_SECTION_ITEMS: two");
    }

    #[test]
    fn test_zero_channel_capacity_is_rejected() {
        assert!(matches!(
            config_from(&[("COACH_CHANNEL_CAPACITY", "0")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_unknown_log_level_is_rejected() {
        assert!(matches!(
            config_from(&[("RUST_LOG", "chatty")]),
            Err(ConfigError::InvalidLogLevel(level)) if level == "chatty"
        ));
    }
}
