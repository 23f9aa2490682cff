//! Intcode Configuration Module
//!
//! This module provides the constants and settings types shared by the
//! Intcode virtual machine and its command-line runner.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest number of parameters any instruction consumes
pub const MAX_PARAMETERS: usize = 3;

/// Width of the opcode field in a raw instruction word (two decimal digits)
pub const OPCODE_MODULUS: i64 = 100;

/// Default log filter used when neither `RUST_LOG` nor a config file sets one
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Log verbosity levels accepted in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Gets the filter directive understood by `EnvFilter`
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            _ => Err(format!("Unknown log level: {}", s)),
        }
    }
}

/// Execution bounds applied to a single engine.
///
/// Both limits are off by default: an unbounded engine grows memory on demand
/// and runs until it halts, however long that takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExecutionSettings {
    /// Maximum number of instructions an engine may execute over its lifetime
    pub max_steps: Option<u64>,
    /// Maximum number of memory cells an engine may grow to
    pub max_memory_size: Option<usize>,
}

impl ExecutionSettings {
    /// Settings with no bounds at all
    pub const UNBOUNDED: Self = Self {
        max_steps: None,
        max_memory_size: None,
    };

    /// Returns true if neither bound is set
    pub fn is_unbounded(&self) -> bool {
        self.max_steps.is_none() && self.max_memory_size.is_none()
    }
}

/// Logger configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggerSettings {
    pub level: LogLevel,
}

/// Root of the runner configuration file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RunnerConfig {
    pub execution: ExecutionSettings,
    pub logger: LoggerSettings,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_unbounded() {
        let settings = ExecutionSettings::default();
        assert!(settings.is_unbounded());
        assert_eq!(settings, ExecutionSettings::UNBOUNDED);
    }

    #[test]
    fn test_log_level_round_trip_through_str() {
        for level in [
            LogLevel::Error,
            LogLevel::Warn,
            LogLevel::Info,
            LogLevel::Debug,
            LogLevel::Trace,
        ] {
            assert_eq!(level.to_string().parse::<LogLevel>(), Ok(level));
        }
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(LogLevel::default().as_str(), DEFAULT_LOG_LEVEL);
        assert!("loud".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_runner_config_from_toml() {
        let config: RunnerConfig = toml::from_str(
            r#"
            [execution]
            max_steps = 1000

            [logger]
            level = "debug"
            "#,
        )
        .expect("config should parse");

        assert_eq!(config.execution.max_steps, Some(1000));
        assert_eq!(config.execution.max_memory_size, None);
        assert_eq!(config.logger.level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RunnerConfig = toml::from_str("").expect("empty config should parse");
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_settings_serialize_to_json() {
        let settings = ExecutionSettings {
            max_steps: Some(5),
            max_memory_size: None,
        };
        let json = serde_json::to_value(settings).expect("settings should serialize");
        assert_eq!(json["max_steps"], 5);
        assert!(json["max_memory_size"].is_null());
    }
}
