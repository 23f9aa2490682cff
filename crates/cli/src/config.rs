//! Configuration loading for the Intcode CLI
//!
//! Settings come from an optional TOML file; command-line flags override
//! whatever the file sets.

use anyhow::{Context, Result};
use intcode_config::{ExecutionSettings, RunnerConfig};
use std::fs;
use std::path::Path;

/// Loads the runner configuration, or the defaults if no file is given.
pub fn load_config(path: Option<&Path>) -> Result<RunnerConfig> {
    let Some(path) = path else {
        return Ok(RunnerConfig::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    toml::from_str(&text)
        .with_context(|| format!("failed to parse config file {}", path.display()))
}

/// Applies a `--max-steps` override to the configured execution settings.
pub fn execution_settings(config: &RunnerConfig, max_steps: Option<u64>) -> ExecutionSettings {
    ExecutionSettings {
        max_steps: max_steps.or(config.execution.max_steps),
        ..config.execution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use intcode_config::LogLevel;
    use std::io::Write;

    #[test]
    fn test_no_path_gives_defaults() {
        let config = load_config(None).expect("defaults");
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "[execution]\nmax_steps = 50\nmax_memory_size = 4096\n\n[logger]\nlevel = \"trace\""
        )
        .expect("write config");

        let config = load_config(Some(file.path())).expect("config should load");
        assert_eq!(config.execution.max_steps, Some(50));
        assert_eq!(config.execution.max_memory_size, Some(4096));
        assert_eq!(config.logger.level, LogLevel::Trace);
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_config(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_max_steps_flag_overrides_file() {
        let mut config = RunnerConfig::default();
        config.execution.max_steps = Some(10);
        config.execution.max_memory_size = Some(64);

        let settings = execution_settings(&config, Some(99));
        assert_eq!(settings.max_steps, Some(99));
        assert_eq!(settings.max_memory_size, Some(64));

        assert_eq!(execution_settings(&config, None).max_steps, Some(10));
    }
}
