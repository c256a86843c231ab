use anyhow::{Context, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use std::path::Path;
use thiserror::Error;

use crate::domain::models::config::Config;

/// Project directory holding configuration files.
pub const CONFIG_DIR: &str = ".redraft";

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Invalid log rotation: {0}. Must be one of: daily, hourly, never")]
    InvalidRotation(String),

    #[error("Invalid burst_size: {0}. Must be at least 1")]
    InvalidBurstSize(u32),

    #[error("Provider model cannot be empty")]
    EmptyModel,

    #[error("Provider base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Provider timeout_secs must be at least 1")]
    ZeroTimeout,

    #[error("Provider max_tokens must be at least 1")]
    ZeroMaxTokens,

    #[error("Invalid optimizer settings: {0}")]
    InvalidOptimizer(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging from the working directory
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .redraft/config.yaml (project config)
    /// 3. .redraft/local.yaml (local overrides, optional)
    /// 4. Environment variables (REDRAFT_* prefix, `__` separates nesting)
    pub fn load() -> Result<Config> {
        Self::load_from_dir(".")
    }

    /// Same as [`ConfigLoader::load`] with the project rooted at `root`.
    pub fn load_from_dir(root: impl AsRef<Path>) -> Result<Config> {
        let dir = root.as_ref().join(CONFIG_DIR);
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(dir.join("config.yaml")))
            .merge(Yaml::file(dir.join("local.yaml")))
            .merge(Env::prefixed("REDRAFT_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file merged over the defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        // Logging
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&config.logging.rotation.to_lowercase().as_str()) {
            return Err(ConfigError::InvalidRotation(config.logging.rotation.clone()));
        }

        // Rate limit
        if config.rate_limit.requests_per_second.is_nan()
            || config.rate_limit.requests_per_second <= 0.0
        {
            return Err(ConfigError::InvalidRateLimit(
                config.rate_limit.requests_per_second,
            ));
        }

        if config.rate_limit.burst_size == 0 {
            return Err(ConfigError::InvalidBurstSize(config.rate_limit.burst_size));
        }

        // Provider
        if config.provider.model.trim().is_empty() {
            return Err(ConfigError::EmptyModel);
        }
        if config.provider.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }
        if config.provider.timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if config.provider.max_tokens == 0 {
            return Err(ConfigError::ZeroMaxTokens);
        }

        // Optimizer
        if let Some(problem) = config.optimizer.problem() {
            return Err(ConfigError::InvalidOptimizer(problem));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!((config.rate_limit.requests_per_second - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.provider.base_url, "https://api.anthropic.com");
        assert_eq!(config.logging.level, "warn");
        ConfigLoader::validate(&config).expect("Default config should be valid");
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r"
rate_limit:
  requests_per_second: 5.0
  burst_size: 8
provider:
  model: claude-test
  timeout_secs: 30
logging:
  level: debug
  format: json
optimizer:
  score_threshold: 20.0
  max_escalations: 2
";

        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");

        assert!((config.rate_limit.requests_per_second - 5.0).abs() < f64::EPSILON);
        assert_eq!(config.rate_limit.burst_size, 8);
        assert_eq!(config.provider.model, "claude-test");
        assert_eq!(config.provider.timeout_secs, 30);
        assert_eq!(config.logging.format, "json");
        assert_eq!(config.optimizer.max_escalations, 2);

        ConfigLoader::validate(&config).expect("Parsed config should be valid");
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = Config::default();
        config.logging.level = "invalid".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogLevel(level)) => assert_eq!(level, "invalid"),
            other => panic!("Expected InvalidLogLevel error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();

        match ConfigLoader::validate(&config) {
            Err(ConfigError::InvalidLogFormat(format)) => assert_eq!(format, "xml"),
            other => panic!("Expected InvalidLogFormat error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rate_limit() {
        let mut config = Config::default();
        config.rate_limit.requests_per_second = 0.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidRateLimit(_))
        ));

        let mut config = Config::default();
        config.rate_limit.burst_size = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBurstSize(0))
        ));
    }

    #[test]
    fn test_validate_provider() {
        let mut config = Config::default();
        config.provider.model = "  ".to_string();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyModel)));

        let mut config = Config::default();
        config.provider.base_url = String::new();
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::EmptyBaseUrl)));

        let mut config = Config::default();
        config.provider.timeout_secs = 0;
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::ZeroTimeout)));

        let mut config = Config::default();
        config.provider.max_tokens = 0;
        assert!(matches!(ConfigLoader::validate(&config), Err(ConfigError::ZeroMaxTokens)));
    }

    #[test]
    fn test_validate_optimizer() {
        let mut config = Config::default();
        config.optimizer.score_threshold = 120.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidOptimizer(_))
        ));

        let mut config = Config::default();
        config.optimizer.max_escalations = 10;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidOptimizer(_))
        ));
    }

    #[test]
    fn test_load_from_file_rejects_invalid_values() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "optimizer:\n  max_escalations: 7").unwrap();
        file.flush().unwrap();

        let err = ConfigLoader::load_from_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("max_escalations"));
    }

    #[test]
    fn test_hierarchical_merging() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.yaml"),
            "provider:\n  model: base-model\n  max_tokens: 1000\nlogging:\n  level: info\n",
        )
        .unwrap();
        fs::write(dir.join("local.yaml"), "provider:\n  model: local-model\n").unwrap();

        temp_env::with_vars(
            [
                ("REDRAFT_LOGGING__LEVEL", Some("debug")),
                ("REDRAFT_RATE_LIMIT__BURST_SIZE", Some("9")),
            ],
            || {
                let config = ConfigLoader::load_from_dir(root.path()).unwrap();
                assert_eq!(config.provider.model, "local-model", "local.yaml should win");
                assert_eq!(config.provider.max_tokens, 1000, "base value should persist");
                assert_eq!(config.logging.level, "debug", "env should win");
                assert_eq!(config.rate_limit.burst_size, 9);
            },
        );
    }

    #[test]
    fn test_missing_files_fall_back_to_defaults() {
        let root = TempDir::new().unwrap();
        let config = ConfigLoader::load_from_dir(root.path()).unwrap();
        assert_eq!(config.optimizer.max_escalations, 3);
        assert_eq!(config.provider.api_version, "2023-06-01");
    }
}
