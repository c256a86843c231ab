use serde::{Deserialize, Serialize};

/// Main configuration structure for redraft
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// LLM provider connection
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Outbound request throttling
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Humanizer loop tuning
    #[serde(default)]
    pub optimizer: OptimizerConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Directory for rolling log files; stderr only when unset
    #[serde(default)]
    pub log_dir: Option<String>,

    /// File rotation: daily, hourly or never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            log_dir: None,
            rotation: default_rotation(),
        }
    }
}

/// Messages API provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProviderConfig {
    /// API key; falls back to `ANTHROPIC_API_KEY` when unset
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Messages API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request
    #[serde(default = "default_model")]
    pub model: String,

    /// Value of the `anthropic-version` header
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on generated tokens per request
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_model() -> String {
    "claude-sonnet-4-5".to_string()
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_max_tokens() -> u32 {
    4096
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            api_version: default_api_version(),
            timeout_secs: default_timeout_secs(),
            max_tokens: default_max_tokens(),
        }
    }
}

impl ProviderConfig {
    /// Configured key, or the `ANTHROPIC_API_KEY` environment variable.
    pub fn resolved_api_key(&self) -> Option<String> {
        let usable = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(usable)
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok().filter(usable))
    }
}

/// Rate limiting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct RateLimitConfig {
    /// Requests per second allowed
    #[serde(default = "default_requests_per_second")]
    pub requests_per_second: f64,

    /// Burst size for token bucket
    #[serde(default = "default_burst_size")]
    pub burst_size: u32,
}

const fn default_requests_per_second() -> f64 {
    2.0
}

const fn default_burst_size() -> u32 {
    4
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            requests_per_second: default_requests_per_second(),
            burst_size: default_burst_size(),
        }
    }
}

/// Humanizer loop tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct OptimizerConfig {
    /// A candidate scoring strictly below this is accepted
    #[serde(default = "default_score_threshold")]
    pub score_threshold: f64,

    /// Extra attempts after the first one, at most [`MAX_ESCALATIONS`]
    #[serde(default = "default_max_escalations")]
    pub max_escalations: u32,
}

/// Largest accepted `max_escalations`. Bounds a humanize run to 8 external calls.
pub const MAX_ESCALATIONS: u32 = 3;

/// Intensity added per escalation, saturating at 100.
pub const ESCALATION_STEP: u8 = 25;

const fn default_score_threshold() -> f64 {
    30.0
}

const fn default_max_escalations() -> u32 {
    3
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            score_threshold: default_score_threshold(),
            max_escalations: default_max_escalations(),
        }
    }
}

impl OptimizerConfig {
    /// Describe the first problem with these settings, if any.
    pub fn problem(&self) -> Option<String> {
        if !(self.score_threshold > 0.0 && self.score_threshold <= 100.0) {
            return Some(format!(
                "score_threshold {} must be within (0, 100]",
                self.score_threshold
            ));
        }
        if self.max_escalations > MAX_ESCALATIONS {
            return Some(format!(
                "max_escalations {} exceeds {MAX_ESCALATIONS}",
                self.max_escalations
            ));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_defaults() {
        let config = OptimizerConfig::default();
        assert!((config.score_threshold - 30.0).abs() < f64::EPSILON);
        assert_eq!(config.max_escalations, 3);
        assert!(config.problem().is_none());
    }

    #[test]
    fn test_optimizer_problems() {
        let zero_threshold = OptimizerConfig {
            score_threshold: 0.0,
            ..OptimizerConfig::default()
        };
        assert!(zero_threshold.problem().is_some());

        let nan_threshold = OptimizerConfig {
            score_threshold: f64::NAN,
            ..OptimizerConfig::default()
        };
        assert!(nan_threshold.problem().is_some());

        let no_escalation = OptimizerConfig {
            max_escalations: 0,
            ..OptimizerConfig::default()
        };
        assert!(no_escalation.problem().is_none());

        let too_many = OptimizerConfig {
            max_escalations: MAX_ESCALATIONS + 1,
            ..OptimizerConfig::default()
        };
        assert!(too_many.problem().is_some());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "provider:\n  model: custom-model\n";
        let config: Config = serde_yaml::from_str(yaml).expect("YAML should parse");
        assert_eq!(config.provider.model, "custom-model");
        assert_eq!(config.provider.api_version, "2023-06-01");
        assert_eq!(config.optimizer.max_escalations, 3);
        assert_eq!(config.logging.level, "warn");
    }
}
