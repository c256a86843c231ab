//! HTTP client for the Messages API.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use reqwest::Client as ReqwestClient;
use tracing::{debug, instrument, warn};

use super::error::ProviderError;
use super::prompts::Prompt;
use super::types::{Message, MessagesRequest, MessagesResponse};
use crate::domain::models::{ProviderConfig, RateLimitConfig};
use crate::infrastructure::logging::SecretScrubber;

/// Thin Messages API client.
///
/// Requests wait for a token from a shared token bucket before they are
/// sent. Failures are classified and returned; nothing is retried.
#[derive(Clone)]
pub struct MessagesClient {
    http_client: ReqwestClient,
    api_key: Option<String>,
    base_url: String,
    model: String,
    api_version: String,
    max_tokens: u32,
    limiter: Arc<DefaultDirectRateLimiter>,
    scrubber: SecretScrubber,
}

impl MessagesClient {
    pub fn new(provider: &ProviderConfig, rate_limit: &RateLimitConfig) -> Result<Self, ProviderError> {
        let http_client = ReqwestClient::builder()
            .timeout(Duration::from_secs(provider.timeout_secs))
            .pool_max_idle_per_host(4)
            .build()
            .map_err(|err| ProviderError::InvalidRequest(format!("failed to build HTTP client: {err}")))?;

        Ok(Self {
            http_client,
            api_key: provider.resolved_api_key(),
            base_url: provider.base_url.trim_end_matches('/').to_string(),
            model: provider.model.clone(),
            api_version: provider.api_version.clone(),
            max_tokens: provider.max_tokens,
            limiter: Arc::new(RateLimiter::direct(quota(rate_limit))),
            scrubber: SecretScrubber::new(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send one prompt and return the concatenated text of the reply.
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    pub async fn send(&self, prompt: &Prompt) -> Result<String, ProviderError> {
        let api_key = self.api_key.as_deref().ok_or(ProviderError::MissingApiKey)?;

        self.limiter.until_ready().await;

        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            system: Some(prompt.system.clone()),
            messages: vec![Message::user(prompt.user.clone())],
            temperature: prompt.temperature,
        };

        debug!(temperature = ?prompt.temperature, "sending messages request");
        let response = self
            .http_client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error response".to_string());
            let body = self.scrubber.scrub_message(&body);
            warn!(status = status.as_u16(), "messages request failed");
            return Err(ProviderError::from_status(status, body));
        }

        let reply: MessagesResponse = response.json().await?;
        if let Some(usage) = reply.usage {
            debug!(
                input_tokens = usage.input_tokens,
                output_tokens = usage.output_tokens,
                stop_reason = ?reply.stop_reason,
                "messages request completed"
            );
        }

        let text = reply.text();
        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse);
        }
        Ok(text)
    }
}

impl std::fmt::Debug for MessagesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessagesClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

/// Token bucket quota for the configured rate. Falls back to one request per
/// second if the configuration slipped past validation.
fn quota(config: &RateLimitConfig) -> Quota {
    let burst = NonZeroU32::new(config.burst_size).unwrap_or(NonZeroU32::MIN);
    let period = if config.requests_per_second.is_finite() && config.requests_per_second > 0.0 {
        Duration::from_secs_f64(1.0 / config.requests_per_second)
    } else {
        Duration::from_secs(1)
    };
    Quota::with_period(period)
        .unwrap_or_else(|| Quota::per_second(NonZeroU32::MIN))
        .allow_burst(burst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quota_uses_burst() {
        let config = RateLimitConfig {
            requests_per_second: 4.0,
            burst_size: 3,
        };
        let quota = quota(&config);
        assert_eq!(quota.burst_size().get(), 3);
        assert_eq!(quota.replenish_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_quota_tolerates_invalid_rate() {
        let config = RateLimitConfig {
            requests_per_second: 0.0,
            burst_size: 0,
        };
        let quota = quota(&config);
        assert_eq!(quota.burst_size().get(), 1);
        assert_eq!(quota.replenish_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_missing_key_is_reported() {
        let provider = ProviderConfig {
            api_key: Some("  ".to_string()),
            ..ProviderConfig::default()
        };
        temp_env::with_var_unset("ANTHROPIC_API_KEY", || {
            let client = MessagesClient::new(&provider, &RateLimitConfig::default()).unwrap();
            assert!(!client.has_api_key());
        });
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let provider = ProviderConfig {
            api_key: Some("k".to_string()),
            base_url: "http://localhost:9/".to_string(),
            ..ProviderConfig::default()
        };
        let client = MessagesClient::new(&provider, &RateLimitConfig::default()).unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }
}
