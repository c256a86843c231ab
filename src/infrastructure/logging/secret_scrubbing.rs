use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

struct Patterns {
    api_key: Regex,
    token: Regex,
    bearer: Regex,
}

static PATTERNS: LazyLock<Option<Patterns>> = LazyLock::new(|| {
    Some(Patterns {
        // Anthropic API keys: sk-ant-api03-...
        api_key: Regex::new(r"sk-ant-[a-zA-Z0-9_-]{10,}").ok()?,
        // api_key / token / secret fields in JSON or key=value form
        token: Regex::new(
            r#"["']?(?:api_key|apikey|x-api-key|token|secret)["']?\s*[:=]\s*["']?([a-zA-Z0-9_.-]{12,})["']?"#,
        )
        .ok()?,
        // Bearer tokens in Authorization headers
        bearer: Regex::new(r"Bearer\s+[a-zA-Z0-9_.-]+").ok()?,
    })
});

/// Redacts credentials from provider error bodies and log messages
#[derive(Clone, Default)]
pub struct SecretScrubber;

impl SecretScrubber {
    pub fn new() -> Self {
        Self
    }

    /// Scrub a message of sensitive data
    pub fn scrub_message(&self, message: &str) -> String {
        let Some(patterns) = PATTERNS.as_ref() else {
            return message.to_string();
        };
        let scrubbed = patterns.api_key.replace_all(message, "[API_KEY_REDACTED]");
        let scrubbed = patterns
            .bearer
            .replace_all(&scrubbed, "Bearer [TOKEN_REDACTED]")
            .into_owned();
        patterns
            .token
            .replace_all(&scrubbed, |caps: &regex::Captures| {
                let full_match = &caps[0];
                match full_match.find([':', '=']) {
                    Some(pos) => format!("{}{}[REDACTED]", &full_match[..pos], &full_match[pos..=pos]),
                    None => "[REDACTED]".to_string(),
                }
            })
            .into_owned()
    }
}

impl fmt::Debug for SecretScrubber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretScrubber").finish()
    }
}
