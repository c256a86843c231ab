use thiserror::Error;

use crate::domain::errors::{Collaborator, DomainError};

/// Errors that can occur when talking to the Messages API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key in configuration or environment
    #[error("No API key configured (set provider.api_key or ANTHROPIC_API_KEY)")]
    MissingApiKey,

    /// Invalid request parameters or malformed request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed due to invalid or missing API key
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Provider-side rate limit hit
    #[error("Rate limit exceeded")]
    RateLimited,

    /// API server encountered an internal error
    #[error("API server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// API server is overloaded
    #[error("API server overloaded")]
    Overloaded,

    /// Request timed out waiting for response
    #[error("Timeout waiting for response")]
    Timeout,

    /// Transport failure
    #[error("Network error: {0}")]
    Network(String),

    /// The reply could not be interpreted
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The reply contained no text
    #[error("Empty response from provider")]
    EmptyResponse,

    /// Unknown error occurred
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ProviderError {
    /// Map an HTTP status code and response body to an error variant.
    ///
    /// - 400: Invalid request
    /// - 401, 403: Authentication failed
    /// - 429: Rate limited
    /// - 529: Overloaded
    /// - other 5xx: Server error
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            429 => Self::RateLimited,
            529 => Self::Overloaded,
            code @ 500..=599 => Self::ServerError { status: code, body },
            _ => Self::Unknown(format!("HTTP {status}: {body}")),
        }
    }

    /// Returns true if the error is an authentication problem the user must fix.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::MissingApiKey | Self::AuthenticationFailed(_))
    }

    /// Convert into the domain error for the port that made the call.
    pub fn into_domain(self, collaborator: Collaborator) -> DomainError {
        DomainError::unavailable(collaborator, self.to_string())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_from_status_auth() {
        assert!(matches!(
            ProviderError::from_status(StatusCode::UNAUTHORIZED, "bad key".into()),
            ProviderError::AuthenticationFailed(_)
        ));
        assert!(ProviderError::from_status(StatusCode::FORBIDDEN, String::new()).is_auth());
    }

    #[test]
    fn test_from_status_rate_limit() {
        assert!(matches!(
            ProviderError::from_status(StatusCode::TOO_MANY_REQUESTS, String::new()),
            ProviderError::RateLimited
        ));
    }

    #[test]
    fn test_from_status_server_errors() {
        assert!(matches!(
            ProviderError::from_status(StatusCode::BAD_GATEWAY, "down".into()),
            ProviderError::ServerError { status: 502, .. }
        ));
        let overloaded = StatusCode::from_u16(529).unwrap();
        assert!(matches!(
            ProviderError::from_status(overloaded, String::new()),
            ProviderError::Overloaded
        ));
    }

    #[test]
    fn test_into_domain_names_the_port() {
        let err = ProviderError::RateLimited.into_domain(Collaborator::Detector);
        assert_eq!(err.to_string(), "detector unavailable: Rate limit exceeded");
    }
}
