//! Domain errors for the redraft engine.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// External capability a failure or missing handle refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collaborator {
    Detector,
    Transformer,
    Composer,
    Analyst,
    Research,
    Citation,
}

impl Collaborator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Detector => "detector",
            Self::Transformer => "transformer",
            Self::Composer => "composer",
            Self::Analyst => "analyst",
            Self::Research => "research",
            Self::Citation => "citation",
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain-level errors that can occur in the redraft engine.
///
/// Malformed markup is deliberately absent: the codec degrades unmatched
/// markers to literal text instead of failing.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{collaborator} unavailable: {reason}")]
    CollaboratorUnavailable {
        collaborator: Collaborator,
        reason: String,
    },

    #[error("{0} is not configured")]
    NotConfigured(Collaborator),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },

    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("No action selected")]
    NoActionSelected,

    #[error("An action is already being applied")]
    FlowBusy,
}

impl DomainError {
    pub fn unavailable(collaborator: Collaborator, reason: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable {
            collaborator,
            reason: reason.into(),
        }
    }

    pub fn invalid_parameter(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from an external capability rather than
    /// from the caller's input or the flow's state.
    pub fn is_collaborator_failure(&self) -> bool {
        matches!(
            self,
            Self::CollaboratorUnavailable { .. } | Self::NotConfigured(_)
        )
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_message_is_verbatim() {
        let err = DomainError::unavailable(Collaborator::Detector, "quota exceeded");
        assert_eq!(err.to_string(), "detector unavailable: quota exceeded");
        assert!(err.is_collaborator_failure());
    }

    #[test]
    fn test_input_errors_are_not_collaborator_failures() {
        assert!(!DomainError::InvalidInput("empty".into()).is_collaborator_failure());
        assert!(!DomainError::FlowBusy.is_collaborator_failure());
        assert!(DomainError::NotConfigured(Collaborator::Research).is_collaborator_failure());
    }
}
