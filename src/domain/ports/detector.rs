//! Machine-likeness scoring port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::DetectionReport;

/// Scores how likely a text is to be machine-generated.
#[async_trait]
pub trait Detector: Send + Sync {
    /// Score `text`. The returned score is already clamped to `[0, 100]`,
    /// lower meaning more human.
    async fn score(&self, text: &str) -> DomainResult<DetectionReport>;
}
