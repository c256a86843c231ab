//! Web research port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::ResearchReport;

#[async_trait]
pub trait ResearchProvider: Send + Sync {
    /// Summarize what is known about `topic` along with the sources used.
    async fn lookup(&self, topic: &str) -> DomainResult<ResearchReport>;
}
