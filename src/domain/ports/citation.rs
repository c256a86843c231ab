//! Citation formatting port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::CitationStyle;

#[async_trait]
pub trait CitationProvider: Send + Sync {
    /// Format `source` (a URL, title or free description) as a reference
    /// entry in `style`.
    async fn format(&self, style: CitationStyle, source: &str) -> DomainResult<String>;
}
