//! Summarizing and continuation port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::SummaryFormat;

/// Produces new prose from a text, returned as plain text without markup.
#[async_trait]
pub trait Composer: Send + Sync {
    /// Summarize `text` in roughly `word_count` words.
    async fn summarize(
        &self,
        text: &str,
        format: SummaryFormat,
        word_count: u32,
    ) -> DomainResult<String>;

    /// Write one or two paragraphs that continue `text`. Only the new
    /// paragraphs are returned.
    async fn complete(&self, text: &str) -> DomainResult<String>;
}
