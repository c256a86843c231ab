//! Text analytics and plagiarism lookup port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Source, TextAnalytics};

#[async_trait]
pub trait Analyst: Send + Sync {
    /// Readability grade, dominant tone and word count of `text`.
    async fn analyze(&self, text: &str) -> DomainResult<TextAnalytics>;

    /// Published sources that closely match `text`. Empty when nothing matches.
    async fn find_sources(&self, text: &str) -> DomainResult<Vec<Source>>;
}
