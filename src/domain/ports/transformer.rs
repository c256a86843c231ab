//! Text rewriting port.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{Intensity, RewriteStyle};

/// Rewrites text and reports the edits as inline markup.
///
/// The returned string wraps each removed fragment in `~~…~~` immediately
/// followed by its replacement in `**…**`; everything else is kept verbatim.
#[async_trait]
pub trait Transformer: Send + Sync {
    /// Rewrite `text` in `style`. `intensity` is a hint of how aggressive the
    /// rewrite should be; implementations are free to interpret it loosely.
    async fn rewrite(
        &self,
        text: &str,
        style: RewriteStyle,
        intensity: Intensity,
    ) -> DomainResult<String>;
}
