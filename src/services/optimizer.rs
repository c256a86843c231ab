//! Score-driven humanizer loop.
//!
//! Each attempt rewrites the *original* text at some intensity, decodes the
//! markup and asks the detector to score the resulting plain text. The first
//! attempt uses the caller's intensity; further attempts escalate it until a
//! candidate scores under the threshold or the escalation budget runs out.
//! The best candidate seen is returned either way.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AttemptRecord, ESCALATION_STEP, Intensity, MAX_ESCALATIONS, MarkupSpan, OptimizationResult,
    OptimizerConfig, RewriteStyle, Tone,
};
use crate::domain::ports::{Detector, Transformer};
use crate::services::markup_codec::MarkupCodec;

/// Drives a transformer and a detector towards a human-sounding rewrite.
#[derive(Clone)]
pub struct Optimizer {
    transformer: Arc<dyn Transformer>,
    detector: Arc<dyn Detector>,
    config: OptimizerConfig,
}

struct Candidate {
    markup: Vec<MarkupSpan>,
    raw: String,
    score: f64,
}

impl Optimizer {
    /// Escalations beyond [`MAX_ESCALATIONS`] are clamped.
    pub fn new(
        transformer: Arc<dyn Transformer>,
        detector: Arc<dyn Detector>,
        mut config: OptimizerConfig,
    ) -> Self {
        if config.max_escalations > MAX_ESCALATIONS {
            warn!(
                requested = config.max_escalations,
                limit = MAX_ESCALATIONS,
                "clamping humanize escalation budget"
            );
            config.max_escalations = MAX_ESCALATIONS;
        }
        Self {
            transformer,
            detector,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Rewrite `text` in `tone` until it scores below the threshold.
    ///
    /// Makes between 2 and `2 * (1 + max_escalations)` external calls (8 at
    /// most), all strictly sequential. Any collaborator failure aborts the run and is
    /// returned unchanged.
    #[instrument(skip(self, text), fields(tone = %tone, start = %intensity))]
    pub async fn humanize(
        &self,
        text: &str,
        tone: Tone,
        intensity: Intensity,
    ) -> DomainResult<OptimizationResult> {
        let threshold = self.config.score_threshold;
        let mut attempts = Vec::new();

        let mut best = self.attempt(text, tone, intensity).await?;
        attempts.push(AttemptRecord {
            attempt: 1,
            intensity,
            score: best.score,
        });
        info!(attempt = 1, intensity = intensity.value(), score = best.score, "humanize attempt scored");

        let mut current = intensity;
        for escalation in 1..=self.config.max_escalations {
            if best.score < threshold {
                break;
            }
            current = current.escalate(ESCALATION_STEP);
            let candidate = self.attempt(text, tone, current).await?;
            let attempt = escalation + 1;
            info!(
                attempt,
                intensity = current.value(),
                score = candidate.score,
                "humanize attempt scored"
            );
            attempts.push(AttemptRecord {
                attempt,
                intensity: current,
                score: candidate.score,
            });
            if candidate.score < best.score {
                best = candidate;
            }
        }

        let attempts_used = u32::try_from(attempts.len()).unwrap_or(u32::MAX);
        debug!(
            attempts_used,
            best_score = best.score,
            reached = best.score < threshold,
            "humanize finished"
        );

        Ok(OptimizationResult {
            markup: best.markup,
            raw_markup: best.raw,
            score: best.score,
            attempts_used,
            attempts,
        })
    }

    async fn attempt(&self, text: &str, tone: Tone, intensity: Intensity) -> DomainResult<Candidate> {
        let raw = self
            .transformer
            .rewrite(text, RewriteStyle::Humanize(tone), intensity)
            .await?;
        let markup = MarkupCodec::decode(&raw);
        let plain = MarkupCodec::plain_text(&markup);
        let report = self.detector.score(&plain).await?;
        Ok(Candidate {
            markup,
            raw,
            score: report.score(),
        })
    }
}

impl std::fmt::Debug for Optimizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Optimizer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
