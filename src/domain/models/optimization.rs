//! Optimizer result types.

use serde::{Deserialize, Serialize};

use super::markup::MarkupSpan;
use super::style::Intensity;

/// One rewrite-and-score round trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// 1-based attempt number.
    pub attempt: u32,
    pub intensity: Intensity,
    pub score: f64,
}

/// Best candidate produced by an optimizer run.
///
/// `score` is the lowest score seen over every attempt, which is not
/// necessarily the score of the last attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub markup: Vec<MarkupSpan>,
    /// Transformer output the best candidate was decoded from.
    pub raw_markup: String,
    pub score: f64,
    pub attempts_used: u32,
    /// Every attempt in execution order.
    pub attempts: Vec<AttemptRecord>,
}

impl OptimizationResult {
    /// Whether the best score reached the given threshold.
    pub fn reached(&self, threshold: f64) -> bool {
        self.score < threshold
    }
}
