//! Results returned by the analysing collaborators.

use serde::{Deserialize, Serialize};

/// Lowest possible detector score (very likely human).
pub const MIN_SCORE: f64 = 0.0;
/// Highest possible detector score (very likely machine-generated).
pub const MAX_SCORE: f64 = 100.0;

/// Clamp a raw detector score into `[0, 100]`. NaN maps to the worst score.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        MAX_SCORE
    } else {
        raw.clamp(MIN_SCORE, MAX_SCORE)
    }
}

/// Detector verdict for one text. Lower scores are more human.
///
/// The score is private so every report goes through [`DetectionReport::new`]
/// and stays within `[0, 100]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectionReport {
    score: f64,
    pub explanation: String,
    pub flagged_spans: Vec<String>,
}

impl DetectionReport {
    pub fn new(score: f64, explanation: impl Into<String>) -> Self {
        Self {
            score: clamp_score(score),
            explanation: explanation.into(),
            flagged_spans: Vec::new(),
        }
    }

    pub fn with_flagged_spans(mut self, spans: Vec<String>) -> Self {
        self.flagged_spans = spans;
        self
    }

    pub fn score(&self) -> f64 {
        self.score
    }
}

/// Readability overview of a text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextAnalytics {
    pub readability: String,
    pub tone: String,
    pub word_count: usize,
}

/// A web source backing a research summary or matching a plagiarism check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

impl Source {
    pub fn new(uri: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            title: title.into(),
        }
    }

    /// Title for display, falling back when the provider returned none.
    pub fn display_title(&self) -> &str {
        if self.title.trim().is_empty() {
            "Untitled Source"
        } else {
            &self.title
        }
    }
}

/// Summary of a researched topic with the sources it was grounded on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub summary: String,
    #[serde(default)]
    pub sources: Vec<Source>,
}

/// Count whitespace-separated words.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_is_clamped() {
        assert!((DetectionReport::new(140.0, "").score() - 100.0).abs() < f64::EPSILON);
        assert!(DetectionReport::new(-3.0, "").score().abs() < f64::EPSILON);
        assert!((DetectionReport::new(f64::NAN, "").score() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_untitled_source() {
        assert_eq!(Source::new("https://a.example", " ").display_title(), "Untitled Source");
        assert_eq!(Source::new("https://a.example", "A").display_title(), "A");
    }

    #[test]
    fn test_word_count() {
        assert_eq!(word_count("  one two\nthree  "), 3);
        assert_eq!(word_count("   "), 0);
    }
}
