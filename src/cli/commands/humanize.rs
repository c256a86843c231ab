//! `redraft humanize`: run the score-driven rewrite loop on a text.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{create_spinner, output, CommandOutput};
use crate::cli::service;
use crate::domain::models::{
    AttemptRecord, Config, Intensity, MarkupSpan, OptimizationResult, SpanKind, Tone,
};
use crate::services::{MarkupCodec, Optimizer};

#[derive(Args, Debug)]
pub struct HumanizeArgs {
    /// Text to rewrite (reads stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Tone to write in (Neutral, Friendly, Professional, Confident)
    #[arg(short, long, default_value = "Neutral")]
    pub tone: String,

    /// Starting intensity (1-100)
    #[arg(short, long, default_value_t = 50, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub intensity: u8,
}

#[derive(Debug, Serialize)]
pub struct HumanizeOutput {
    pub text: String,
    pub markup: String,
    #[serde(skip)]
    pub spans: Vec<MarkupSpan>,
    pub edits: usize,
    pub score: f64,
    pub threshold: f64,
    pub reached: bool,
    pub attempts: Vec<AttemptRecord>,
}

impl HumanizeOutput {
    fn new(result: OptimizationResult, threshold: f64) -> Self {
        Self {
            text: MarkupCodec::plain_text(&result.markup),
            markup: MarkupCodec::render(&result.markup),
            edits: MarkupCodec::edit_count(&result.markup),
            reached: result.reached(threshold),
            score: result.score,
            threshold,
            attempts: result.attempts,
            spans: result.markup,
        }
    }
}

/// Deletions red and struck through, insertions green.
fn colorize(spans: &[MarkupSpan]) -> String {
    spans
        .iter()
        .map(|span| match span.kind {
            SpanKind::Unchanged => span.content.clone(),
            SpanKind::Deleted => style(&span.content).red().strikethrough().to_string(),
            SpanKind::Inserted => style(&span.content).green().to_string(),
        })
        .collect()
}

impl CommandOutput for HumanizeOutput {
    fn to_human(&self) -> String {
        let verdict = if self.reached {
            style("below threshold").green()
        } else {
            style("threshold not reached").yellow()
        };
        let mut lines = vec![
            colorize(&self.spans),
            String::new(),
            format!(
                "Score: {:.0}% ({verdict}, threshold {:.0}%)",
                self.score, self.threshold
            ),
            format!("Edits: {}", self.edits),
            format!("Attempts: {}", self.attempts.len()),
        ];
        for attempt in &self.attempts {
            lines.push(format!(
                "  #{} intensity {:>3} -> {:.0}%",
                attempt.attempt, attempt.intensity, attempt.score
            ));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: HumanizeArgs, config: &Config, json: bool) -> Result<()> {
    let tone = Tone::from_str(&args.tone).with_context(|| {
        let known: Vec<&str> = Tone::ALL.iter().map(Tone::as_str).collect();
        format!("Unknown tone '{}'. Expected one of: {}", args.tone, known.join(", "))
    })?;
    let intensity = Intensity::clamped(i64::from(args.intensity));
    let text = service::read_input(args.text, args.file.as_deref())?;

    let writer = service::writer(config)?;
    let optimizer = Optimizer::new(writer.clone(), writer, config.optimizer);

    let spinner = create_spinner(format!("Humanizing ({tone}, intensity {intensity})"), json);
    let result = optimizer.humanize(&text, tone, intensity).await;
    spinner.finish_and_clear();

    let result = result.context("Humanize failed")?;
    output(&HumanizeOutput::new(result, config.optimizer.score_threshold), json);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> HumanizeOutput {
        let markup = MarkupCodec::decode("I ~~is~~**am** happy.");
        HumanizeOutput::new(
            OptimizationResult {
                raw_markup: "I ~~is~~**am** happy.".to_string(),
                markup,
                score: 12.4,
                attempts_used: 1,
                attempts: vec![AttemptRecord {
                    attempt: 1,
                    intensity: Intensity::DEFAULT,
                    score: 12.4,
                }],
            },
            30.0,
        )
    }

    #[test]
    fn test_output_fields() {
        let out = sample();
        assert_eq!(out.text, "I am happy.");
        assert_eq!(out.markup, "I ~~is~~**am** happy.");
        assert_eq!(out.edits, 1);
        assert!(out.reached);
    }

    #[test]
    fn test_json_omits_spans() {
        let value = sample().to_json();
        assert_eq!(value["text"], "I am happy.");
        assert!(value.get("spans").is_none());
        assert_eq!(value["attempts"][0]["intensity"], 50);
    }

    #[test]
    fn test_human_output_reports_score() {
        let human = sample().to_human();
        assert!(human.contains("Score: 12%"));
        assert!(human.contains("Attempts: 1"));
    }
}
