//! `redraft detect`: score how machine-written a text reads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{create_spinner, output, CommandOutput};
use crate::cli::service;
use crate::domain::models::{Config, DetectionReport};
use crate::domain::ports::Detector;

#[derive(Args, Debug)]
pub struct DetectArgs {
    /// Text to score (reads stdin when neither TEXT nor --file is given)
    pub text: Option<String>,

    /// Read the text from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
pub struct DetectOutput {
    pub score: f64,
    pub explanation: String,
    pub flagged_spans: Vec<String>,
}

impl From<DetectionReport> for DetectOutput {
    fn from(report: DetectionReport) -> Self {
        Self {
            score: report.score(),
            explanation: report.explanation,
            flagged_spans: report.flagged_spans,
        }
    }
}

impl CommandOutput for DetectOutput {
    fn to_human(&self) -> String {
        let score = format!("{:.0}%", self.score);
        let score = match self.score {
            s if s < 30.0 => style(score).green(),
            s if s < 70.0 => style(score).yellow(),
            _ => style(score).red().bold(),
        };
        let mut lines = vec![
            format!("AI Detection Score: {score}"),
            format!("Explanation: {}", self.explanation),
        ];
        if !self.flagged_spans.is_empty() {
            lines.push(String::new());
            lines.push("Flagged sentences:".to_string());
            lines.extend(self.flagged_spans.iter().map(|span| format!("  - {span}")));
        }
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: DetectArgs, config: &Config, json: bool) -> Result<()> {
    let text = service::read_input(args.text, args.file.as_deref())?;
    let writer = service::writer(config)?;

    let spinner = create_spinner("Scoring text", json);
    let report = writer.score(&text).await;
    spinner.finish_and_clear();

    let report = report.context("Detection failed")?;
    output(&DetectOutput::from(report), json);
    Ok(())
}
