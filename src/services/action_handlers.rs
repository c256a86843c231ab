//! Per-action handlers.
//!
//! A handler turns the current document and the action's parameters into an
//! [`ActionOutcome`]. Handlers never touch the flow document themselves; the
//! orchestrator commits the outcome once the handler has succeeded.

use tracing::debug;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ActionId, ActionOutcome, ActionParams, CitationStyle, Intensity, OptimizerConfig,
    ParaphraseMode, RewriteStyle, Source, SummaryFormat, Tone,
};
use crate::domain::ports::Collaborators;
use crate::services::markup_codec::MarkupCodec;
use crate::services::optimizer::Optimizer;

/// Dispatches actions to the collaborators they need.
#[derive(Debug, Clone)]
pub struct ActionHandlers {
    collaborators: Collaborators,
    optimizer_config: OptimizerConfig,
}

impl ActionHandlers {
    pub fn new(collaborators: Collaborators, optimizer_config: OptimizerConfig) -> Self {
        Self {
            collaborators,
            optimizer_config,
        }
    }

    pub fn collaborators(&self) -> &Collaborators {
        &self.collaborators
    }

    /// Run action `id` against `document`.
    ///
    /// Callers are expected to have validated the document and parameters
    /// through the registry first.
    pub async fn handle(
        &self,
        id: ActionId,
        document: &str,
        params: &ActionParams,
    ) -> DomainResult<ActionOutcome> {
        debug!(action = %id, "running action handler");
        match id {
            ActionId::Research => self.research(params).await,
            ActionId::CompleteText => self.complete(document).await,
            ActionId::Paraphrase => self.paraphrase(document, params).await,
            ActionId::Summarize => self.summarize(document, params).await,
            ActionId::Humanize => self.humanize(document, params).await,
            ActionId::Grammar => self.grammar(document).await,
            ActionId::Analyze => self.analyze(document).await,
            ActionId::Detect => self.detect(document).await,
            ActionId::Plagiarism => self.plagiarism(document).await,
            ActionId::Cite => self.cite(params).await,
        }
    }

    async fn research(&self, params: &ActionParams) -> DomainResult<ActionOutcome> {
        let query = required_text(params, "query")?;
        let report = self.collaborators.research()?.lookup(query).await?;

        let sources = report
            .sources
            .iter()
            .map(|source| format!("[{}]({})", source.display_title(), source.uri))
            .collect::<Vec<_>>()
            .join("\n");
        let result = format!(
            "**Summary for \"{query}\":**\n{}\n\n**Sources:**\n{sources}",
            report.summary
        );
        Ok(ActionOutcome::keep(result, format!("Researched: \"{query}\"")))
    }

    async fn complete(&self, document: &str) -> DomainResult<ActionOutcome> {
        let continuation = self.collaborators.composer()?.complete(document).await?;
        Ok(ActionOutcome::append(continuation.trim(), "Completed Text"))
    }

    async fn paraphrase(&self, document: &str, params: &ActionParams) -> DomainResult<ActionOutcome> {
        let mode = choice(params, "mode", ParaphraseMode::from_str)?;
        let raw = self
            .collaborators
            .transformer()?
            .rewrite(document, RewriteStyle::Paraphrase(mode), Intensity::DEFAULT)
            .await?;
        Ok(ActionOutcome::replace(
            MarkupCodec::plain_text_from_raw(&raw),
            format!("Paraphrased to \"{mode}\""),
        ))
    }

    async fn summarize(&self, document: &str, params: &ActionParams) -> DomainResult<ActionOutcome> {
        let format = choice(params, "format", SummaryFormat::from_str)?;
        let words = integer(params, "word_count")?;
        let word_count = u32::try_from(words)
            .map_err(|_| DomainError::invalid_parameter("word_count", "must be positive"))?;
        let summary = self
            .collaborators
            .composer()?
            .summarize(document, format, word_count)
            .await?;
        Ok(ActionOutcome::replace(
            summary.trim(),
            format!("Summarized ({format}, {word_count} words)"),
        ))
    }

    async fn humanize(&self, document: &str, params: &ActionParams) -> DomainResult<ActionOutcome> {
        let tone = choice(params, "tone", Tone::from_str)?;
        let level = integer(params, "level")?;
        let intensity = i64_to_intensity(level)?;

        let optimizer = Optimizer::new(
            self.collaborators.transformer()?.clone(),
            self.collaborators.detector()?.clone(),
            self.optimizer_config,
        );
        let result = optimizer.humanize(document, tone, intensity).await?;
        Ok(ActionOutcome::replace(
            MarkupCodec::plain_text(&result.markup),
            format!("Humanized ({tone}, Level {level})"),
        ))
    }

    async fn grammar(&self, document: &str) -> DomainResult<ActionOutcome> {
        let raw = self
            .collaborators
            .transformer()?
            .rewrite(document, RewriteStyle::Proofread, Intensity::DEFAULT)
            .await?;
        Ok(ActionOutcome::replace(
            MarkupCodec::plain_text_from_raw(&raw),
            "Checked Grammar",
        ))
    }

    async fn analyze(&self, document: &str) -> DomainResult<ActionOutcome> {
        let analytics = self.collaborators.analyst()?.analyze(document).await?;
        let result = format!(
            "Readability: {}\nTone: {}\nWord Count: {}",
            analytics.readability, analytics.tone, analytics.word_count
        );
        Ok(ActionOutcome::keep(result, "Analyzed Text"))
    }

    async fn detect(&self, document: &str) -> DomainResult<ActionOutcome> {
        let report = self.collaborators.detector()?.score(document).await?;
        let score = format_score(report.score());
        let result = format!(
            "AI Detection Score: {score}%.\nExplanation: {}",
            report.explanation
        );
        Ok(ActionOutcome::keep(
            result,
            format!("Detected AI Content ({score}%)"),
        ))
    }

    async fn plagiarism(&self, document: &str) -> DomainResult<ActionOutcome> {
        let sources = self.collaborators.analyst()?.find_sources(document).await?;
        Ok(ActionOutcome::keep(
            describe_sources(&sources),
            "Checked for Plagiarism",
        ))
    }

    async fn cite(&self, params: &ActionParams) -> DomainResult<ActionOutcome> {
        let style = choice(params, "style", CitationStyle::from_str)?;
        let source = required_text(params, "source")?;
        let citation = self.collaborators.citation()?.format(style, source).await?;
        Ok(ActionOutcome::keep(citation.trim(), format!("Cited ({style})")))
    }
}

fn required_text<'a>(params: &'a ActionParams, key: &str) -> DomainResult<&'a str> {
    params
        .text(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| DomainError::InvalidInput(format!("'{key}' must not be empty")))
}

fn choice<T>(params: &ActionParams, key: &str, parse: fn(&str) -> Option<T>) -> DomainResult<T> {
    let value = params
        .text(key)
        .ok_or_else(|| DomainError::invalid_parameter(key, "missing"))?;
    parse(value).ok_or_else(|| DomainError::invalid_parameter(key, format!("unknown option '{value}'")))
}

fn integer(params: &ActionParams, key: &str) -> DomainResult<i64> {
    params
        .integer(key)
        .ok_or_else(|| DomainError::invalid_parameter(key, "missing"))
}

fn i64_to_intensity(level: i64) -> DomainResult<Intensity> {
    u8::try_from(level)
        .ok()
        .and_then(Intensity::new)
        .ok_or_else(|| DomainError::invalid_parameter("level", format!("{level} is outside 1..=100")))
}

/// Scores are shown as whole percentages.
fn format_score(score: f64) -> String {
    format!("{score:.0}")
}

fn describe_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return "No potential sources found.".to_string();
    }
    let lines = sources
        .iter()
        .map(|source| format!("- {} ({})", source.display_title(), source.uri))
        .collect::<Vec<_>>()
        .join("\n");
    format!("Found {} potential sources:\n{lines}", sources.len())
}
