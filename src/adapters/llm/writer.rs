//! Port implementations backed by the Messages API.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;

use super::client::MessagesClient;
use super::error::ProviderError;
use super::prompts::{self, Prompt};
use crate::domain::errors::{Collaborator, DomainResult};
use crate::domain::models::{
    word_count, CitationStyle, DetectionReport, Intensity, ResearchReport, RewriteStyle, Source,
    SummaryFormat, TextAnalytics,
};
use crate::domain::ports::{
    Analyst, CitationProvider, Composer, Detector, ResearchProvider, Transformer,
};

/// One LLM-backed implementation of every collaborator port.
#[derive(Debug, Clone)]
pub struct LlmWriter {
    client: MessagesClient,
}

#[derive(Debug, Deserialize)]
struct DetectionReply {
    score: f64,
    #[serde(default)]
    explanation: String,
    #[serde(default, alias = "suspiciousSentences")]
    suspicious_sentences: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct AnalyticsReply {
    readability: String,
    tone: String,
    #[serde(default, alias = "wordCount")]
    word_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SourcesReply {
    #[serde(default)]
    sources: Vec<Source>,
}

impl LlmWriter {
    pub fn new(client: MessagesClient) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &MessagesClient {
        &self.client
    }

    async fn text(&self, prompt: &Prompt, collaborator: Collaborator) -> DomainResult<String> {
        self.client.send(prompt).await.map_err(|err| {
            warn!(%collaborator, error = %err, "provider call failed");
            err.into_domain(collaborator)
        })
    }

    async fn json<T: DeserializeOwned>(
        &self,
        prompt: &Prompt,
        collaborator: Collaborator,
    ) -> DomainResult<T> {
        let reply = self.text(prompt, collaborator).await?;
        parse_json(&reply).map_err(|err| err.into_domain(collaborator))
    }
}

/// Parse a JSON object out of a model reply, tolerating a Markdown code fence
/// or prose around the object.
pub(crate) fn parse_json<T: DeserializeOwned>(reply: &str) -> Result<T, ProviderError> {
    let body = strip_code_fence(reply);
    serde_json::from_str(body)
        .or_else(|first| {
            match (body.find('{'), body.rfind('}')) {
                (Some(start), Some(end)) if start < end => serde_json::from_str(&body[start..=end]),
                _ => Err(first),
            }
        })
        .map_err(|err| ProviderError::MalformedResponse(format!("expected JSON object: {err}")))
}

fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Skip the info string (`json`, `JSON`, ...) on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn usable_sources(sources: Vec<Source>) -> Vec<Source> {
    sources
        .into_iter()
        .filter(|source| !source.uri.trim().is_empty())
        .collect()
}

#[async_trait]
impl Detector for LlmWriter {
    async fn score(&self, text: &str) -> DomainResult<DetectionReport> {
        let reply: DetectionReply = self.json(&prompts::detect(text), Collaborator::Detector).await?;
        Ok(DetectionReport::new(reply.score, reply.explanation)
            .with_flagged_spans(reply.suspicious_sentences))
    }
}

#[async_trait]
impl Transformer for LlmWriter {
    async fn rewrite(
        &self,
        text: &str,
        style: RewriteStyle,
        intensity: Intensity,
    ) -> DomainResult<String> {
        self.text(&prompts::rewrite(text, style, intensity), Collaborator::Transformer)
            .await
    }
}

#[async_trait]
impl Composer for LlmWriter {
    async fn summarize(
        &self,
        text: &str,
        format: SummaryFormat,
        word_count: u32,
    ) -> DomainResult<String> {
        self.text(&prompts::summarize(text, format, word_count), Collaborator::Composer)
            .await
    }

    async fn complete(&self, text: &str) -> DomainResult<String> {
        self.text(&prompts::complete(text), Collaborator::Composer)
            .await
    }
}

#[async_trait]
impl Analyst for LlmWriter {
    async fn analyze(&self, text: &str) -> DomainResult<TextAnalytics> {
        let reply: AnalyticsReply = self.json(&prompts::analyze(text), Collaborator::Analyst).await?;
        let counted = reply
            .word_count
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or_else(|| word_count(text));
        Ok(TextAnalytics {
            readability: reply.readability,
            tone: reply.tone,
            word_count: counted,
        })
    }

    async fn find_sources(&self, text: &str) -> DomainResult<Vec<Source>> {
        let reply: SourcesReply = self
            .json(&prompts::find_sources(text), Collaborator::Analyst)
            .await?;
        Ok(usable_sources(reply.sources))
    }
}

#[async_trait]
impl ResearchProvider for LlmWriter {
    async fn lookup(&self, topic: &str) -> DomainResult<ResearchReport> {
        let mut report: ResearchReport = self
            .json(&prompts::research(topic), Collaborator::Research)
            .await?;
        report.sources = usable_sources(report.sources);
        Ok(report)
    }
}

#[async_trait]
impl CitationProvider for LlmWriter {
    async fn format(&self, style: CitationStyle, source: &str) -> DomainResult<String> {
        self.text(&prompts::citation(style, source), Collaborator::Citation)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{}\n```  "), "{}");
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_parse_json_accepts_camel_case_and_prose() {
        let reply: DetectionReply = parse_json(
            "Here you go:\n{\"score\": 42, \"explanation\": \"flat\", \"suspiciousSentences\": [\"A.\"]}",
        )
        .unwrap();
        assert!((reply.score - 42.0).abs() < f64::EPSILON);
        assert_eq!(reply.suspicious_sentences, vec!["A.".to_string()]);
    }

    #[test]
    fn test_parse_json_rejects_non_json() {
        let result: Result<SourcesReply, _> = parse_json("no sources found");
        assert!(matches!(result, Err(ProviderError::MalformedResponse(_))));
    }

    #[test]
    fn test_sources_without_uri_are_dropped() {
        let kept = usable_sources(vec![
            Source::new("", "Ghost"),
            Source::new("https://a.example", "A"),
        ]);
        assert_eq!(kept, vec![Source::new("https://a.example", "A")]);
    }
}
