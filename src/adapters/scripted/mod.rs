//! Scripted in-memory collaborator.
//!
//! Every port call pops the next queued reply for that operation and is
//! recorded, so tests can assert on both results and call sequences. An
//! exhausted queue fails the call with `CollaboratorUnavailable`.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::errors::{Collaborator, DomainError, DomainResult};
use crate::domain::models::{
    CitationStyle, DetectionReport, Intensity, ResearchReport, RewriteStyle, Source,
    SummaryFormat, TextAnalytics,
};
use crate::domain::ports::{
    Analyst, CitationProvider, Composer, Detector, ResearchProvider, Transformer,
};

/// A queued reply: a value or a failure reason.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    Value(T),
    Fail(String),
}

/// One recorded port call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Rewrite {
        text: String,
        style: RewriteStyle,
        intensity: Intensity,
    },
    Score {
        text: String,
    },
    Summarize {
        text: String,
        format: SummaryFormat,
        word_count: u32,
    },
    Complete {
        text: String,
    },
    Analyze {
        text: String,
    },
    FindSources {
        text: String,
    },
    Lookup {
        topic: String,
    },
    Cite {
        style: CitationStyle,
        source: String,
    },
}

#[derive(Debug, Default)]
struct Script {
    rewrites: VecDeque<Reply<String>>,
    scores: VecDeque<Reply<DetectionReport>>,
    summaries: VecDeque<Reply<String>>,
    completions: VecDeque<Reply<String>>,
    analytics: VecDeque<Reply<TextAnalytics>>,
    matches: VecDeque<Reply<Vec<Source>>>,
    research: VecDeque<Reply<ResearchReport>>,
    citations: VecDeque<Reply<String>>,
    calls: Vec<Call>,
}

/// Deterministic collaborator for tests and dry runs.
#[derive(Debug, Default)]
pub struct ScriptedCollaborator {
    script: Mutex<Script>,
}

impl ScriptedCollaborator {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue transformer outputs (raw markup).
    pub fn with_rewrites<I, S>(self, rewrites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lock()
            .rewrites
            .extend(rewrites.into_iter().map(|r| Reply::Value(r.into())));
        self
    }

    /// Queue detector scores.
    pub fn with_scores<I: IntoIterator<Item = f64>>(self, scores: I) -> Self {
        self.lock().scores.extend(
            scores
                .into_iter()
                .map(|score| Reply::Value(DetectionReport::new(score, "scripted"))),
        );
        self
    }

    pub fn with_detection(self, report: DetectionReport) -> Self {
        self.lock().scores.push_back(Reply::Value(report));
        self
    }

    pub fn with_summary(self, summary: impl Into<String>) -> Self {
        self.lock().summaries.push_back(Reply::Value(summary.into()));
        self
    }

    pub fn with_completion(self, completion: impl Into<String>) -> Self {
        self.lock()
            .completions
            .push_back(Reply::Value(completion.into()));
        self
    }

    pub fn with_analytics(self, analytics: TextAnalytics) -> Self {
        self.lock().analytics.push_back(Reply::Value(analytics));
        self
    }

    pub fn with_matches(self, sources: Vec<Source>) -> Self {
        self.lock().matches.push_back(Reply::Value(sources));
        self
    }

    pub fn with_research(self, report: ResearchReport) -> Self {
        self.lock().research.push_back(Reply::Value(report));
        self
    }

    pub fn with_citation(self, citation: impl Into<String>) -> Self {
        self.lock().citations.push_back(Reply::Value(citation.into()));
        self
    }

    /// Make the next rewrite fail after any already queued ones.
    pub fn failing_rewrite(self, reason: impl Into<String>) -> Self {
        self.lock().rewrites.push_back(Reply::Fail(reason.into()));
        self
    }

    /// Make the next score fail after any already queued ones.
    pub fn failing_score(self, reason: impl Into<String>) -> Self {
        self.lock().scores.push_back(Reply::Fail(reason.into()));
        self
    }

    pub fn failing_research(self, reason: impl Into<String>) -> Self {
        self.lock().research.push_back(Reply::Fail(reason.into()));
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.lock().calls.clone()
    }

    /// Intensities passed to the transformer, in order.
    pub fn rewrite_intensities(&self) -> Vec<u8> {
        self.lock()
            .calls
            .iter()
            .filter_map(|call| match call {
                Call::Rewrite { intensity, .. } => Some(intensity.value()),
                _ => None,
            })
            .collect()
    }

    pub fn rewrite_count(&self) -> usize {
        self.rewrite_intensities().len()
    }

    pub fn score_count(&self) -> usize {
        self.lock()
            .calls
            .iter()
            .filter(|call| matches!(call, Call::Score { .. }))
            .count()
    }

    fn next<T>(
        &self,
        call: Call,
        collaborator: Collaborator,
        queue: impl FnOnce(&mut Script) -> &mut VecDeque<Reply<T>>,
    ) -> DomainResult<T> {
        let mut script = self.lock();
        script.calls.push(call);
        match queue(&mut script).pop_front() {
            Some(Reply::Value(value)) => Ok(value),
            Some(Reply::Fail(reason)) => Err(DomainError::unavailable(collaborator, reason)),
            None => Err(DomainError::unavailable(collaborator, "script exhausted")),
        }
    }
}

#[async_trait]
impl Transformer for ScriptedCollaborator {
    async fn rewrite(
        &self,
        text: &str,
        style: RewriteStyle,
        intensity: Intensity,
    ) -> DomainResult<String> {
        let call = Call::Rewrite {
            text: text.to_string(),
            style,
            intensity,
        };
        self.next(call, Collaborator::Transformer, |s| &mut s.rewrites)
    }
}

#[async_trait]
impl Detector for ScriptedCollaborator {
    async fn score(&self, text: &str) -> DomainResult<DetectionReport> {
        let call = Call::Score {
            text: text.to_string(),
        };
        self.next(call, Collaborator::Detector, |s| &mut s.scores)
    }
}

#[async_trait]
impl Composer for ScriptedCollaborator {
    async fn summarize(
        &self,
        text: &str,
        format: SummaryFormat,
        word_count: u32,
    ) -> DomainResult<String> {
        let call = Call::Summarize {
            text: text.to_string(),
            format,
            word_count,
        };
        self.next(call, Collaborator::Composer, |s| &mut s.summaries)
    }

    async fn complete(&self, text: &str) -> DomainResult<String> {
        let call = Call::Complete {
            text: text.to_string(),
        };
        self.next(call, Collaborator::Composer, |s| &mut s.completions)
    }
}

#[async_trait]
impl Analyst for ScriptedCollaborator {
    async fn analyze(&self, text: &str) -> DomainResult<TextAnalytics> {
        let call = Call::Analyze {
            text: text.to_string(),
        };
        self.next(call, Collaborator::Analyst, |s| &mut s.analytics)
    }

    async fn find_sources(&self, text: &str) -> DomainResult<Vec<Source>> {
        let call = Call::FindSources {
            text: text.to_string(),
        };
        self.next(call, Collaborator::Analyst, |s| &mut s.matches)
    }
}

#[async_trait]
impl ResearchProvider for ScriptedCollaborator {
    async fn lookup(&self, topic: &str) -> DomainResult<ResearchReport> {
        let call = Call::Lookup {
            topic: topic.to_string(),
        };
        self.next(call, Collaborator::Research, |s| &mut s.research)
    }
}

#[async_trait]
impl CitationProvider for ScriptedCollaborator {
    async fn format(&self, style: CitationStyle, source: &str) -> DomainResult<String> {
        let call = Call::Cite {
            style,
            source: source.to_string(),
        };
        self.next(call, Collaborator::Citation, |s| &mut s.citations)
    }
}
