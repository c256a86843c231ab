//! Injected bundle of collaborator handles.

use std::sync::Arc;

use crate::domain::errors::{Collaborator, DomainError, DomainResult};

use super::{Analyst, CitationProvider, Composer, Detector, ResearchProvider, Transformer};

/// Optional handles for every external capability.
///
/// Actions look up the capability they need through the accessors, which
/// fail with [`DomainError::NotConfigured`] when the handle is missing.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub detector: Option<Arc<dyn Detector>>,
    pub transformer: Option<Arc<dyn Transformer>>,
    pub composer: Option<Arc<dyn Composer>>,
    pub analyst: Option<Arc<dyn Analyst>>,
    pub research: Option<Arc<dyn ResearchProvider>>,
    pub citation: Option<Arc<dyn CitationProvider>>,
}

impl Collaborators {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use one implementation for every capability.
    pub fn from_provider<P>(provider: Arc<P>) -> Self
    where
        P: Detector + Transformer + Composer + Analyst + ResearchProvider + CitationProvider + 'static,
    {
        Self {
            detector: Some(provider.clone()),
            transformer: Some(provider.clone()),
            composer: Some(provider.clone()),
            analyst: Some(provider.clone()),
            research: Some(provider.clone()),
            citation: Some(provider),
        }
    }

    pub fn with_detector(mut self, detector: Arc<dyn Detector>) -> Self {
        self.detector = Some(detector);
        self
    }

    pub fn with_transformer(mut self, transformer: Arc<dyn Transformer>) -> Self {
        self.transformer = Some(transformer);
        self
    }

    pub fn with_composer(mut self, composer: Arc<dyn Composer>) -> Self {
        self.composer = Some(composer);
        self
    }

    pub fn with_analyst(mut self, analyst: Arc<dyn Analyst>) -> Self {
        self.analyst = Some(analyst);
        self
    }

    pub fn with_research(mut self, research: Arc<dyn ResearchProvider>) -> Self {
        self.research = Some(research);
        self
    }

    pub fn with_citation(mut self, citation: Arc<dyn CitationProvider>) -> Self {
        self.citation = Some(citation);
        self
    }

    pub fn detector(&self) -> DomainResult<&Arc<dyn Detector>> {
        self.detector
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Detector))
    }

    pub fn transformer(&self) -> DomainResult<&Arc<dyn Transformer>> {
        self.transformer
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Transformer))
    }

    pub fn composer(&self) -> DomainResult<&Arc<dyn Composer>> {
        self.composer
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Composer))
    }

    pub fn analyst(&self) -> DomainResult<&Arc<dyn Analyst>> {
        self.analyst
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Analyst))
    }

    pub fn research(&self) -> DomainResult<&Arc<dyn ResearchProvider>> {
        self.research
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Research))
    }

    pub fn citation(&self) -> DomainResult<&Arc<dyn CitationProvider>> {
        self.citation
            .as_ref()
            .ok_or(DomainError::NotConfigured(Collaborator::Citation))
    }
}

impl std::fmt::Debug for Collaborators {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collaborators")
            .field("detector", &self.detector.is_some())
            .field("transformer", &self.transformer.is_some())
            .field("composer", &self.composer.is_some())
            .field("analyst", &self.analyst.is_some())
            .field("research", &self.research.is_some())
            .field("citation", &self.citation.is_some())
            .finish()
    }
}
