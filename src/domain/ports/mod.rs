//! Port trait definitions (Hexagonal Architecture)
//!
//! Async trait interfaces that adapters implement:
//! - Detector: machine-likeness scoring
//! - Transformer: rewriting with inline edit markup
//! - Composer: summaries and continuations
//! - Analyst: text analytics and plagiarism lookup
//! - ResearchProvider / CitationProvider: web research and reference formatting
//!
//! The services only ever see these traits, bundled in [`Collaborators`].

pub mod analyst;
pub mod citation;
pub mod collaborators;
pub mod composer;
pub mod detector;
pub mod research;
pub mod transformer;

pub use analyst::Analyst;
pub use citation::CitationProvider;
pub use collaborators::Collaborators;
pub use composer::Composer;
pub use detector::Detector;
pub use research::ResearchProvider;
pub use transformer::Transformer;
