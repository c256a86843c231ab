//! Redraft - adaptive rewrite engine
//!
//! Rewrites text through external language-model collaborators: a
//! score-driven humanizer loop, an inline diff markup codec, and a flow
//! orchestrator that chains actions over one shared document.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and the collaborator ports
//! - **Service Layer** (`services`): codec, optimizer, registry and flow orchestration
//! - **Adapters** (`adapters`): the Messages API writer and a scripted test double
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use redraft::{adapters::llm, services::Optimizer, domain::models::{Config, Tone, Intensity}};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     let writer = Arc::new(llm::from_config(&config)?);
//!     let optimizer = Optimizer::new(writer.clone(), writer, config.optimizer);
//!     let result = optimizer.humanize("Text to rewrite.", Tone::Friendly, Intensity::DEFAULT).await?;
//!     println!("{}", result.score);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use adapters::{LlmWriter, ScriptedCollaborator};
pub use domain::models::{
    ActionId, Config, HistoryEntry, Intensity, MarkupSpan, OptimizationResult, Tone,
};
pub use domain::ports::Collaborators;
pub use domain::{Collaborator, DomainError, DomainResult};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ActionHandlers, ActionRegistry, FlowOrchestrator, MarkupCodec, Optimizer};
