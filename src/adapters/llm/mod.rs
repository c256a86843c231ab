//! Messages API adapter.
//!
//! - `client`: HTTP transport with token-bucket throttling
//! - `prompts`: prompt text per operation
//! - `writer`: [`LlmWriter`], implementing every collaborator port

pub mod client;
pub mod error;
pub mod prompts;
pub mod types;
pub mod writer;

pub use client::MessagesClient;
pub use error::ProviderError;
pub use writer::LlmWriter;

use crate::domain::models::Config;

/// Build a writer from loaded configuration.
pub fn from_config(config: &Config) -> Result<LlmWriter, ProviderError> {
    MessagesClient::new(&config.provider, &config.rate_limit).map(LlmWriter::new)
}
