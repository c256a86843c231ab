//! Domain layer for redraft
//!
//! Core models, error types and the ports external collaborators implement.

pub mod errors;
pub mod models;
pub mod ports;

// Re-export error types for convenient access
pub use errors::{Collaborator, DomainError, DomainResult};
