//! Infrastructure layer module
//!
//! - Configuration management
//! - Logging infrastructure and secret scrubbing

pub mod config;
pub mod logging;
