//! CLI command implementations.

pub mod actions;
pub mod detect;
pub mod flow;
pub mod humanize;
