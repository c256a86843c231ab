//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::commands::actions::ActionsArgs;
use crate::cli::commands::detect::DetectArgs;
use crate::cli::commands::flow::FlowArgs;
use crate::cli::commands::humanize::HumanizeArgs;

#[derive(Parser, Debug)]
#[command(name = "redraft")]
#[command(about = "Redraft - adaptive rewrite engine", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Load configuration from this file instead of .redraft/
    #[arg(short, long, global = true, env = "REDRAFT_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rewrite text until it reads as human-written
    Humanize(HumanizeArgs),

    /// Score how machine-written a text reads
    Detect(DetectArgs),

    /// List the chainable actions
    Actions(ActionsArgs),

    /// Run chained action flows
    Flow(FlowArgs),
}
