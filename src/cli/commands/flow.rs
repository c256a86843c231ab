//! `redraft flow`: run a YAML plan of chained actions over one document.
//!
//! ```yaml
//! document: "Text to start from"
//! steps:
//!   - action: paraphrase
//!     params: { mode: Formal }
//!   - edit: "Replacement document"
//!   - action: detect
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Subcommand};
use console::style;
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};

use crate::cli::output::{create_spinner, list_table, output, truncate, CommandOutput};
use crate::cli::service;
use crate::domain::errors::DomainResult;
use crate::domain::models::{Config, FlowStats, HistoryEntry, ParameterValue};
use crate::services::{ActionHandlers, ActionRegistry, FlowOrchestrator};

#[derive(Args, Debug)]
pub struct FlowArgs {
    #[command(subcommand)]
    pub command: FlowCommands,
}

#[derive(Subcommand, Debug)]
pub enum FlowCommands {
    /// Execute a flow plan file
    Run {
        /// Path to the plan (YAML)
        plan: PathBuf,
    },
}

/// A document and the steps to run over it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FlowPlan {
    #[serde(default)]
    pub document: Option<String>,
    pub steps: Vec<PlanStep>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PlanStep {
    /// Replace the document directly.
    Edit { edit: String },
    /// Select an action, set its parameters and apply it.
    Action {
        action: String,
        #[serde(default)]
        params: BTreeMap<String, ParameterValue>,
    },
}

impl PlanStep {
    fn describe(&self) -> String {
        match self {
            Self::Edit { .. } => "edit".to_string(),
            Self::Action { action, .. } => action.clone(),
        }
    }
}

impl FlowPlan {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse plan {}", path.display()))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepFailure {
    /// 1-based position of the failing step in the plan.
    pub step: usize,
    pub description: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlowRunOutput {
    pub flow_id: String,
    pub document: String,
    pub history: Vec<HistoryEntry>,
    pub stats: FlowStats,
    pub failure: Option<StepFailure>,
}

impl CommandOutput for FlowRunOutput {
    fn to_human(&self) -> String {
        let mut lines = Vec::new();

        if self.history.is_empty() {
            lines.push("No actions applied.".to_string());
        } else {
            let mut table = list_table(&["#", "action", "result", "words in"]);
            for entry in &self.history {
                table.add_row(vec![
                    entry.sequence_number.to_string(),
                    entry.action_label.clone(),
                    truncate(&entry.result_summary.replace('\n', " "), 60),
                    entry.input_word_count.to_string(),
                ]);
            }
            lines.push(format!("{}", style("History:").bold()));
            lines.push(table.to_string());
        }

        lines.push(String::new());
        lines.push(format!(
            "{} applied, {} distinct, {} words processed",
            self.stats.actions_applied, self.stats.distinct_actions, self.stats.words_processed
        ));

        if let Some(failure) = &self.failure {
            lines.push(format!(
                "{} step {} ({}): {}",
                style("Stopped at").red().bold(),
                failure.step,
                failure.description,
                failure.error
            ));
        }

        lines.push(String::new());
        lines.push(format!("{}", style("Document:").bold()));
        lines.push(self.document.clone());
        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

async fn run_step(flow: &FlowOrchestrator, step: &PlanStep) -> DomainResult<()> {
    match step {
        PlanStep::Edit { edit } => flow.set_document(edit.clone()),
        PlanStep::Action { action, params } => {
            flow.select_action_named(action)?;
            for (key, value) in params {
                flow.set_parameter(key, value.clone())?;
            }
            flow.apply().await.map(|_| ())
        }
    }
}

/// Run every step of `plan` in order, stopping at the first failure.
///
/// The returned document and history reflect only committed steps.
pub async fn run_plan(
    flow: &FlowOrchestrator,
    plan: &FlowPlan,
    progress: &ProgressBar,
) -> DomainResult<FlowRunOutput> {
    if let Some(document) = &plan.document {
        flow.set_document(document.clone())?;
    }

    let mut failure = None;
    for (index, step) in plan.steps.iter().enumerate() {
        let description = step.describe();
        progress.set_message(format!("Step {}/{}: {description}", index + 1, plan.steps.len()));
        if let Err(err) = run_step(flow, step).await {
            failure = Some(StepFailure {
                step: index + 1,
                description,
                error: err.to_string(),
            });
            break;
        }
    }

    Ok(FlowRunOutput {
        flow_id: flow.id().to_string(),
        document: flow.document(),
        history: flow.history(),
        stats: flow.stats(),
        failure,
    })
}

pub async fn execute(args: FlowArgs, config: &Config, json: bool) -> Result<()> {
    match args.command {
        FlowCommands::Run { plan } => {
            let plan = FlowPlan::from_file(&plan)?;
            let handlers = ActionHandlers::new(service::collaborators(config)?, config.optimizer);
            let flow = FlowOrchestrator::new(ActionRegistry::new(), handlers);

            let spinner = create_spinner("Running flow", json);
            let result = run_plan(&flow, &plan, &spinner).await;
            spinner.finish_and_clear();

            let out = result.context("Flow could not start")?;
            output(&out, json);
            if let Some(failure) = out.failure {
                bail!("Flow stopped at step {}: {}", failure.step, failure.error);
            }
            Ok(())
        }
    }
}
