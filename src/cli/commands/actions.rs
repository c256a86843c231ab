//! `redraft actions`: list the chainable actions and their parameters.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::cli::output::{list_table, output, CommandOutput};
use crate::domain::models::{ActionDefinition, ParameterKind, ParameterSpec};
use crate::services::ActionRegistry;

#[derive(Args, Debug)]
pub struct ActionsArgs {}

#[derive(Debug, Serialize)]
pub struct ActionsOutput {
    pub actions: Vec<ActionDefinition>,
}

fn describe(key: &str, spec: &ParameterSpec) -> String {
    let shape = match &spec.kind {
        ParameterKind::Choice { options } => options.join("|"),
        ParameterKind::Integer { min, max } => format!("{min}..{max}"),
        ParameterKind::Text => "text".to_string(),
    };
    if spec.default.is_blank() {
        format!("{key}=<{shape}>")
    } else {
        format!("{key}=<{shape}> (default {})", spec.default)
    }
}

impl CommandOutput for ActionsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["id", "label", "needs text", "parameters"]);
        for action in &self.actions {
            let params: Vec<String> = action
                .parameter_schema
                .iter()
                .map(|(key, spec)| describe(key, spec))
                .collect();
            table.add_row(vec![
                action.id.to_string(),
                action.label.clone(),
                if action.requires_input_text { "yes" } else { "no" }.to_string(),
                if params.is_empty() { "-".to_string() } else { params.join("\n") },
            ]);
        }
        format!("{} actions:\n{table}", self.actions.len())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(_args: ActionsArgs, json: bool) -> Result<()> {
    let registry = ActionRegistry::new();
    let out = ActionsOutput {
        actions: registry.all().to_vec(),
    };
    output(&out, json);
    Ok(())
}
