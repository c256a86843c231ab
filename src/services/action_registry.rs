//! Declarations of every chainable action.

use std::collections::BTreeMap;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    ActionDefinition, ActionId, ActionParams, CitationStyle, ParameterSpec, ParameterValue,
    ParaphraseMode, SummaryFormat, Tone,
};

/// Lowest and highest summary length accepted by the summarize action.
pub const SUMMARY_WORDS: (i64, i64) = (20, 2000);

/// Static catalogue of action definitions, in menu order.
#[derive(Debug, Clone)]
pub struct ActionRegistry {
    definitions: Vec<ActionDefinition>,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self {
            definitions: ActionId::ALL.into_iter().map(define).collect(),
        }
    }

    /// All definitions in menu order.
    pub fn all(&self) -> &[ActionDefinition] {
        &self.definitions
    }

    pub fn get(&self, id: ActionId) -> &ActionDefinition {
        &self.definitions[id.index()]
    }

    /// Resolve a user-supplied action name.
    pub fn lookup(&self, name: &str) -> DomainResult<&ActionDefinition> {
        ActionId::from_str(name)
            .map(|id| self.get(id))
            .ok_or_else(|| DomainError::UnknownAction(name.to_string()))
    }

    /// Validate `value` for parameter `key` of action `id`.
    pub fn check_parameter(
        &self,
        id: ActionId,
        key: &str,
        value: ParameterValue,
    ) -> DomainResult<ParameterValue> {
        let spec = self
            .get(id)
            .parameter_schema
            .get(key)
            .ok_or_else(|| DomainError::invalid_parameter(key, format!("{id} has no such parameter")))?;
        spec.accept(value)
            .map_err(|reason| DomainError::invalid_parameter(key, reason))
    }

    /// Check that the action can run on `document` with `params`.
    pub fn check_ready(
        &self,
        id: ActionId,
        document: &str,
        params: &ActionParams,
    ) -> DomainResult<()> {
        let definition = self.get(id);
        if definition.requires_input_text && document.trim().is_empty() {
            return Err(DomainError::InvalidInput(format!(
                "{} needs some text in the document",
                definition.label
            )));
        }
        for (key, spec) in &definition.parameter_schema {
            if spec.required && params.get(key).is_none_or(ParameterValue::is_blank) {
                return Err(DomainError::InvalidInput(format!(
                    "{} needs a value for '{key}'",
                    definition.label
                )));
            }
        }
        Ok(())
    }
}

fn define(id: ActionId) -> ActionDefinition {
    let (label, requires_input_text, params): (&str, bool, Vec<(&str, ParameterSpec)>) = match id {
        ActionId::Research => ("Web Research", false, vec![("query", ParameterSpec::required_text())]),
        ActionId::CompleteText => ("Complete Text", true, vec![]),
        ActionId::Paraphrase => (
            "Paraphrase",
            true,
            vec![(
                "mode",
                ParameterSpec::choice(
                    ParaphraseMode::ALL.map(|mode| mode.as_str()),
                    ParaphraseMode::default().as_str(),
                ),
            )],
        ),
        ActionId::Summarize => (
            "Summarize",
            true,
            vec![
                (
                    "format",
                    ParameterSpec::choice(
                        SummaryFormat::ALL.map(|format| format.as_str()),
                        SummaryFormat::default().as_str(),
                    ),
                ),
                (
                    "word_count",
                    ParameterSpec::integer(SUMMARY_WORDS.0, SUMMARY_WORDS.1, 100),
                ),
            ],
        ),
        ActionId::Humanize => (
            "AI Humanizer",
            true,
            vec![
                (
                    "tone",
                    ParameterSpec::choice(Tone::ALL.map(|tone| tone.as_str()), Tone::default().as_str()),
                ),
                ("level", ParameterSpec::integer(1, 100, 50)),
            ],
        ),
        ActionId::Grammar => ("Check Grammar", true, vec![]),
        ActionId::Analyze => ("Analyze Text", true, vec![]),
        ActionId::Detect => ("AI Detector", true, vec![]),
        ActionId::Plagiarism => ("Plagiarism Check", true, vec![]),
        ActionId::Cite => (
            "Citation",
            false,
            vec![
                (
                    "style",
                    ParameterSpec::choice(
                        CitationStyle::ALL.map(|style| style.as_str()),
                        CitationStyle::default().as_str(),
                    ),
                ),
                ("source", ParameterSpec::required_text()),
            ],
        ),
    };

    ActionDefinition {
        id,
        label: label.to_string(),
        requires_input_text,
        parameter_schema: params
            .into_iter()
            .map(|(key, spec)| (key.to_string(), spec))
            .collect::<BTreeMap<_, _>>(),
    }
}
