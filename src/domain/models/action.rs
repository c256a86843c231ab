//! Chainable flow actions and their parameters.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed set of actions a flow can apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    Research,
    CompleteText,
    Paraphrase,
    Summarize,
    Humanize,
    Grammar,
    Analyze,
    Detect,
    Plagiarism,
    Cite,
}

impl ActionId {
    /// Display order used by the registry.
    pub const ALL: [Self; 10] = [
        Self::Research,
        Self::CompleteText,
        Self::Paraphrase,
        Self::Summarize,
        Self::Humanize,
        Self::Grammar,
        Self::Analyze,
        Self::Detect,
        Self::Plagiarism,
        Self::Cite,
    ];

    /// Position of this action in [`ActionId::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Self::Research => 0,
            Self::CompleteText => 1,
            Self::Paraphrase => 2,
            Self::Summarize => 3,
            Self::Humanize => 4,
            Self::Grammar => 5,
            Self::Analyze => 6,
            Self::Detect => 7,
            Self::Plagiarism => 8,
            Self::Cite => 9,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Research => "research",
            Self::CompleteText => "complete_text",
            Self::Paraphrase => "paraphrase",
            Self::Summarize => "summarize",
            Self::Humanize => "humanize",
            Self::Grammar => "grammar",
            Self::Analyze => "analyze",
            Self::Detect => "detect",
            Self::Plagiarism => "plagiarism",
            Self::Cite => "cite",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "write_assist" | "complete" => Some(Self::CompleteText),
            "analytics" => Some(Self::Analyze),
            "citation" => Some(Self::Cite),
            other => Self::ALL.into_iter().find(|id| id.as_str() == other),
        }
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parameter value as set by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Integer(i64),
    Text(String),
}

impl ParameterValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Text(text) if text.trim().is_empty())
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Shape a parameter's values must take.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ParameterKind {
    /// One of a fixed list of labels.
    Choice { options: Vec<String> },
    /// An integer within an inclusive range.
    Integer { min: i64, max: i64 },
    /// Free text.
    Text,
}

/// Declaration of a single action parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterSpec {
    pub kind: ParameterKind,
    /// Required parameters must be non-blank before the action may run.
    pub required: bool,
    pub default: ParameterValue,
}

impl ParameterSpec {
    pub fn choice<I, S>(options: I, default: &str) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ParameterKind::Choice {
                options: options.into_iter().map(Into::into).collect(),
            },
            required: true,
            default: ParameterValue::from(default),
        }
    }

    pub fn integer(min: i64, max: i64, default: i64) -> Self {
        Self {
            kind: ParameterKind::Integer { min, max },
            required: true,
            default: ParameterValue::Integer(default),
        }
    }

    /// Free-text parameter that starts empty and must be filled in.
    pub fn required_text() -> Self {
        Self {
            kind: ParameterKind::Text,
            required: true,
            default: ParameterValue::Text(String::new()),
        }
    }

    /// Check a candidate value against this spec, returning the value to store.
    ///
    /// Choices are matched case-insensitively and stored with the canonical
    /// label; integers given as text are parsed.
    pub fn accept(&self, value: ParameterValue) -> Result<ParameterValue, String> {
        match (&self.kind, value) {
            (ParameterKind::Choice { options }, ParameterValue::Text(text)) => options
                .iter()
                .find(|option| option.eq_ignore_ascii_case(text.trim()))
                .map(|option| ParameterValue::Text(option.clone()))
                .ok_or_else(|| format!("'{text}' is not one of: {}", options.join(", "))),
            (ParameterKind::Integer { min, max }, value) => {
                let number = match value {
                    ParameterValue::Integer(number) => number,
                    ParameterValue::Text(text) => text
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| format!("'{text}' is not an integer"))?,
                };
                if (*min..=*max).contains(&number) {
                    Ok(ParameterValue::Integer(number))
                } else {
                    Err(format!("{number} is outside {min}..={max}"))
                }
            }
            (ParameterKind::Text, ParameterValue::Text(text)) => Ok(ParameterValue::Text(text)),
            (ParameterKind::Choice { .. } | ParameterKind::Text, ParameterValue::Integer(n)) => {
                Err(format!("expected text, got integer {n}"))
            }
        }
    }
}

/// Immutable description of an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionDefinition {
    pub id: ActionId,
    pub label: String,
    pub requires_input_text: bool,
    pub parameter_schema: BTreeMap<String, ParameterSpec>,
}

impl ActionDefinition {
    /// Parameters populated with every default from the schema.
    pub fn default_params(&self) -> ActionParams {
        ActionParams(
            self.parameter_schema
                .iter()
                .map(|(key, spec)| (key.clone(), spec.default.clone()))
                .collect(),
        )
    }
}

/// Current parameter values of a configured action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActionParams(BTreeMap<String, ParameterValue>);

impl ActionParams {
    pub fn get(&self, key: &str) -> Option<&ParameterValue> {
        self.0.get(key)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(ParameterValue::as_text)
    }

    pub fn integer(&self, key: &str) -> Option<i64> {
        self.get(key).and_then(ParameterValue::as_integer)
    }

    pub(crate) fn insert(&mut self, key: impl Into<String>, value: ParameterValue) {
        self.0.insert(key.into(), value);
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &ParameterValue)> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// How an action's result is committed to the flow document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentEffect {
    /// The result becomes the whole document.
    Replace,
    /// The result is appended after one blank line.
    Append,
    /// The document is left untouched; the result only goes to history.
    Keep,
}

/// Output of an action handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    pub result_text: String,
    pub history_label: String,
    pub effect: DocumentEffect,
}

impl ActionOutcome {
    pub fn replace(result_text: impl Into<String>, history_label: impl Into<String>) -> Self {
        Self {
            result_text: result_text.into(),
            history_label: history_label.into(),
            effect: DocumentEffect::Replace,
        }
    }

    pub fn append(result_text: impl Into<String>, history_label: impl Into<String>) -> Self {
        Self {
            result_text: result_text.into(),
            history_label: history_label.into(),
            effect: DocumentEffect::Append,
        }
    }

    pub fn keep(result_text: impl Into<String>, history_label: impl Into<String>) -> Self {
        Self {
            result_text: result_text.into(),
            history_label: history_label.into(),
            effect: DocumentEffect::Keep,
        }
    }

    /// Apply this outcome to `document`, returning the new document text.
    pub fn commit_to(&self, document: &str) -> String {
        match self.effect {
            DocumentEffect::Replace => self.result_text.clone(),
            DocumentEffect::Keep => document.to_string(),
            DocumentEffect::Append => {
                if document.trim().is_empty() {
                    self.result_text.clone()
                } else {
                    format!("{}\n\n{}", document.trim_end(), self.result_text)
                }
            }
        }
    }
}
