//! Flow state machine and history types.

use std::collections::BTreeSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::action::ActionId;

/// Where the orchestrator is in its select/configure/apply cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "action", rename_all = "snake_case")]
pub enum FlowState {
    /// No action selected yet.
    Idle,
    /// An action is selected and its parameters can be edited.
    Configuring(ActionId),
    /// The action's handler is running.
    Applying(ActionId),
}

impl FlowState {
    pub fn action(&self) -> Option<ActionId> {
        match self {
            Self::Idle => None,
            Self::Configuring(id) | Self::Applying(id) => Some(*id),
        }
    }

    pub fn is_applying(&self) -> bool {
        matches!(self, Self::Applying(_))
    }
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => f.write_str("idle"),
            Self::Configuring(id) => write!(f, "configuring {id}"),
            Self::Applying(id) => write!(f, "applying {id}"),
        }
    }
}

/// One committed action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// 1-based, strictly increasing, never reused.
    pub sequence_number: u64,
    pub action: ActionId,
    pub action_label: String,
    pub result_summary: String,
    /// Words in the document the action consumed.
    pub input_word_count: usize,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate view over a history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FlowStats {
    pub actions_applied: usize,
    pub distinct_actions: usize,
    pub words_processed: usize,
}

impl FlowStats {
    pub fn from_history(history: &[HistoryEntry]) -> Self {
        let distinct: BTreeSet<ActionId> = history.iter().map(|entry| entry.action).collect();
        Self {
            actions_applied: history.len(),
            distinct_actions: distinct.len(),
            words_processed: history.iter().map(|entry| entry.input_word_count).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(sequence_number: u64, action: ActionId, words: usize) -> HistoryEntry {
        HistoryEntry {
            sequence_number,
            action,
            action_label: action.to_string(),
            result_summary: String::new(),
            input_word_count: words,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_stats_count_distinct_actions() {
        let history = vec![
            entry(1, ActionId::Detect, 10),
            entry(2, ActionId::Humanize, 10),
            entry(3, ActionId::Detect, 12),
        ];
        let stats = FlowStats::from_history(&history);
        assert_eq!(stats.actions_applied, 3);
        assert_eq!(stats.distinct_actions, 2);
        assert_eq!(stats.words_processed, 32);
    }

    #[test]
    fn test_state_action() {
        assert_eq!(FlowState::Idle.action(), None);
        assert_eq!(FlowState::Applying(ActionId::Cite).action(), Some(ActionId::Cite));
        assert!(FlowState::Applying(ActionId::Cite).is_applying());
    }
}
