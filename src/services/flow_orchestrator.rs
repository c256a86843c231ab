//! Flow orchestrator: one shared document, a sequence of actions applied to
//! it, and the append-only history of what each action did.
//!
//! State lives behind a plain [`std::sync::Mutex`] that is only held for
//! synchronous bookkeeping. The lock is released before the action handler
//! is awaited, so a second `apply` arriving meanwhile sees `Applying` and is
//! turned away with [`DomainError::FlowBusy`].

use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::{
    word_count, ActionDefinition, ActionId, ActionParams, FlowState, FlowStats, HistoryEntry,
    ParameterValue,
};
use crate::services::action_handlers::ActionHandlers;
use crate::services::action_registry::ActionRegistry;

#[derive(Debug)]
struct FlowInner {
    state: FlowState,
    params: ActionParams,
    document: String,
    history: Vec<HistoryEntry>,
    next_sequence: u64,
}

/// Sequences actions over a single document.
#[derive(Debug)]
pub struct FlowOrchestrator {
    id: Uuid,
    registry: ActionRegistry,
    handlers: ActionHandlers,
    inner: Mutex<FlowInner>,
}

/// Returns the flow to `Configuring` if an `apply` future is dropped while
/// its handler is still pending.
struct ApplyingGuard<'a> {
    orchestrator: &'a FlowOrchestrator,
}

impl Drop for ApplyingGuard<'_> {
    fn drop(&mut self) {
        let mut inner = self.orchestrator.lock();
        if let FlowState::Applying(id) = inner.state {
            warn!(flow_id = %self.orchestrator.id, action = %id, "apply abandoned before completion");
            inner.state = FlowState::Configuring(id);
        }
    }
}

impl FlowOrchestrator {
    /// Create an idle flow with an empty document.
    pub fn new(registry: ActionRegistry, handlers: ActionHandlers) -> Self {
        Self {
            id: Uuid::new_v4(),
            registry,
            handlers,
            inner: Mutex::new(FlowInner {
                state: FlowState::Idle,
                params: ActionParams::default(),
                document: String::new(),
                history: Vec::new(),
                next_sequence: 1,
            }),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    fn lock(&self) -> MutexGuard<'_, FlowInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> FlowState {
        self.lock().state
    }

    /// Definition of the selected action, if any.
    pub fn selected(&self) -> Option<&ActionDefinition> {
        self.state().action().map(|id| self.registry.get(id))
    }

    /// Select an action and reset its parameters to their defaults.
    pub fn select_action(&self, id: ActionId) -> DomainResult<()> {
        let mut inner = self.lock();
        if inner.state.is_applying() {
            return Err(DomainError::FlowBusy);
        }
        inner.state = FlowState::Configuring(id);
        inner.params = self.registry.get(id).default_params();
        Ok(())
    }

    /// Select an action by its user-facing name.
    pub fn select_action_named(&self, name: &str) -> DomainResult<ActionId> {
        let id = self.registry.lookup(name)?.id;
        self.select_action(id)?;
        Ok(id)
    }

    /// Set a parameter of the selected action.
    pub fn set_parameter(&self, key: &str, value: impl Into<ParameterValue>) -> DomainResult<()> {
        let mut inner = self.lock();
        let id = match inner.state {
            FlowState::Idle => return Err(DomainError::NoActionSelected),
            FlowState::Applying(_) => return Err(DomainError::FlowBusy),
            FlowState::Configuring(id) => id,
        };
        let value = self.registry.check_parameter(id, key, value.into())?;
        inner.params.insert(key, value);
        Ok(())
    }

    /// Current parameters of the selected action.
    pub fn params(&self) -> ActionParams {
        self.lock().params.clone()
    }

    pub fn document(&self) -> String {
        self.lock().document.clone()
    }

    /// Replace the whole document. Direct edits are not recorded in history.
    pub fn set_document(&self, text: impl Into<String>) -> DomainResult<()> {
        let mut inner = self.lock();
        if inner.state.is_applying() {
            return Err(DomainError::FlowBusy);
        }
        inner.document = text.into();
        Ok(())
    }

    /// Whether `apply` would currently get past validation.
    pub fn can_apply(&self) -> bool {
        let inner = self.lock();
        match inner.state {
            FlowState::Configuring(id) => self
                .registry
                .check_ready(id, &inner.document, &inner.params)
                .is_ok(),
            FlowState::Idle | FlowState::Applying(_) => false,
        }
    }

    /// Run the selected action and commit its outcome.
    ///
    /// On failure the document and history are left exactly as they were and
    /// the flow returns to `Configuring`.
    #[instrument(skip(self), fields(flow_id = %self.id))]
    pub async fn apply(&self) -> DomainResult<HistoryEntry> {
        let (id, document, params) = {
            let mut inner = self.lock();
            let id = match inner.state {
                FlowState::Idle => return Err(DomainError::NoActionSelected),
                FlowState::Applying(_) => return Err(DomainError::FlowBusy),
                FlowState::Configuring(id) => id,
            };
            self.registry.check_ready(id, &inner.document, &inner.params)?;
            inner.state = FlowState::Applying(id);
            (id, inner.document.clone(), inner.params.clone())
        };
        let _guard = ApplyingGuard { orchestrator: self };

        let outcome = self.handlers.handle(id, &document, &params).await;

        let mut inner = self.lock();
        inner.state = FlowState::Configuring(id);
        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(action = %id, error = %err, "action failed; document unchanged");
                return Err(err);
            }
        };

        inner.document = outcome.commit_to(&inner.document);
        let entry = HistoryEntry {
            sequence_number: inner.next_sequence,
            action: id,
            action_label: outcome.history_label,
            result_summary: outcome.result_text,
            input_word_count: word_count(&document),
            timestamp: Utc::now(),
        };
        inner.next_sequence += 1;
        inner.history.push(entry.clone());
        info!(
            action = %id,
            sequence = entry.sequence_number,
            effect = ?outcome.effect,
            "action applied"
        );
        Ok(entry)
    }

    /// Every committed action, oldest first.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.lock().history.clone()
    }

    /// The last `n` committed actions, oldest first.
    pub fn recent_history(&self, n: usize) -> Vec<HistoryEntry> {
        let inner = self.lock();
        let start = inner.history.len().saturating_sub(n);
        inner.history[start..].to_vec()
    }

    pub fn stats(&self) -> FlowStats {
        FlowStats::from_history(&self.lock().history)
    }
}
