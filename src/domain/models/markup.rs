//! Change-tracking markup model.
//!
//! A rewritten document is an ordered run of spans. Unchanged and inserted
//! spans form the human-facing text; unchanged and deleted spans approximate
//! the text before the edit.

use serde::{Deserialize, Serialize};

/// Classification of a markup fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    Unchanged,
    Deleted,
    Inserted,
}

impl SpanKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unchanged => "unchanged",
            Self::Deleted => "deleted",
            Self::Inserted => "inserted",
        }
    }
}

/// A typed fragment of a rewritten text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupSpan {
    pub kind: SpanKind,
    pub content: String,
}

impl MarkupSpan {
    pub fn unchanged(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Unchanged,
            content: content.into(),
        }
    }

    pub fn deleted(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Deleted,
            content: content.into(),
        }
    }

    pub fn inserted(content: impl Into<String>) -> Self {
        Self {
            kind: SpanKind::Inserted,
            content: content.into(),
        }
    }

    /// Whether this span is part of the text a reader sees after the edit.
    pub fn is_visible(&self) -> bool {
        self.kind != SpanKind::Deleted
    }

    /// Whether this span is an edit (deletion or insertion).
    pub fn is_edit(&self) -> bool {
        self.kind != SpanKind::Unchanged
    }
}
