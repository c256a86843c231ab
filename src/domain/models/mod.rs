pub mod action;
pub mod config;
pub mod flow;
pub mod insight;
pub mod markup;
pub mod optimization;
pub mod style;

pub use action::{
    ActionDefinition, ActionId, ActionOutcome, ActionParams, DocumentEffect, ParameterKind,
    ParameterSpec, ParameterValue,
};
pub use config::{
    Config, ESCALATION_STEP, LoggingConfig, MAX_ESCALATIONS, OptimizerConfig, ProviderConfig,
    RateLimitConfig,
};
pub use flow::{FlowState, FlowStats, HistoryEntry};
pub use insight::{DetectionReport, ResearchReport, Source, TextAnalytics, word_count};
pub use markup::{MarkupSpan, SpanKind};
pub use optimization::{AttemptRecord, OptimizationResult};
pub use style::{
    CitationStyle, Intensity, IntensityBand, ParaphraseMode, RewriteStyle, SummaryFormat, Tone,
};
