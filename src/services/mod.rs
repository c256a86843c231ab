pub mod action_handlers;
pub mod action_registry;
pub mod flow_orchestrator;
pub mod markup_codec;
pub mod optimizer;

pub use action_handlers::ActionHandlers;
pub use action_registry::ActionRegistry;
pub use flow_orchestrator::FlowOrchestrator;
pub use markup_codec::MarkupCodec;
pub use optimizer::Optimizer;
