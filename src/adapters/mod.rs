//! Adapters implementing the collaborator ports.

pub mod llm;
pub mod scripted;

pub use llm::LlmWriter;
pub use scripted::ScriptedCollaborator;
