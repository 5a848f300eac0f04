//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports are the extension points adapters implement to integrate with
//! external systems: the hosted LLM API and the telemetry sink.

mod llm;
mod telemetry;

pub use llm::{ChatRequest, Completion, Llm};
pub use telemetry::{EventSink, ForwardEvent};
