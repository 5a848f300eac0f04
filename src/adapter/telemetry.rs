//! Telemetry sinks.

use async_trait::async_trait;
use tracing::info;

use crate::port::{EventSink, ForwardEvent};

/// Sink that emits forward events as structured tracing records.
///
/// Stands in for an external experiment tracker; anything consuming the
/// miner's logs (json format included) sees one record per served request.
#[derive(Debug, Default)]
pub struct LogSink;

impl LogSink {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSink for LogSink {
    async fn record(&self, event: &ForwardEvent) {
        info!(
            request_id = %event.request_id,
            elapsed_ms = event.elapsed.as_millis() as u64,
            prompt = %event.prompt,
            completion = %event.completion,
            system_prompt = %event.system_prompt,
            prompt_tokens = event.usage.prompt_tokens,
            completion_tokens = event.usage.completion_tokens,
            total_tokens = event.usage.total_tokens,
            total_cost = %event.usage.total_cost,
            accumulated_prompt_tokens = event.usage.accumulated_prompt_tokens,
            accumulated_completion_tokens = event.usage.accumulated_completion_tokens,
            accumulated_total_tokens = event.usage.accumulated_total_tokens,
            accumulated_total_cost = %event.usage.accumulated_total_cost,
            "forward served"
        );
    }
}
