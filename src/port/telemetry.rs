//! Telemetry port for per-request observability events.

use std::time::Duration;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::UsageReport;

/// One structured event per served forward call.
#[derive(Debug, Clone)]
pub struct ForwardEvent {
    pub request_id: Uuid,
    /// Wall-clock time from receipt to the final completion.
    pub elapsed: Duration,
    /// The user message that was served.
    pub prompt: String,
    /// The completion handed back to the caller.
    pub completion: String,
    pub system_prompt: String,
    /// Usage of the primary API call plus accumulated totals.
    pub usage: UsageReport,
}

/// Sink for forward events.
#[async_trait]
pub trait EventSink: Send + Sync {
    async fn record(&self, event: &ForwardEvent);
}
