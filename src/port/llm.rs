//! LLM port: one completion call against a hosted model.

use async_trait::async_trait;

use crate::domain::Usage;
use crate::error::Result;

/// A system + user prompt pair for a single completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
}

impl ChatRequest {
    #[must_use]
    pub fn new(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
        }
    }
}

/// Completion text plus the usage the API reported for it.
#[derive(Debug, Clone, Default)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
}

/// LLM completion client.
///
/// Implementations must be thread-safe (`Send + Sync`); the miner suspends
/// on `complete` and imposes no internal timeout, so any deadline comes from
/// the implementation's own transport.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the text with its usage.
    async fn complete(&self, request: &ChatRequest) -> Result<Completion>;
}
