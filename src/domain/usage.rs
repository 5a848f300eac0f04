//! Token and cost accounting for served requests.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Token counts and dollar cost of a single API call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: Decimal,
}

/// Monotone usage counters over a miner's lifetime.
///
/// One accumulator per miner instance; callers serialize access (the miner
/// keeps it behind a mutex so a concurrent host cannot lose increments).
#[derive(Debug, Default)]
pub struct UsageAccumulator {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
    total_cost: Decimal,
}

impl UsageAccumulator {
    /// Add one call's usage and return the per-call + accumulated snapshot.
    pub fn record(&mut self, usage: &Usage) -> UsageReport {
        self.prompt_tokens += usage.prompt_tokens;
        self.completion_tokens += usage.completion_tokens;
        self.total_tokens += usage.total_tokens;
        self.total_cost += usage.total_cost;

        UsageReport {
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            total_cost: usage.total_cost,
            accumulated_prompt_tokens: self.prompt_tokens,
            accumulated_completion_tokens: self.completion_tokens,
            accumulated_total_tokens: self.total_tokens,
            accumulated_total_cost: self.total_cost,
        }
    }

    /// Accumulated totals so far, as a single usage value.
    #[must_use]
    pub fn totals(&self) -> Usage {
        Usage {
            prompt_tokens: self.prompt_tokens,
            completion_tokens: self.completion_tokens,
            total_tokens: self.total_tokens,
            total_cost: self.total_cost,
        }
    }
}

/// Snapshot attached to each telemetry event: the call that was just served
/// plus the running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UsageReport {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
    pub total_cost: Decimal,
    pub accumulated_prompt_tokens: u64,
    pub accumulated_completion_tokens: u64,
    pub accumulated_total_tokens: u64,
    pub accumulated_total_cost: Decimal,
}
