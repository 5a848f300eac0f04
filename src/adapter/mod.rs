//! Implementations of ports (hexagonal adapters).

pub mod llm;
pub mod telemetry;
