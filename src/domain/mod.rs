//! Domain types shared across ports and adapters.

mod fallback;
mod synapse;
mod usage;

pub use fallback::FallbackPhrases;
pub use synapse::Synapse;
pub use usage::{Usage, UsageAccumulator, UsageReport};
