//! Application layer: the miner's request-handling policy.

mod miner;

pub use miner::Miner;
