//! Promptminer - an LLM inference miner for peer-to-peer prompting networks.
//!
//! This crate implements the request-handling policy of a single miner: it
//! receives a chat-style synapse, forwards the last turn to a hosted LLM
//! API, applies a refusal heuristic with one fallback substitution, accounts
//! token/cost usage, and always returns a well-formed response. Peer
//! discovery, identity, and transport belong to the host framework; the
//! host calls [`app::Miner::forward`] once per inbound request.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Synapse, usage accounting, fallback phrases
//! - [`error`] - Error types for the crate
//! - [`port`] - Trait definitions for the LLM backend and telemetry sink
//! - [`adapter`] - OpenAI client and tracing telemetry sink
//! - [`app`] - The miner itself
//! - [`cli`] - Operator commands
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use promptminer::adapter::llm::OpenAi;
//! use promptminer::app::Miner;
//! use promptminer::config::Config;
//! use promptminer::domain::Synapse;
//!
//! # async fn serve() -> promptminer::error::Result<()> {
//! let config = Config::default();
//! let llm = Arc::new(OpenAi::from_config(&config)?);
//! let miner = Miner::new(llm, &config);
//!
//! let synapse = miner.forward(Synapse::from_message("hello")).await;
//! println!("{}", synapse.completion.unwrap_or_default());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
