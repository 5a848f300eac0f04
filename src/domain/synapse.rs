//! The request/response message object exchanged between peers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A chat-style synapse: the conversation so far plus the miner's answer.
///
/// `roles` and `messages` are parallel sequences of conversation turns
/// supplied by the caller. The miner consults only the last element of each
/// and populates `completion` before handing the synapse back to the
/// transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Synapse {
    /// Turn roles, e.g. `["user"]` or `["system", "user"]`.
    pub roles: Vec<String>,
    /// Turn contents, parallel to `roles`.
    pub messages: Vec<String>,
    /// The miner's answer, absent until the synapse has been served.
    #[serde(default)]
    pub completion: Option<String>,
}

impl Synapse {
    /// Create a new synapse with no completion.
    #[must_use]
    pub fn new(roles: Vec<String>, messages: Vec<String>) -> Self {
        Self {
            roles,
            messages,
            completion: None,
        }
    }

    /// Create a single-turn user synapse.
    #[must_use]
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(vec!["user".into()], vec![message.into()])
    }

    /// The last role/message pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyRequest`] if either sequence is empty.
    pub fn last_turn(&self) -> Result<(&str, &str)> {
        let role = self
            .roles
            .last()
            .ok_or(Error::EmptyRequest { field: "roles" })?;
        let message = self
            .messages
            .last()
            .ok_or(Error::EmptyRequest { field: "messages" })?;
        Ok((role, message))
    }
}
