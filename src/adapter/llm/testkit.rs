//! Scripted mock LLM for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::port::{ChatRequest, Completion, Llm};

enum Scripted {
    Reply(Completion),
    Fail(String),
}

/// Mock LLM replaying a script of replies and failures.
///
/// Records every request it receives so tests can assert on prompts and
/// call counts.
#[derive(Default)]
pub struct MockLlm {
    script: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<ChatRequest>>,
}

impl MockLlm {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a reply with the given text and usage.
    #[must_use]
    pub fn with_reply(self, completion: Completion) -> Self {
        self.script.lock().push_back(Scripted::Reply(completion));
        self
    }

    /// Queue a failure with the given API error message.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.script.lock().push_back(Scripted::Fail(message.into()));
        self
    }

    /// Requests received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ChatRequest> {
        self.calls.lock().clone()
    }

    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl Llm for MockLlm {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Completion> {
        self.calls.lock().push(request.clone());
        match self.script.lock().pop_front() {
            Some(Scripted::Reply(completion)) => Ok(completion),
            Some(Scripted::Fail(message)) => Err(Error::Api(message)),
            None => Ok(Completion::default()),
        }
    }
}
