//! OpenAI LLM client.
//!
//! Implements the [`Llm`] trait against the Chat Completions API, parsing
//! the returned `usage` object so the miner can account tokens and cost.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::config::{Config, PricingConfig};
use crate::domain::Usage;
use crate::error::{ConfigError, Error, Result};
use crate::port::{ChatRequest, Completion, Llm};

/// OpenAI Chat Completions API endpoint.
const API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI API client.
#[derive(Debug)]
pub struct OpenAi {
    client: Client,
    api_key: String,
    model: String,
    max_tokens: usize,
    temperature: f64,
    pricing: PricingConfig,
}

impl OpenAi {
    /// Create a new OpenAI client with explicit configuration.
    #[must_use]
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        max_tokens: usize,
        temperature: f64,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens,
            temperature,
            pricing,
        }
    }

    /// Create a client from configuration, reading the API key from the
    /// `OPENAI_API_KEY` environment variable.
    ///
    /// The key is never a config-file field. Construction fails fast when it
    /// is absent so a misconfigured miner cannot serve at all.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingField`] if the variable is not set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            Error::Config(ConfigError::MissingField {
                field: "OPENAI_API_KEY",
            })
        })?;
        Ok(Self::new(
            api_key,
            config.miner.model.clone(),
            config.miner.max_tokens,
            config.miner.temperature,
            config.pricing,
        ))
    }
}

#[derive(Serialize)]
struct Request {
    model: String,
    max_tokens: usize,
    temperature: f64,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
    usage: Option<ApiUsage>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

#[derive(Deserialize)]
struct ApiUsage {
    prompt_tokens: u64,
    completion_tokens: u64,
    total_tokens: u64,
}

#[async_trait]
impl Llm for OpenAi {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, request: &ChatRequest) -> Result<Completion> {
        let body = Request {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![
                Message {
                    role: "system",
                    content: request.system.clone(),
                },
                Message {
                    role: "user",
                    content: request.user.clone(),
                },
            ],
        };

        let response = self
            .client
            .post(API_URL)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Api(e.to_string()))?
            .json::<Response>()
            .await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
                total_cost: self.pricing.cost(u.prompt_tokens, u.completion_tokens),
            })
            .unwrap_or_default();

        Ok(Completion { text, usage })
    }
}
