//! Configuration loading and validation.
//!
//! Configuration is loaded from a TOML file. Secrets are never config-file
//! fields: the API key comes from the `OPENAI_API_KEY` environment variable
//! (a `.env` file is honored via dotenvy at startup).

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::{ConfigError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Miner behavior and model parameters.
    #[serde(default)]
    pub miner: MinerConfig,
    /// Per-token pricing used for cost accounting.
    #[serde(default)]
    pub pricing: PricingConfig,
    /// Telemetry emission.
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    /// Logging level and format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Miner configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct MinerConfig {
    /// Model identifier sent to the API.
    #[serde(default = "default_model")]
    pub model: String,
    /// Maximum tokens to generate per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
    /// Sampling temperature (0.0 to 2.0).
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// System prompt prepended to every request.
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
    /// Request the serving loop to stop after the next forward call.
    /// Read after every request, not only on failure.
    #[serde(default)]
    pub stop_on_forward_exception: bool,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            system_prompt: default_system_prompt(),
            stop_on_forward_exception: false,
        }
    }
}

/// Per-1K-token prices in USD.
///
/// The chat-completions API reports token counts, not dollars, so cost
/// accounting multiplies counts by these prices. Zero (the default) disables
/// cost accounting while keeping token counters live.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PricingConfig {
    #[serde(default)]
    pub prompt_per_1k: Decimal,
    #[serde(default)]
    pub completion_per_1k: Decimal,
}

impl PricingConfig {
    /// Dollar cost of a call given its token counts.
    #[must_use]
    pub fn cost(&self, prompt_tokens: u64, completion_tokens: u64) -> Decimal {
        (Decimal::from(prompt_tokens) * self.prompt_per_1k
            + Decimal::from(completion_tokens) * self.completion_per_1k)
            / Decimal::from(1000)
    }
}

/// Telemetry configuration.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TelemetryConfig {
    /// Emit one structured event per served request.
    #[serde(default)]
    pub enabled: bool,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));

        match self.format.as_str() {
            "json" => {
                fmt().json().with_env_filter(filter).init();
            }
            _ => {
                fmt().with_env_filter(filter).init();
            }
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is absent.
    ///
    /// Any other read or parse failure is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    fn validate(&self) -> Result<()> {
        if self.miner.model.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.miner.system_prompt.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "system_prompt",
                reason: "cannot be empty".into(),
            }
            .into());
        }
        if self.miner.max_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_tokens",
                reason: "must be greater than zero".into(),
            }
            .into());
        }
        if !(0.0..=2.0).contains(&self.miner.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: format!("{} is outside [0.0, 2.0]", self.miner.temperature),
            }
            .into());
        }
        if self.pricing.prompt_per_1k < Decimal::ZERO
            || self.pricing.completion_per_1k < Decimal::ZERO
        {
            return Err(ConfigError::InvalidValue {
                field: "pricing",
                reason: "prices cannot be negative".into(),
            }
            .into());
        }
        Ok(())
    }
}

fn default_model() -> String {
    "gpt-4-turbo".into()
}

const fn default_max_tokens() -> usize {
    4096
}

fn default_temperature() -> f64 {
    0.2
}

fn default_system_prompt() -> String {
    "You are a friendly chatbot who always responds concisely and helpfully. \
     You are honest about things you don't know."
        .into()
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.miner.model, "gpt-4-turbo");
        assert_eq!(config.miner.max_tokens, 4096);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn pricing_cost_scales_per_thousand_tokens() {
        let pricing = PricingConfig {
            prompt_per_1k: dec!(0.01),
            completion_per_1k: dec!(0.03),
        };
        assert_eq!(pricing.cost(1000, 1000), dec!(0.04));
        assert_eq!(pricing.cost(500, 0), dec!(0.005));
        assert_eq!(pricing.cost(0, 0), dec!(0));
    }

    #[test]
    fn zero_pricing_costs_nothing() {
        let pricing = PricingConfig::default();
        assert_eq!(pricing.cost(123_456, 654_321), Decimal::ZERO);
    }
}
