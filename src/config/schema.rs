use serde::{Deserialize, Serialize};

use crate::error::ExtractError;

// ─── Top-level config ──────────────────────────────────────────────

/// Extractor configuration.
///
/// Every field has a safe fallback so an absent or partial config file never
/// hard-fails; the defaults are the documented literals for a stock local
/// Ollama install.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractorConfig {
    #[serde(default)]
    pub endpoint: EndpointConfig,

    #[serde(default)]
    pub retry: RetryConfig,
}

impl ExtractorConfig {
    /// Reject configurations that would make the pipeline degenerate.
    pub fn validate(&self) -> Result<(), ExtractError> {
        if self.endpoint.base_url.trim().is_empty() {
            return Err(ExtractError::Config("endpoint.base_url is empty".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ExtractError::Config(
                "retry.max_attempts must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

// ─── Model endpoint ────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Base URL of the Ollama-compatible server.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Sampling temperature; structured output wants it low.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
}

fn default_base_url() -> String {
    "http://localhost:11434".into()
}

fn default_model() -> String {
    "llama3".into()
}

fn default_temperature() -> f64 {
    0.2
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
        }
    }
}

// ─── Retry policy ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts per call, initial try included.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Fixed pause between attempts, in milliseconds. No jitter, no growth:
    /// model-output variance is not load-dependent.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_max_attempts() -> u32 {
    2
}

fn default_delay_ms() -> u64 {
    1000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}
