use std::time::Duration;

use crate::config::llm_provider::LlmProvider;

/// Timeout applied when a profile does not set one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 9;

/// Configuration for one model profile (generation or embedding).
///
/// # Examples
///
/// ```
/// use ai_llm_service::{LlmModelConfig, LlmProvider};
///
/// let cfg = LlmModelConfig {
///     provider: LlmProvider::Ollama,
///     model: "qwen2.5-coder:7b".to_string(),
///     endpoint: "http://localhost:11434".to_string(),
///     api_key: None,
///     max_tokens: Some(1024),
///     temperature: Some(0.2),
///     top_p: None,
///     timeout_secs: Some(9),
/// };
/// assert_eq!(cfg.timeout().as_secs(), 9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LlmModelConfig {
    /// Backend serving this profile.
    pub provider: LlmProvider,

    /// Model identifier (e.g. `"llama3.1:8b"`, `"nomic-embed-text"`).
    pub model: String,

    /// Base URL of the backend, without the API path.
    pub endpoint: String,

    /// Bearer token for providers that require authentication.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff.
    pub top_p: Option<f32>,

    /// Per-call timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl LlmModelConfig {
    /// Effective per-call timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS))
    }
}
