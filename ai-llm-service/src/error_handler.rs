//! Unified error handling for `ai-llm-service`.
//!
//! A single top-level error type [`AiLlmError`] is exposed for the whole
//! library; domain-specific errors live in nested enums ([`ConfigError`],
//! [`HealthError`], [`ProviderError`]). Small env helpers return the unified
//! [`Result<T>`] alias.
//!
//! All messages carry the `[AI LLM Service]` prefix for attribution in logs.

use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

/* ------------------------------------------------------------------------- */
/* Public result alias                                                       */
/* ------------------------------------------------------------------------- */

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, AiLlmError>;

/* ------------------------------------------------------------------------- */
/* Top-level error                                                           */
/* ------------------------------------------------------------------------- */

/// Top-level error for the `ai-llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AiLlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Health-check errors.
    #[error(transparent)]
    Health(#[from] HealthError),

    /// Provider request/response errors (status, decode, empty output).
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error.
    #[error("[AI LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),

    /// Operation exceeded the configured timeout.
    #[error("[AI LLM Service] operation timed out after {0:?}")]
    Timeout(Duration),
}

impl AiLlmError {
    /// `true` for [`AiLlmError::Timeout`] and transport-level timeouts.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout(_) => true,
            Self::HttpTransport(e) => e.is_timeout(),
            _ => false,
        }
    }
}

/* ------------------------------------------------------------------------- */
/* Config errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised while reading profiles from the environment.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("[AI LLM Service] missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// A number failed to parse (ports, limits, timeouts).
    #[error("[AI LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        /// Variable name (e.g. `LLM_MAX_TOKENS`).
        var: &'static str,
        /// Human-readable reason (e.g. `expected u32`).
        reason: &'static str,
    },

    /// Unsupported provider in `LLM_PROVIDER`.
    #[error("[AI LLM Service] unsupported provider: {0}")]
    UnsupportedProvider(String),

    /// Value had the wrong format (e.g. invalid URL).
    #[error("[AI LLM Service] invalid format in {var}: {reason}")]
    InvalidFormat {
        /// Variable name (e.g. `OLLAMA_URL`).
        var: &'static str,
        /// Explanation.
        reason: &'static str,
    },
}

/* ------------------------------------------------------------------------- */
/* Provider errors                                                           */
/* ------------------------------------------------------------------------- */

/// Backend that produced a [`ProviderError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Ollama,
    OpenAI,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Ollama => f.write_str("Ollama"),
            Provider::OpenAI => f.write_str("OpenAI"),
        }
    }
}

/// Non-2xx response details shared by provider and health errors.
#[derive(Debug, Clone)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    /// First characters of the response body.
    pub snippet: String,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {} from {}: {}", self.status, self.url, self.snippet)
    }
}

/// What went wrong inside a provider call.
#[derive(Debug)]
pub enum ProviderErrorKind {
    InvalidProvider,
    MissingApiKey,
    InvalidEndpoint(String),
    HttpStatus(HttpError),
    Decode(String),
    EmptyChoices,
}

impl fmt::Display for ProviderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidProvider => f.write_str("config is for a different provider"),
            Self::MissingApiKey => f.write_str("missing API key"),
            Self::InvalidEndpoint(e) => write!(f, "invalid endpoint: {e}"),
            Self::HttpStatus(h) => write!(f, "{h}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
            Self::EmptyChoices => f.write_str("response contained no completion"),
        }
    }
}

/// Error returned by a concrete provider client.
#[derive(Debug, Error)]
#[error("[AI LLM Service] {provider}: {kind}")]
pub struct ProviderError {
    pub provider: Provider,
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(provider: Provider, kind: ProviderErrorKind) -> Self {
        Self { provider, kind }
    }
}

/* ------------------------------------------------------------------------- */
/* Health errors                                                             */
/* ------------------------------------------------------------------------- */

/// Errors raised by strict provider probes.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HealthError {
    /// Upstream returned a non-successful HTTP status.
    #[error("[AI LLM Service] health probe failed: {0}")]
    HttpStatus(HttpError),

    /// Probe could not be built or decoded.
    #[error("[AI LLM Service] health decode error: {0}")]
    Decode(String),
}

/* ------------------------------------------------------------------------- */
/* Helpers                                                                   */
/* ------------------------------------------------------------------------- */

/// Trims a response body to a log-friendly snippet.
pub fn make_snippet(text: &str) -> String {
    const MAX: usize = 240;
    let trimmed = text.trim();
    if trimmed.chars().count() <= MAX {
        trimmed.to_string()
    } else {
        let mut s: String = trimmed.chars().take(MAX).collect();
        s.push('…');
        s
    }
}

/// Fetches a required, non-empty environment variable.
///
/// # Errors
/// [`ConfigError::MissingVar`] if the variable is absent or empty.
pub fn must_env(name: &'static str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(name).into()),
    }
}

/// Reads an optional, non-empty environment variable.
pub fn opt_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match opt_env(name) {
        Some(v) => v.trim().parse::<u32>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        None => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match opt_env(name) {
        Some(v) => v.trim().parse::<u64>().map(Some).map_err(|_| {
            AiLlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        None => Ok(None),
    }
}

/// Validates that an HTTP endpoint starts with `http://` or `https://`.
pub fn validate_http_endpoint(var: &'static str, value: &str) -> Result<()> {
    let v = value.trim();
    if v.starts_with("http://") || v.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::InvalidFormat {
            var,
            reason: "must start with http:// or https://",
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snippet_is_trimmed_and_bounded() {
        assert_eq!(make_snippet("  short  "), "short");
        let long = "x".repeat(1000);
        let s = make_snippet(&long);
        assert_eq!(s.chars().count(), 241);
        assert!(s.ends_with('…'));
    }

    #[test]
    fn endpoint_validation() {
        assert!(validate_http_endpoint("OLLAMA_URL", "http://localhost:11434").is_ok());
        assert!(validate_http_endpoint("OLLAMA_URL", "localhost:11434").is_err());
    }

    #[test]
    fn timeout_is_recognised() {
        assert!(AiLlmError::Timeout(Duration::from_secs(5)).is_timeout());
        let other: AiLlmError = ConfigError::MissingVar("X").into();
        assert!(!other.is_timeout());
    }
}
