//! Profile configs loaded strictly from environment variables.
//!
//! Two roles are served:
//!
//! - **Generation** → answers migration questions
//! - **Embedding**  → vectors for indexing and retrieval
//!
//! # Environment variables
//!
//! Common:
//! - `LLM_PROVIDER` = `ollama` (default) or `openai`
//! - `LLM_MAX_TOKENS` = optional max tokens (u32)
//! - `GENERATION_TIMEOUT_SECS` = default 9
//! - `EMBEDDING_TIMEOUT_SECS` = default 5
//! - `EMBEDDING_MODEL` = embedding model (mandatory)
//!
//! Ollama:
//! - `OLLAMA_URL` or `OLLAMA_PORT` = endpoint (mandatory)
//! - `OLLAMA_MODEL` = generation model (mandatory)
//!
//! OpenAI:
//! - `OPENAI_URL` = endpoint (default `https://api.openai.com`)
//! - `OPENAI_API_KEY` = bearer token (mandatory)
//! - `OPENAI_MODEL` = generation model (mandatory)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, ConfigError, env_opt_u32, env_opt_u64, must_env, opt_env,
        validate_http_endpoint,
    },
};

const DEFAULT_GENERATION_TIMEOUT_SECS: u64 = 9;
const DEFAULT_EMBEDDING_TIMEOUT_SECS: u64 = 5;
const DEFAULT_OPENAI_URL: &str = "https://api.openai.com";

/// Reads `LLM_PROVIDER`, defaulting to Ollama.
pub fn provider_from_env() -> Result<LlmProvider, AiLlmError> {
    match opt_env("LLM_PROVIDER") {
        Some(raw) => Ok(raw.parse::<LlmProvider>()?),
        None => Ok(LlmProvider::Ollama),
    }
}

/// Resolves the Ollama endpoint.
///
/// Precedence: `OLLAMA_URL`, then `OLLAMA_PORT` → `http://localhost:{port}`.
pub(crate) fn resolve_ollama_endpoint(
    url: Option<String>,
    port: Option<String>,
) -> Result<String, AiLlmError> {
    if let Some(url) = url {
        validate_http_endpoint("OLLAMA_URL", &url)?;
        return Ok(url.trim().to_string());
    }
    if let Some(port) = port {
        let port = port
            .trim()
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidNumber {
                var: "OLLAMA_PORT",
                reason: "expected u16 (1..=65535)",
            })?;
        return Ok(format!("http://localhost:{port}"));
    }
    Err(ConfigError::MissingVar("OLLAMA_URL or OLLAMA_PORT").into())
}

fn ollama_endpoint() -> Result<String, AiLlmError> {
    resolve_ollama_endpoint(opt_env("OLLAMA_URL"), opt_env("OLLAMA_PORT"))
}

fn openai_endpoint() -> Result<String, AiLlmError> {
    let url = opt_env("OPENAI_URL").unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
    validate_http_endpoint("OPENAI_URL", &url)?;
    Ok(url.trim().to_string())
}

/// Builds the **generation** profile for the configured provider.
///
/// Defaults: `temperature = 0.2`, timeout 9 s.
pub fn config_generation() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env()?;
    let max_tokens = env_opt_u32("LLM_MAX_TOKENS")?;
    let timeout_secs = env_opt_u64("GENERATION_TIMEOUT_SECS")?
        .unwrap_or(DEFAULT_GENERATION_TIMEOUT_SECS);

    let (endpoint, model, api_key) = match provider {
        LlmProvider::Ollama => (ollama_endpoint()?, must_env("OLLAMA_MODEL")?, None),
        LlmProvider::OpenAI => (
            openai_endpoint()?,
            must_env("OPENAI_MODEL")?,
            Some(must_env("OPENAI_API_KEY")?),
        ),
    };

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens,
        temperature: Some(0.2),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

/// Builds the **embedding** profile for the configured provider.
///
/// Defaults: `temperature = 0.0`, timeout 5 s.
pub fn config_embedding() -> Result<LlmModelConfig, AiLlmError> {
    let provider = provider_from_env()?;
    let model = must_env("EMBEDDING_MODEL")?;
    let timeout_secs =
        env_opt_u64("EMBEDDING_TIMEOUT_SECS")?.unwrap_or(DEFAULT_EMBEDDING_TIMEOUT_SECS);

    let (endpoint, api_key) = match provider {
        LlmProvider::Ollama => (ollama_endpoint()?, None),
        LlmProvider::OpenAI => (openai_endpoint()?, Some(must_env("OPENAI_API_KEY")?)),
    };

    Ok(LlmModelConfig {
        provider,
        model,
        endpoint,
        api_key,
        max_tokens: None,
        temperature: Some(0.0),
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_wins_over_port() {
        let ep = resolve_ollama_endpoint(
            Some("http://ollama:11434".into()),
            Some("1234".into()),
        )
        .unwrap();
        assert_eq!(ep, "http://ollama:11434");
    }

    #[test]
    fn port_maps_to_localhost() {
        let ep = resolve_ollama_endpoint(None, Some("11434".into())).unwrap();
        assert_eq!(ep, "http://localhost:11434");
    }

    #[test]
    fn invalid_or_missing_endpoint_is_config_error() {
        assert!(matches!(
            resolve_ollama_endpoint(None, Some("not-a-port".into())),
            Err(AiLlmError::Config(ConfigError::InvalidNumber { .. }))
        ));
        assert!(matches!(
            resolve_ollama_endpoint(None, None),
            Err(AiLlmError::Config(ConfigError::MissingVar(_)))
        ));
        assert!(matches!(
            resolve_ollama_endpoint(Some("ollama:11434".into()), None),
            Err(AiLlmError::Config(ConfigError::InvalidFormat { .. }))
        ));
    }
}
