//! Ollama service for text generation and embeddings.
//!
//! Endpoints derived from [`LlmModelConfig::endpoint`]:
//! - `POST {endpoint}/api/generate`   — non-streaming generation (`stream=false`)
//! - `POST {endpoint}/api/embeddings` — embeddings retrieval

use std::time::Instant;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

/// Thin client for Ollama.
///
/// Holds one `reqwest::Client` with the profile timeout applied.
#[derive(Debug)]
pub struct OllamaService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_generate: String,
    url_embeddings: String,
}

impl OllamaService {
    /// Creates a new [`OllamaService`] from the given config.
    ///
    /// # Errors
    /// - `InvalidProvider` if `cfg.provider` is not Ollama
    /// - `InvalidEndpoint` if `cfg.endpoint` lacks an http(s) scheme
    /// - [`AiLlmError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::Ollama {
            return Err(
                ProviderError::new(Provider::Ollama, ProviderErrorKind::InvalidProvider).into(),
            );
        }

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::InvalidEndpoint(cfg.endpoint.clone()),
            )
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_generate = format!("{base}/api/generate");
        let url_embeddings = format!("{base}/api/embeddings");

        Ok(Self {
            client,
            cfg,
            url_generate,
            url_embeddings,
        })
    }

    /// Non-streaming generation via `/api/generate`.
    ///
    /// `system` is forwarded as Ollama's `system` field when present.
    #[instrument(target = "ai_llm_service::ollama", skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = GenerateRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            target: "ai_llm_service::ollama",
            prompt_len = prompt.len(),
            "POST {}", self.url_generate
        );
        let resp = self.client.post(&self.url_generate).json(&body).send().await?;

        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_generate, started).await);
        }

        let out: GenerateResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode(format!("{e}; ensure `stream=false` is used")),
            )
        })?;

        debug!(
            target: "ai_llm_service::ollama",
            latency_ms = started.elapsed().as_millis(),
            "generation completed"
        );
        Ok(out.response)
    }

    /// Embeddings via `/api/embeddings`.
    #[instrument(target = "ai_llm_service::ollama", skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            prompt: input,
        };

        debug!(
            target: "ai_llm_service::ollama",
            input_len = input.len(),
            "POST {}", self.url_embeddings
        );
        let resp = self
            .client
            .post(&self.url_embeddings)
            .json(&body)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_embeddings, started).await);
        }

        let out: EmbeddingsResponse = resp.json().await.map_err(|e| {
            ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode(format!("{e}; expected `{{ embedding: number[] }}`")),
            )
        })?;

        if out.embedding.is_empty() {
            return Err(ProviderError::new(
                Provider::Ollama,
                ProviderErrorKind::Decode("empty embedding".into()),
            )
            .into());
        }

        Ok(out.embedding)
    }

    pub fn config(&self) -> &LlmModelConfig {
        &self.cfg
    }

    async fn status_error(
        &self,
        resp: reqwest::Response,
        url: &str,
        started: Instant,
    ) -> AiLlmError {
        let status = resp.status();
        let text = resp.text().await.unwrap_or_default();
        let snippet = make_snippet(&text);

        error!(
            target: "ai_llm_service::ollama",
            %status,
            %url,
            %snippet,
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "Ollama returned non-success status"
        );

        ProviderError::new(
            Provider::Ollama,
            ProviderErrorKind::HttpStatus(HttpError {
                status,
                url: url.to_string(),
                snippet,
            }),
        )
        .into()
    }
}

/* ==========================
HTTP payloads & options
========================== */

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    stream: bool,
    options: GenerateOptions,
}

impl<'a> GenerateRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        Self {
            model: &cfg.model,
            prompt,
            system,
            stream: false,
            options: GenerateOptions {
                temperature: cfg.temperature,
                top_p: cfg.top_p,
                num_predict: cfg.max_tokens,
            },
        }
    }
}

/// Subset of Ollama `options`.
#[derive(Debug, Default, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(provider: LlmProvider, endpoint: &str) -> LlmModelConfig {
        LlmModelConfig {
            provider,
            model: "llama3.1".into(),
            endpoint: endpoint.into(),
            api_key: None,
            max_tokens: Some(64),
            temperature: Some(0.2),
            top_p: None,
            timeout_secs: Some(5),
        }
    }

    #[test]
    fn rejects_foreign_provider_and_bad_endpoint() {
        assert!(OllamaService::new(cfg(LlmProvider::OpenAI, "http://x")).is_err());
        assert!(OllamaService::new(cfg(LlmProvider::Ollama, "localhost:11434")).is_err());
    }

    #[test]
    fn builds_api_urls_without_double_slash() {
        let svc = OllamaService::new(cfg(LlmProvider::Ollama, "http://localhost:11434/")).unwrap();
        assert_eq!(svc.url_generate, "http://localhost:11434/api/generate");
        assert_eq!(svc.url_embeddings, "http://localhost:11434/api/embeddings");
    }

    #[test]
    fn generate_request_carries_system_and_options() {
        let c = cfg(LlmProvider::Ollama, "http://localhost:11434");
        let body = GenerateRequest::from_cfg(&c, "hi", Some("be brief"));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["system"], "be brief");
        assert_eq!(json["options"]["num_predict"], 64);
        assert!(json["options"].get("top_p").is_none());
    }
}
