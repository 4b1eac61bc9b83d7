//! Liveness probes for the configured LLM backends.
//!
//! - Ollama: `GET {endpoint}/api/tags`, model looked up in `models[].name`
//! - OpenAI: `GET {endpoint}/v1/models` with bearer auth, model looked up in `data[].id`
//!
//! [`HealthService::check`] never fails: errors become `ok = false`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::llm_model_config::LlmModelConfig;
use crate::config::llm_provider::LlmProvider;
use crate::error_handler::{AiLlmError, HealthError, HttpError, make_snippet};

/// Health snapshot for a single profile, serializable for `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub provider: String,
    pub endpoint: String,
    pub model: String,
    pub ok: bool,
    pub latency_ms: u128,
    pub message: String,
}

impl HealthStatus {
    fn new(cfg: &LlmModelConfig, ok: bool, latency_ms: u128, message: impl Into<String>) -> Self {
        Self {
            provider: format!("{:?}", cfg.provider),
            endpoint: cfg.endpoint.clone(),
            model: cfg.model.clone(),
            ok,
            latency_ms,
            message: message.into(),
        }
    }
}

#[derive(Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Deserialize)]
struct OllamaTag {
    name: String,
}

#[derive(Deserialize)]
struct OpenAiModels {
    #[serde(default)]
    data: Vec<OpenAiModel>,
}

#[derive(Deserialize)]
struct OpenAiModel {
    id: String,
}

/// Health checker reusing one HTTP client.
#[derive(Debug)]
pub struct HealthService {
    client: reqwest::Client,
}

impl HealthService {
    /// Creates a checker whose probes time out after `timeout_secs` (default 5).
    pub fn new(timeout_secs: Option<u64>) -> Result<Self, AiLlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs.unwrap_or(5)))
            .build()?;
        Ok(Self { client })
    }

    /// Probes one profile; failures are folded into the returned status.
    pub async fn check(&self, cfg: &LlmModelConfig) -> HealthStatus {
        let started = Instant::now();
        match self.probe(cfg).await {
            Ok(models) => {
                let latency = started.elapsed().as_millis();
                let found = models.iter().any(|m| model_matches(m, &cfg.model));
                debug!(
                    target: "ai_llm_service::health",
                    provider = ?cfg.provider,
                    model = %cfg.model,
                    found,
                    latency_ms = latency,
                    "health probe completed"
                );
                if found {
                    HealthStatus::new(cfg, true, latency, "backend is healthy; model is available")
                } else {
                    HealthStatus::new(cfg, false, latency, "backend is up, but model is not listed")
                }
            }
            Err(err) => {
                let latency = started.elapsed().as_millis();
                warn!(
                    target: "ai_llm_service::health",
                    provider = ?cfg.provider,
                    endpoint = %cfg.endpoint,
                    error = %err,
                    latency_ms = latency,
                    "health probe failed"
                );
                HealthStatus::new(cfg, false, latency, err.to_string())
            }
        }
    }

    /// Probes several profiles sequentially.
    pub async fn check_many(&self, configs: &[&LlmModelConfig]) -> Vec<HealthStatus> {
        let mut out = Vec::with_capacity(configs.len());
        for cfg in configs {
            out.push(self.check(cfg).await);
        }
        out
    }

    /// Strict probe returning the model names the backend advertises.
    async fn probe(&self, cfg: &LlmModelConfig) -> Result<Vec<String>, AiLlmError> {
        let base = cfg.endpoint.trim().trim_end_matches('/');
        let (url, request) = match cfg.provider {
            LlmProvider::Ollama => {
                let url = format!("{base}/api/tags");
                let req = self.client.get(&url);
                (url, req)
            }
            LlmProvider::OpenAI => {
                let url = format!("{base}/v1/models");
                let key = cfg.api_key.as_deref().ok_or_else(|| {
                    HealthError::Decode("missing OpenAI API key".into())
                })?;
                let req = self
                    .client
                    .get(&url)
                    .header(header::AUTHORIZATION, format!("Bearer {key}"));
                (url, req)
            }
        };

        let resp = request.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(HealthError::HttpStatus(HttpError {
                status,
                url,
                snippet: make_snippet(&text),
            })
            .into());
        }

        let names = match cfg.provider {
            LlmProvider::Ollama => resp
                .json::<OllamaTags>()
                .await
                .map_err(|e| HealthError::Decode(e.to_string()))?
                .models
                .into_iter()
                .map(|m| m.name)
                .collect(),
            LlmProvider::OpenAI => resp
                .json::<OpenAiModels>()
                .await
                .map_err(|e| HealthError::Decode(e.to_string()))?
                .data
                .into_iter()
                .map(|m| m.id)
                .collect(),
        };
        Ok(names)
    }
}

/// Ollama lists `name:tag`; a configured name without a tag means `:latest`.
fn model_matches(listed: &str, configured: &str) -> bool {
    if listed == configured {
        return true;
    }
    !configured.contains(':') && listed == format!("{configured}:latest")
}
