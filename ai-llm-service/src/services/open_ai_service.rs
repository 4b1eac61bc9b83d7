//! OpenAI-compatible service for chat completion and embeddings.
//!
//! Endpoints derived from [`LlmModelConfig::endpoint`]:
//! - `POST {endpoint}/v1/chat/completions`
//! - `POST {endpoint}/v1/embeddings`

use std::time::Instant;

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, HttpError, Provider, ProviderError, ProviderErrorKind, make_snippet,
    },
};

fn openai_err(kind: ProviderErrorKind) -> AiLlmError {
    ProviderError::new(Provider::OpenAI, kind).into()
}

/// Thin client for an OpenAI-compatible API.
///
/// The bearer token is installed as a default header at construction.
#[derive(Debug)]
pub struct OpenAiService {
    client: reqwest::Client,
    cfg: LlmModelConfig,
    url_chat: String,
    url_embeddings: String,
}

impl OpenAiService {
    /// Creates a new [`OpenAiService`].
    ///
    /// # Errors
    /// - `InvalidProvider` / `MissingApiKey` / `InvalidEndpoint` on bad config
    /// - [`AiLlmError::HttpTransport`] if the client cannot be built
    pub fn new(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        if cfg.provider != LlmProvider::OpenAI {
            return Err(openai_err(ProviderErrorKind::InvalidProvider));
        }

        let api_key = cfg
            .api_key
            .clone()
            .ok_or_else(|| openai_err(ProviderErrorKind::MissingApiKey))?;

        let endpoint = cfg.endpoint.trim();
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(openai_err(ProviderErrorKind::InvalidEndpoint(
                cfg.endpoint.clone(),
            )));
        }

        let mut headers = header::HeaderMap::new();
        let auth = header::HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            openai_err(ProviderErrorKind::Decode(format!(
                "invalid API key header: {e}"
            )))
        })?;
        headers.insert(header::AUTHORIZATION, auth);
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(cfg.timeout())
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{base}/v1/chat/completions");
        let url_embeddings = format!("{base}/v1/embeddings");

        info!(
            target: "ai_llm_service::openai",
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout().as_secs(),
            "OpenAiService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
            url_embeddings,
        })
    }

    /// Single non-streaming chat completion.
    ///
    /// Messages: optional system message, then the user `prompt`.
    #[instrument(target = "ai_llm_service::openai", skip_all, fields(model = %self.cfg.model))]
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            target: "ai_llm_service::openai",
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;
        if !resp.status().is_success() {
            return Err(self.status_error(resp, &self.url_chat, started).await);
        }

        let out: ChatCompletionResponse = resp.json().await.map_err(|e| {
            openai_err(ProviderErrorKind::Decode(format!(
                "{e}; expected `choices[0].message.content`"
            )))
        })?;

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or_else(|| openai_err(ProviderErrorKind::EmptyChoices))?;

        debug!(
            target: "ai_llm_service::openai",
            latency_ms = started.elapsed().as_millis(),
            "chat completion completed"
        );
        Ok(content)
    }

    /// Single embeddings vector via `/v1/embeddings`.
    #[instrument(target = "ai_llm_service::openai", skip_all, fields(model = %self.cfg.model))]
    pub async fn embeddings(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let started = Instant::now();
        let body = EmbeddingsRequest {
            model: &self.cfg.model,
            input,
        };

        debug!(
            target: "ai_llm_service::openai",
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
            openai_err(ProviderErrorKind::Decode(format!(
                "{e}; expected `data[0].embedding`"
            )))
        })?;

        out.data
            .into_iter()
            .next()
            .map(|item| item.embedding)
            .ok_or_else(|| {
                openai_err(ProviderErrorKind::Decode(
                    "empty `data` in embeddings response".into(),
                ))
            })
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
            target: "ai_llm_service::openai",
            %status,
            %url,
            %snippet,
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis(),
            "OpenAI returned non-success status"
        );

        openai_err(ProviderErrorKind::HttpStatus(HttpError {
            status,
            url: url.to_string(),
            snippet,
        }))
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    fn from_cfg(cfg: &'a LlmModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(content) = system {
            messages.push(ChatMessage {
                role: "system",
                content,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmbeddingsRequest<'a> {
    model: &'a str,
    input: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}
