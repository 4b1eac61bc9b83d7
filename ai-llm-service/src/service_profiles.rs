//! Shared LLM service with two profiles: `generation` and `embedding`.
//!
//! - Construct once, wrap in `Arc`, pass clones to dependents.
//! - Clients are built eagerly so misconfiguration fails at startup.
//! - Every call is bounded by the profile timeout; expiry yields
//!   [`AiLlmError::Timeout`].
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use ai_llm_service::LlmServiceProfiles;
//!
//! # async fn run() -> Result<(), ai_llm_service::AiLlmError> {
//! let svc = Arc::new(LlmServiceProfiles::from_env()?);
//! let vector = svc.embed("How do I migrate an ERC20 token?").await?;
//! let text = svc.generate("Explain ink! storage", None).await?;
//! # let _ = (vector, text);
//! # Ok(()) }
//! ```

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::{
    config::{
        default_config::{config_embedding, config_generation},
        llm_model_config::LlmModelConfig,
        llm_provider::LlmProvider,
    },
    error_handler::AiLlmError,
    health_service::{HealthService, HealthStatus},
    services::{ollama_service::OllamaService, open_ai_service::OpenAiService},
};

/// Concrete client behind one profile.
#[derive(Debug)]
enum Backend {
    Ollama(OllamaService),
    OpenAI(OpenAiService),
}

impl Backend {
    fn build(cfg: LlmModelConfig) -> Result<Self, AiLlmError> {
        Ok(match cfg.provider {
            LlmProvider::Ollama => Backend::Ollama(OllamaService::new(cfg)?),
            LlmProvider::OpenAI => Backend::OpenAI(OpenAiService::new(cfg)?),
        })
    }
}

/// Generation + embedding clients with their timeouts.
#[derive(Debug)]
pub struct LlmServiceProfiles {
    generation_cfg: LlmModelConfig,
    embedding_cfg: LlmModelConfig,
    generation: Backend,
    embedding: Backend,
    health: HealthService,
}

impl LlmServiceProfiles {
    /// Creates the service from explicit profiles.
    pub fn new(
        generation: LlmModelConfig,
        embedding: LlmModelConfig,
        health_timeout_secs: Option<u64>,
    ) -> Result<Self, AiLlmError> {
        Ok(Self {
            generation: Backend::build(generation.clone())?,
            embedding: Backend::build(embedding.clone())?,
            generation_cfg: generation,
            embedding_cfg: embedding,
            health: HealthService::new(health_timeout_secs)?,
        })
    }

    /// Creates the service from environment variables
    /// (see [`crate::config::default_config`]).
    pub fn from_env() -> Result<Self, AiLlmError> {
        Self::new(config_generation()?, config_embedding()?, None)
    }

    /// Generates a completion with the generation profile.
    ///
    /// `system` is sent as a system message (OpenAI) or `system` field (Ollama).
    pub async fn generate(&self, prompt: &str, system: Option<&str>) -> Result<String, AiLlmError> {
        let limit = self.generation_cfg.timeout();
        match &self.generation {
            Backend::Ollama(cli) => bounded(limit, cli.generate(prompt, system)).await,
            Backend::OpenAI(cli) => bounded(limit, cli.generate(prompt, system)).await,
        }
    }

    /// Embeds `input` with the embedding profile.
    pub async fn embed(&self, input: &str) -> Result<Vec<f32>, AiLlmError> {
        let limit = self.embedding_cfg.timeout();
        match &self.embedding {
            Backend::Ollama(cli) => bounded(limit, cli.embeddings(input)).await,
            Backend::OpenAI(cli) => bounded(limit, cli.embeddings(input)).await,
        }
    }

    /// Health snapshot; an embedding profile identical to the generation
    /// profile is probed once.
    pub async fn health_all(&self) -> Vec<HealthStatus> {
        let mut list = vec![&self.generation_cfg];
        if self.embedding_cfg != self.generation_cfg {
            list.push(&self.embedding_cfg);
        }
        self.health.check_many(&list).await
    }

    /// Returns `(generation, embedding)` profiles.
    pub fn profiles(&self) -> (&LlmModelConfig, &LlmModelConfig) {
        (&self.generation_cfg, &self.embedding_cfg)
    }
}

async fn bounded<T, F>(limit: Duration, fut: F) -> Result<T, AiLlmError>
where
    F: Future<Output = Result<T, AiLlmError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(Err(e)) if e.is_timeout() => {
            warn!(target: "ai_llm_service::profiles", timeout = ?limit, error = %e, "LLM transport timed out");
            Err(AiLlmError::Timeout(limit))
        }
        Ok(res) => res,
        Err(_) => {
            warn!(target: "ai_llm_service::profiles", timeout = ?limit, "LLM call timed out");
            Err(AiLlmError::Timeout(limit))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ollama(model: &str, timeout_secs: u64) -> LlmModelConfig {
        LlmModelConfig {
            provider: LlmProvider::Ollama,
            model: model.into(),
            endpoint: "http://127.0.0.1:11434".into(),
            api_key: None,
            max_tokens: None,
            temperature: None,
            top_p: None,
            timeout_secs: Some(timeout_secs),
        }
    }

    #[test]
    fn builds_both_profiles_eagerly() {
        let svc = LlmServiceProfiles::new(ollama("llama3.1", 9), ollama("nomic", 5), None).unwrap();
        let (g, e) = svc.profiles();
        assert_eq!(g.model, "llama3.1");
        assert_eq!(e.timeout(), Duration::from_secs(5));
    }

    #[test]
    fn bad_profile_fails_at_construction() {
        let mut bad = ollama("x", 5);
        bad.provider = LlmProvider::OpenAI;
        assert!(LlmServiceProfiles::new(ollama("llama3.1", 9), bad, None).is_err());
    }

    #[tokio::test]
    async fn bounded_maps_expiry_to_timeout() {
        let slow = async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            Ok::<_, AiLlmError>(1)
        };
        let err = bounded(Duration::from_millis(10), slow).await.unwrap_err();
        assert!(matches!(err, AiLlmError::Timeout(d) if d == Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn transport_timeout_is_reported_as_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let _silent = tokio::spawn(async move {
            let (_conn, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let call = async {
            client.get(format!("http://{addr}/")).send().await?;
            Ok::<_, AiLlmError>(())
        };

        let err = bounded(Duration::from_secs(5), call).await.unwrap_err();
        assert!(matches!(err, AiLlmError::Timeout(d) if d == Duration::from_secs(5)));
    }
}
