use std::path::PathBuf;
use std::sync::Arc;

use ai_llm_service::LlmServiceProfiles;
use contextor::{AnswerComposer, AskConfig, LlmGenerator};
use rag_store::{RagConfig, RagStore};
use thiserror::Error;

use crate::error_handler::AppError;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Process-level settings for the HTTP layer.
///
/// - `API_ADDRESS`           = bind address (default `0.0.0.0:8080`)
/// - `SOLIDITY_EXAMPLES_DIR` = Solidity example tree (default `./solidity-examples`)
/// - `INK_EXAMPLES_DIR`      = ink! example tree (default `./ink-examples`)
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub address: String,
    pub solidity_dir: PathBuf,
    pub ink_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let address = env_or("API_ADDRESS", "0.0.0.0:8080");
        if address.trim().is_empty() {
            return Err(ConfigError::Empty("API_ADDRESS"));
        }
        Ok(Self {
            address,
            solidity_dir: env_or("SOLIDITY_EXAMPLES_DIR", "./solidity-examples").into(),
            ink_dir: env_or("INK_EXAMPLES_DIR", "./ink-examples").into(),
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: RagStore,
    pub composer: AnswerComposer,
    /// LLM profiles probed by `/health`; absent when running without providers.
    pub llm: Option<Arc<LlmServiceProfiles>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: RagStore,
        composer: AnswerComposer,
        llm: Option<Arc<LlmServiceProfiles>>,
    ) -> Self {
        Self {
            config,
            store,
            composer,
            llm,
        }
    }

    /// Wires providers, the store and the composer from environment variables.
    pub fn from_env() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let llm = Arc::new(LlmServiceProfiles::from_env()?);
        let store = RagStore::from_config(RagConfig::from_env()?, llm.clone())?;
        let composer = AnswerComposer::new(
            store.clone(),
            Arc::new(LlmGenerator::new(llm.clone())),
            AskConfig::from_env()?,
        );
        Ok(Self::new(config, store, composer, Some(llm)))
    }
}
