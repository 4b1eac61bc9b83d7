//! Provider-agnostic access to the generation and embedding models.
//!
//! The rest of the workspace talks to LLM backends only through
//! [`service_profiles::LlmServiceProfiles`], which owns one client per
//! profile and applies the configured per-call timeouts.

pub mod config {
    pub mod default_config;
    pub mod llm_model_config;
    pub mod llm_provider;
}

pub mod error_handler;
pub mod health_service;
pub mod service_profiles;
pub mod telemetry;

pub mod services {
    pub mod ollama_service;
    pub mod open_ai_service;
}

pub use config::llm_model_config::LlmModelConfig;
pub use config::llm_provider::LlmProvider;
pub use error_handler::AiLlmError;
pub use service_profiles::LlmServiceProfiles;
