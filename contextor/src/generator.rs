//! Text generation seam.

use std::sync::Arc;
use std::time::Duration;

use ai_llm_service::{AiLlmError, LlmServiceProfiles};
use rag_store::BoxFuture;

use crate::error::ContextorError;

/// Prompt → completion.
pub trait TextGenerator: Send + Sync {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, ContextorError>>;
}

/// Generation through the shared LLM service profiles.
pub struct LlmGenerator {
    svc: Arc<LlmServiceProfiles>,
}

impl LlmGenerator {
    pub fn new(svc: Arc<LlmServiceProfiles>) -> Self {
        Self { svc }
    }
}

impl TextGenerator for LlmGenerator {
    fn complete<'a>(
        &'a self,
        prompt: &'a str,
        system: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, ContextorError>> {
        Box::pin(async move {
            let limit = self.svc.profiles().0.timeout();
            self.svc
                .generate(prompt, system)
                .await
                .map_err(|e| map_llm_error(e, limit))
        })
    }
}

fn map_llm_error(e: AiLlmError, limit: Duration) -> ContextorError {
    match e {
        AiLlmError::Timeout(d) => ContextorError::GenerationTimeout(d),
        e if e.is_timeout() => ContextorError::GenerationTimeout(limit),
        other => ContextorError::Generation(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ai_llm_service::error_handler::ConfigError;

    #[test]
    fn timeouts_map_to_generation_timeout() {
        let limit = Duration::from_secs(9);
        let err = map_llm_error(AiLlmError::Timeout(limit), limit);
        assert!(err.is_timeout());

        let err = map_llm_error(ConfigError::MissingVar("X").into(), limit);
        assert!(matches!(err, ContextorError::Generation(_)));
    }
}
