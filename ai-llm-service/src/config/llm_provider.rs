use std::str::FromStr;

use crate::error_handler::ConfigError;

/// Backend used for generation and embeddings.
///
/// Selected at startup through `LLM_PROVIDER` (`ollama` or `openai`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Local Ollama runtime.
    Ollama,
    /// OpenAI or any API compatible with `/v1/chat/completions`.
    OpenAI,
}

impl FromStr for LlmProvider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" | "chatgpt" => Ok(Self::OpenAI),
            other => Err(ConfigError::UnsupportedProvider(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers_case_insensitively() {
        assert_eq!("Ollama".parse::<LlmProvider>().unwrap(), LlmProvider::Ollama);
        assert_eq!(" openai ".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
        assert_eq!("chatgpt".parse::<LlmProvider>().unwrap(), LlmProvider::OpenAI);
    }

    #[test]
    fn rejects_unknown_provider() {
        let err = "anthropic".parse::<LlmProvider>().unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedProvider(p) if p == "anthropic"));
    }
}
