use serde::Deserialize;

/// Body of `POST /ask`.
#[derive(Debug, Deserialize)]
pub struct AskRequest {
    /// Natural-language migration question.
    pub query: String,
    /// Retrieval limit; the configured default when absent.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Query string of `GET /ask?query=...`.
#[derive(Debug, Deserialize)]
pub struct AskParams {
    #[serde(default)]
    pub query: Option<String>,
}
