use serde::Deserialize;

pub const DEFAULT_SEARCH_LIMIT: usize = 5;

/// Body of `POST /rag/search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    /// Defaults to 5.
    #[serde(default)]
    pub limit: Option<usize>,
    /// Minimum similarity in `[-1, 1]`; no filtering when omitted.
    #[serde(default)]
    pub score_threshold: Option<f32>,
}

/// Body of `POST /rag/document`.
#[derive(Debug, Deserialize)]
pub struct AddDocumentRequest {
    pub text: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}
