//! Public answer types re-used by the HTTP layer.

use serde::Serialize;

/// One cited example backing an answer.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CodeExample {
    /// Pair name and category, or the pair id when names are missing.
    pub title: String,
    pub description: Option<String>,
    /// First fenced code block of the retrieved document.
    pub code: String,
    pub source_file: Option<String>,
    /// Similarity score from the retriever.
    pub relevance_score: f32,
}

/// Structured answer to a migration question.
///
/// # Example
/// ```
/// use contextor::Answer;
/// let a = Answer {
///     query: "How do I emit events?".into(),
///     summary: "Use #[ink(event)] structs.".into(),
///     examples: vec![],
///     help_text: String::new(),
/// };
/// assert!(a.examples.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Answer {
    pub query: String,
    pub summary: String,
    pub examples: Vec<CodeExample>,
    pub help_text: String,
}
