//! Retrieval-augmented answers for Solidity → ink! migration questions.
//!
//! [`AnswerComposer::answer`] embeds the question, retrieves the top-ranked
//! training documents from `rag-store`, builds a migration prompt under a
//! character budget, calls the generation service and returns an [`Answer`]
//! citing the examples it used. When nothing clears the score threshold the
//! answer is a fallback summary with no examples.

mod api_types;
mod cfg;
pub mod code_block;
mod composer;
mod error;
mod generator;
pub mod prompt;

pub use api_types::{Answer, CodeExample};
pub use cfg::AskConfig;
pub use composer::{AnswerComposer, AskStage, NO_RESULTS_SUMMARY};
pub use error::ContextorError;
pub use generator::{LlmGenerator, TextGenerator};
