//! Online request path: retrieve → prompt → generate → structured answer.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use contract_pairs::synthesize::keys;
use rag_store::{RagStore, RetrievalResult};
use tracing::{debug, info, warn};

use crate::api_types::{Answer, CodeExample};
use crate::cfg::AskConfig;
use crate::code_block::first_fenced_block;
use crate::error::ContextorError;
use crate::generator::TextGenerator;
use crate::prompt::{MIGRATION_SYSTEM, build_user_prompt};

pub const NO_RESULTS_SUMMARY: &str =
    "No relevant Solidity/ink! examples were found for your question.";
pub const NO_RESULTS_HELP: &str = "Try refining your question or ask about specific ink! concepts \
like 'storage', 'messages', 'events', or 'constructors'.";
pub const ANSWER_HELP: &str = "Examples come from paired Solidity and ink! contracts. \
Use them as templates when migrating your own contracts.";

/// Per-request lifecycle, traced at debug level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AskStage {
    Received,
    Embedding,
    Searching,
    NoResults,
    ContextBuilt,
    Generating,
    Done,
    Failed,
}

impl fmt::Display for AskStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Answers migration questions from indexed examples.
#[derive(Clone)]
pub struct AnswerComposer {
    store: RagStore,
    generator: Arc<dyn TextGenerator>,
    cfg: AskConfig,
}

impl AnswerComposer {
    pub fn new(store: RagStore, generator: Arc<dyn TextGenerator>, cfg: AskConfig) -> Self {
        Self {
            store,
            generator,
            cfg,
        }
    }

    pub fn config(&self) -> &AskConfig {
        &self.cfg
    }

    /// Answers `query` with the configured limit and threshold.
    ///
    /// Zero retrieved examples is a successful answer with a fallback
    /// summary and no generation call.
    ///
    /// # Errors
    /// Retrieval and generation failures, including timeouts.
    pub async fn answer(&self, query: &str) -> Result<Answer, ContextorError> {
        self.answer_with_limit(query, None).await
    }

    /// Like [`AnswerComposer::answer`], with a caller-chosen retrieval limit.
    ///
    /// `None` falls back to the configured limit; `Some(0)` is rejected as an
    /// invalid request.
    pub async fn answer_with_limit(
        &self,
        query: &str,
        limit: Option<usize>,
    ) -> Result<Answer, ContextorError> {
        let started = Instant::now();
        let res = self.run(query, limit.unwrap_or(self.cfg.limit)).await;
        match &res {
            Ok(a) => info!(
                target: "contextor::ask",
                examples = a.examples.len(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "answered"
            ),
            Err(e) => {
                stage(AskStage::Failed);
                warn!(target: "contextor::ask", error = %e, "ask failed");
            }
        }
        res
    }

    async fn run(&self, query: &str, limit: usize) -> Result<Answer, ContextorError> {
        stage(AskStage::Received);

        stage(AskStage::Embedding);
        let vector = self.store.embed_query(query).await?;

        stage(AskStage::Searching);
        let hits = self
            .store
            .search_by_vector(vector, limit, Some(self.cfg.score_threshold))
            .await?;

        if hits.is_empty() {
            stage(AskStage::NoResults);
            return Ok(Answer {
                query: query.to_string(),
                summary: NO_RESULTS_SUMMARY.to_string(),
                examples: Vec::new(),
                help_text: NO_RESULTS_HELP.to_string(),
            });
        }

        let prompt = build_user_prompt(query, &hits, self.cfg.max_context_chars);
        stage(AskStage::ContextBuilt);
        debug!(target: "contextor::ask", hits = hits.len(), prompt_chars = prompt.len(), "context built");

        stage(AskStage::Generating);
        let limit = self.cfg.generation_timeout;
        let summary = tokio::time::timeout(
            limit,
            self.generator.complete(&prompt, Some(MIGRATION_SYSTEM)),
        )
        .await
        .map_err(|_| ContextorError::GenerationTimeout(limit))??;

        stage(AskStage::Done);
        Ok(Answer {
            query: query.to_string(),
            summary: summary.trim().to_string(),
            examples: hits.iter().map(to_example).collect(),
            help_text: ANSWER_HELP.to_string(),
        })
    }
}

fn stage(s: AskStage) {
    debug!(target: "contextor::ask", stage = %s);
}

fn to_example(hit: &RetrievalResult) -> CodeExample {
    let meta = &hit.metadata;
    let title = match (meta.get(keys::NAME_A), meta.get(keys::CATEGORY)) {
        (Some(name), Some(category)) => format!("{name} ({category})"),
        _ => meta
            .get(keys::PAIR_ID)
            .cloned()
            .unwrap_or_else(|| hit.id.clone()),
    };
    CodeExample {
        title,
        description: meta.get(keys::DESCRIPTION).cloned(),
        code: first_fenced_block(&hit.content).unwrap_or_else(|| hit.content.trim().to_string()),
        source_file: meta.get(keys::SOURCE_FILE).cloned(),
        relevance_score: hit.score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contract_pairs::{Category, ContractPair, synthesize};
    use rag_store::{BoxFuture, EmbeddingsProvider, MemoryIndex, RagConfig, RagError};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Flipper-ish text maps to one axis, everything else to another.
    struct AxisEmbedder;

    impl EmbeddingsProvider for AxisEmbedder {
        fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
            Box::pin(async move {
                let t = text.to_lowercase();
                Ok(if t.contains("flip") || t.contains("toggle") {
                    vec![1.0, 0.0]
                } else {
                    vec![0.0, 1.0]
                })
            })
        }
    }

    #[derive(Default)]
    struct RecordingGenerator {
        prompts: Mutex<Vec<String>>,
    }

    impl TextGenerator for RecordingGenerator {
        fn complete<'a>(
            &'a self,
            prompt: &'a str,
            _system: Option<&'a str>,
        ) -> BoxFuture<'a, Result<String, ContextorError>> {
            Box::pin(async move {
                self.prompts.lock().unwrap().push(prompt.to_string());
                Ok("Replace the storage bool with #[ink(storage)].".to_string())
            })
        }
    }

    struct FailingGenerator;

    impl TextGenerator for FailingGenerator {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
            _system: Option<&'a str>,
        ) -> BoxFuture<'a, Result<String, ContextorError>> {
            Box::pin(async { Err(ContextorError::Generation("503".into())) })
        }
    }

    struct StuckGenerator;

    impl TextGenerator for StuckGenerator {
        fn complete<'a>(
            &'a self,
            _prompt: &'a str,
            _system: Option<&'a str>,
        ) -> BoxFuture<'a, Result<String, ContextorError>> {
            Box::pin(async {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            })
        }
    }

    fn flipper_pair() -> ContractPair {
        ContractPair {
            pair_id: "flipper".into(),
            name_a: "Flipper".into(),
            name_b: "flipper".into(),
            path_a: "Flipper.sol".into(),
            path_b: "flipper/lib.rs".into(),
            content_a: "contract Flipper { bool value; function flip() public { value = !value; } }"
                .into(),
            content_b: "#[ink::contract]\nmod flipper {}".into(),
            category: Category::Storage,
            description: "Toggle a boolean value".into(),
        }
    }

    async fn store_with_flipper() -> RagStore {
        let store = RagStore::new(
            RagConfig::in_memory(2),
            Arc::new(MemoryIndex::new("t")),
            Arc::new(AxisEmbedder),
        );
        let report = store.index_documents(&[synthesize(&flipper_pair())]).await.unwrap();
        assert_eq!(report.processed, 1);
        store
    }

    #[tokio::test]
    async fn answer_cites_the_flipper_pair() {
        let generator = Arc::new(RecordingGenerator::default());
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            generator.clone(),
            AskConfig::default(),
        );

        let a = composer.answer("How do I flip a boolean in ink!?").await.unwrap();

        assert_eq!(a.summary, "Replace the storage bool with #[ink(storage)].");
        assert_eq!(a.examples.len(), 1);
        let ex = &a.examples[0];
        assert_eq!(ex.title, "Flipper (storage)");
        assert_eq!(ex.source_file.as_deref(), Some("Flipper.sol"));
        assert_eq!(ex.description.as_deref(), Some("Toggle a boolean value"));
        assert!(ex.code.contains("contract Flipper"));
        assert!(ex.relevance_score >= 0.7);

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("How do I flip a boolean in ink!?"));
        assert!(prompts[0].contains("# Flipper"));
    }

    #[tokio::test]
    async fn no_results_falls_back_without_generation() {
        let generator = Arc::new(RecordingGenerator::default());
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            generator.clone(),
            AskConfig::default(),
        );

        let a = composer.answer("What is an ERC-1155 batch transfer?").await.unwrap();

        assert!(a.examples.is_empty());
        assert_eq!(a.summary, NO_RESULTS_SUMMARY);
        assert!(!a.help_text.is_empty());
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generation_failure_propagates() {
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            Arc::new(FailingGenerator),
            AskConfig::default(),
        );
        let err = composer.answer("flip").await.unwrap_err();
        assert!(matches!(err, ContextorError::Generation(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_generation_times_out() {
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            Arc::new(StuckGenerator),
            AskConfig::default(),
        );
        let err = composer.answer("flip").await.unwrap_err();
        assert!(matches!(err, ContextorError::GenerationTimeout(_)));
        assert!(err.is_timeout());
    }

    #[tokio::test]
    async fn empty_query_is_rejected() {
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            Arc::new(RecordingGenerator::default()),
            AskConfig::default(),
        );
        let err = composer.answer("   ").await.unwrap_err();
        assert!(matches!(err, ContextorError::Rag(RagError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn caller_limit_caps_examples() {
        let store = store_with_flipper().await;
        let toggle = ContractPair {
            pair_id: "toggle".into(),
            name_a: "Toggle".into(),
            path_a: "Toggle.sol".into(),
            ..flipper_pair()
        };
        store.index_documents(&[synthesize(&toggle)]).await.unwrap();
        let composer = AnswerComposer::new(
            store,
            Arc::new(RecordingGenerator::default()),
            AskConfig::default(),
        );

        let all = composer.answer("flip").await.unwrap();
        assert_eq!(all.examples.len(), 2);

        let one = composer.answer_with_limit("flip", Some(1)).await.unwrap();
        assert_eq!(one.examples.len(), 1);

        let err = composer.answer_with_limit("flip", Some(0)).await.unwrap_err();
        assert!(matches!(err, ContextorError::Rag(RagError::InvalidRequest(_))));
    }

    fn assert_send<T: Send>(_: T) {}

    #[tokio::test]
    async fn answer_future_is_send() {
        let composer = AnswerComposer::new(
            store_with_flipper().await,
            Arc::new(RecordingGenerator::default()),
            AskConfig::default(),
        );
        assert_send(composer.answer("flip"));
    }
}
