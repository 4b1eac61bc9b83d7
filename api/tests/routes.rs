use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use api::core::app_state::{AppConfig, AppState};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use contextor::{AnswerComposer, AskConfig, ContextorError, TextGenerator};
use http_body_util::BodyExt;
use rag_store::{BoxFuture, EmbeddingsProvider, MemoryIndex, RagConfig, RagError, RagStore};
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

// ── Fakes ───────────────────────────────────────────────────────────

/// Two-axis embedder: flipper-ish text vs everything else.
struct AxisEmbedder;

impl EmbeddingsProvider for AxisEmbedder {
    fn embed<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async move {
            let t = text.to_lowercase();
            Ok(if t.contains("flip") {
                vec![1.0, 0.0]
            } else {
                vec![0.0, 1.0]
            })
        })
    }
}

struct DownEmbedder;

impl EmbeddingsProvider for DownEmbedder {
    fn embed<'a>(&'a self, _text: &'a str) -> BoxFuture<'a, Result<Vec<f32>, RagError>> {
        Box::pin(async { Err(RagError::Embedding("connection refused".into())) })
    }
}

#[derive(Default)]
struct EchoGenerator {
    calls: Mutex<usize>,
}

impl TextGenerator for EchoGenerator {
    fn complete<'a>(
        &'a self,
        _prompt: &'a str,
        _system: Option<&'a str>,
    ) -> BoxFuture<'a, Result<String, ContextorError>> {
        Box::pin(async move {
            *self.calls.lock().unwrap() += 1;
            Ok("Use #[ink(storage)] and a #[ink(message)] flip.".to_string())
        })
    }
}

// ── Helpers ─────────────────────────────────────────────────────────

struct Fixture {
    _sol: TempDir,
    _ink: TempDir,
    app: Router,
    generator: Arc<EchoGenerator>,
}

fn write(root: &Path, rel: &str, body: &str) {
    let p = root.join(rel);
    if let Some(parent) = p.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(p, body).unwrap();
}

fn fixture_with(embedder: Arc<dyn EmbeddingsProvider>) -> Fixture {
    let sol = TempDir::new().unwrap();
    let ink = TempDir::new().unwrap();
    write(
        sol.path(),
        "Flipper.sol",
        "contract Flipper { bool value; function flip() public { value = !value; } }",
    );
    write(
        ink.path(),
        "flipper/lib.rs",
        "#[ink::contract]\nmod flipper {\n    #[ink(storage)]\n    pub struct Flipper { value: bool }\n}",
    );
    write(sol.path(), "UniswapPair.sol", "contract UniswapPair {}");

    let store = RagStore::new(
        RagConfig::in_memory(2),
        Arc::new(MemoryIndex::new("contract_pairs")),
        embedder,
    );
    let generator = Arc::new(EchoGenerator::default());
    let composer = AnswerComposer::new(store.clone(), generator.clone(), AskConfig::default());
    let config = AppConfig {
        address: "127.0.0.1:0".into(),
        solidity_dir: sol.path().to_path_buf(),
        ink_dir: ink.path().to_path_buf(),
    };
    let state = Arc::new(AppState::new(config, store, composer, None));

    Fixture {
        _sol: sol,
        _ink: ink,
        app: api::router(state),
        generator,
    }
}

fn fixture() -> Fixture {
    fixture_with(Arc::new(AxisEmbedder))
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn embed_contracts(app: &Router) -> Value {
    let (status, body) = send(app, Request::post("/training/embed-contracts").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
}

// ── Tests ───────────────────────────────────────────────────────────

#[tokio::test]
async fn health_is_ok_without_providers() {
    let f = fixture();
    let (status, body) = send(&f.app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "ok");
    assert_eq!(body["data"]["index_backend"], "memory");
}

#[tokio::test]
async fn contract_pairs_lists_pairs_and_unmatched() {
    let f = fixture();
    let (status, body) = send(&f.app, get("/training/contract-pairs")).await;
    assert_eq!(status, StatusCode::OK);

    let pairs = body["data"]["pairs"].as_array().unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0]["pair_id"], "flipper");
    assert!(pairs[0].get("content_a").is_none());
    assert_eq!(body["data"]["unmatched_a"], json!(["UniswapPair.sol"]));
}

#[tokio::test]
async fn embed_then_search_and_stats() {
    let f = fixture();
    let body = embed_contracts(&f.app).await;
    assert_eq!(body["data"]["processed"], 1);
    assert_eq!(body["data"]["errors"], json!([]));

    let (status, body) = send(&f.app, get("/rag/stats")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["documents"], 1);

    let (status, body) = send(
        &f.app,
        post_json("/rag/search", json!({"query": "flip a bool", "limit": 3, "score_threshold": 0.5})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let hits = body["data"].as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["metadata"]["pair_id"], "flipper");
    assert!(hits[0]["content"].as_str().unwrap().contains("## ink! Implementation"));
}

#[tokio::test]
async fn ask_answers_with_citation() {
    let f = fixture();
    embed_contracts(&f.app).await;

    let (status, body) = send(&f.app, post_json("/ask", json!({"query": "How do I flip a bool?"}))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["query"], "How do I flip a bool?");
    let examples = body["data"]["examples"].as_array().unwrap();
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0]["source_file"], "Flipper.sol");
    assert_eq!(*f.generator.calls.lock().unwrap(), 1);
}

#[tokio::test]
async fn ask_without_matches_degrades_gracefully() {
    let f = fixture();
    embed_contracts(&f.app).await;

    let (status, body) = send(&f.app, get("/ask?query=ERC-1155%20batch%20transfers")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["examples"], json!([]));
    assert!(!body["data"]["summary"].as_str().unwrap().is_empty());
    assert_eq!(*f.generator.calls.lock().unwrap(), 0);
}

#[tokio::test]
async fn empty_query_is_bad_request() {
    let f = fixture();
    for req in [post_json("/ask", json!({"query": "  "})), get("/ask")] {
        let (status, body) = send(&f.app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert!(body["error"]["message"].as_str().unwrap().contains("Query cannot be empty"));
    }
}

#[tokio::test]
async fn malformed_json_is_wrapped_in_envelope() {
    let f = fixture();
    let (status, body) = send(&f.app, post_json("/rag/search", json!({"query": "x", "limit": "many"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert_eq!(body["error"]["details"][0]["path"], "limit");
}

#[tokio::test]
async fn out_of_range_threshold_is_bad_request() {
    let f = fixture();
    let (status, body) = send(
        &f.app,
        post_json("/rag/search", json!({"query": "flip", "score_threshold": 2.0})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn embedding_outage_maps_to_bad_gateway() {
    let f = fixture_with(Arc::new(DownEmbedder));
    let (status, body) = send(&f.app, post_json("/ask", json!({"query": "flip"}))).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "EMBEDDING_FAILED");
}

#[tokio::test]
async fn add_document_is_idempotent() {
    let f = fixture();
    let req = || post_json("/rag/document", json!({"text": "ink! messages take &self or &mut self", "category": "storage"}));

    let (status, first) = send(&f.app, req()).await;
    assert_eq!(status, StatusCode::OK, "{first}");
    let (_, second) = send(&f.app, req()).await;
    assert_eq!(first["data"]["id"], second["data"]["id"]);

    let (_, stats) = send(&f.app, get("/rag/stats")).await;
    assert_eq!(stats["data"]["documents"], 1);
}

#[tokio::test]
async fn ask_honours_caller_limit() {
    let f = fixture();
    embed_contracts(&f.app).await;

    let (status, body) = send(&f.app, post_json("/ask", json!({"query": "flip", "limit": 1}))).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["data"]["examples"].as_array().unwrap().len(), 1);

    let (status, body) = send(&f.app, post_json("/ask", json!({"query": "flip", "limit": 0}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}
