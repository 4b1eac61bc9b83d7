//! Rewrites plain-text extractor rejections into the JSON envelope.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

const REQUEST_FIELDS: [&str; 6] = [
    "score_threshold",
    "description",
    "category",
    "query",
    "limit",
    "text",
];

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    REQUEST_FIELDS
        .iter()
        .find(|key| msg.contains(*key))
        .map(|key| key.to_string())
}

fn hint_for(msg: &str) -> Option<String> {
    if msg.contains("missing field") {
        Some("Add the missing field to the JSON body.".into())
    } else if msg.contains("invalid type") {
        Some("Check the field type (e.g. `limit` is an integer, `score_threshold` a number).".into())
    } else if msg.contains("Content-Type") {
        Some("Send the body with `content-type: application/json`.".into())
    } else {
        None
    }
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts.headers.get("X-Request-Id").and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(v) = HeaderValue::from_str(&id) {
        parts.headers.insert("X-Request-Id", v);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}

/// Maps 400/415/422 rejection bodies to `ApiResponse` errors; envelopes
/// produced by handlers pass through untouched.
pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let status = res.status();

    if !matches!(
        status,
        StatusCode::BAD_REQUEST | StatusCode::UNSUPPORTED_MEDIA_TYPE | StatusCode::UNPROCESSABLE_ENTITY
    ) {
        return res;
    }

    let (mut parts, bytes) = take_body(res).await;
    if is_json(&parts) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    let request_id = ensure_request_id(&mut parts);
    debug!(target: "api", %request_id, %status, "extractor rejection");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: hint_for(&original),
    };
    let envelope = ApiResponse::<()>::error("BAD_REQUEST", original.trim(), vec![detail]);

    let body = match serde_json::to_vec(&envelope) {
        Ok(v) => v,
        Err(_) => bytes.to_vec(),
    };

    parts.status = StatusCode::BAD_REQUEST;
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    parts.headers.remove(header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
