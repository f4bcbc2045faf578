// tests/gemini_http.rs
//
// GeminiClient against a local axum server standing in for generateContent.
// Covers request shape (api key header, google_search tool, prompt), decoding
// of a grounded 200 answer, and error mapping for non-2xx / non-JSON bodies.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use foundry_scout::config::GeminiConfig;
use foundry_scout::extract_citations;
use foundry_scout::gemini::{GeminiClient, ModelClient};

/// What the fake server saw: (path call segment, api key header, json body).
#[derive(Clone, Default)]
struct Seen {
    calls: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn spawn(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind local listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve fake gemini");
    });
    addr
}

fn client_for(addr: SocketAddr) -> GeminiClient {
    let cfg = GeminiConfig {
        api_key: "test-key".into(),
        timeout_secs: 5,
        ..GeminiConfig::default()
    };
    GeminiClient::new(&cfg)
        .expect("build client")
        .with_base_url(format!("http://{addr}/v1beta/models"))
}

async fn grounded_answer(
    State(seen): State<Seen>,
    Path(call): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    seen.calls.lock().expect("seen lock").push((call, key, body));

    Json(json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Headline: A\nLink: https://text.example\n---" }] },
            "groundingMetadata": { "groundingChunks": [
                { "web": { "uri": "https://grounded.example/1", "title": "one" } },
                { "web": { "uri": "https://grounded.example/2", "title": "two" } }
            ] }
        }]
    }))
}

#[tokio::test]
async fn grounded_answer_is_decoded_and_request_is_well_formed() {
    let seen = Seen::default();
    let app = Router::new()
        .route("/v1beta/models/{call}", post(grounded_answer))
        .with_state(seen.clone());
    let addr = spawn(app).await;

    let resp = client_for(addr)
        .generate("find foundry news")
        .await
        .expect("200 answer decodes");

    assert_eq!(
        extract_citations(&resp),
        vec![
            "https://grounded.example/1".to_string(),
            "https://grounded.example/2".to_string(),
            "https://text.example".to_string(),
        ]
    );
    assert!(resp.text().unwrap().starts_with("Headline: A"));

    let calls = seen.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    let (call, key, body) = &calls[0];
    assert_eq!(call, "gemini-2.5-pro:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert!(
        body["tools"]
            .as_array()
            .unwrap()
            .iter()
            .any(|t| t.get("google_search").is_some()),
        "google_search tool missing: {body}"
    );
    assert_eq!(body["contents"][0]["parts"][0]["text"], "find foundry news");
}

#[tokio::test]
async fn non_success_status_is_error_with_status_and_detail() {
    let app = Router::new().route(
        "/v1beta/models/{call}",
        post(|| async { (StatusCode::TOO_MANY_REQUESTS, "quota exhausted").into_response() }),
    );
    let addr = spawn(app).await;

    let err = client_for(addr)
        .generate("x")
        .await
        .expect_err("429 must be an error");
    let msg = format!("{err:#}");
    assert!(msg.contains("429"), "{msg}");
    assert!(msg.contains("quota exhausted"), "{msg}");
}

#[tokio::test]
async fn server_error_is_error() {
    let app = Router::new().route(
        "/v1beta/models/{call}",
        post(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let addr = spawn(app).await;

    let err = client_for(addr).generate("x").await.expect_err("500 must be an error");
    assert!(format!("{err:#}").contains("500"));
}

#[tokio::test]
async fn non_json_success_body_is_decode_error() {
    let app = Router::new().route("/v1beta/models/{call}", post(|| async { "<html>oops</html>" }));
    let addr = spawn(app).await;

    let err = client_for(addr).generate("x").await.expect_err("html is not json");
    assert!(format!("{err:#}").contains("decoding gemini response"));
}
