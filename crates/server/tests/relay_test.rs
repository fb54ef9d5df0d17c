//! Router tests for the chat relay.
//!
//! Each test builds the router against an in-process upstream bound to
//! 127.0.0.1:0 and drives it with `oneshot`.

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::Json as ExtractJson;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::routing::post;
use axum::Router;
use llm_client::LlmClient;
use serde_json::{json, Value};
use server::{build_router, AppState, Config};
use tokio::net::TcpListener;
use tower::ServiceExt;

#[derive(Debug, Clone)]
struct Recorded {
    authorization: Option<String>,
    body: Value,
}

/// Upstream answering every call with `status` and `body`
async fn mock_upstream(status: u16, body: Body) -> (String, Arc<Mutex<Vec<Recorded>>>) {
    let bytes = to_bytes(body, usize::MAX).await.unwrap();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let recorded = calls.clone();
    let app = Router::new().route(
        "/v1/chat/completions",
        post(move |headers: HeaderMap, ExtractJson(request): ExtractJson<Value>| {
            let recorded = recorded.clone();
            let bytes = bytes.clone();
            async move {
                recorded.lock().unwrap().push(Recorded {
                    authorization: headers
                        .get(header::AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(String::from),
                    body: request,
                });
                (
                    StatusCode::from_u16(status).unwrap(),
                    [(header::CONTENT_TYPE, "application/json")],
                    bytes,
                )
            }
        }),
    );
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1/chat/completions"), calls)
}

fn json_body(value: Value) -> Body {
    Body::from(value.to_string())
}

fn router(api_url: String, api_key: Option<&str>) -> Router {
    let config = Config {
        api_url,
        api_key: api_key.map(String::from),
        ..Config::default()
    };
    let client = LlmClient::new(config.llm_config()).unwrap();
    build_router(AppState::new(config, client))
}

fn chat_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/openai/chat")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn read_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn hello() -> String {
    json!({"messages": [{"role": "user", "content": "Hello"}]}).to_string()
}

#[tokio::test]
async fn test_health_reports_key_state() {
    let app = router("http://127.0.0.1:9/".to_string(), Some("secret"));
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "CineMatch AI Proxy");
    assert_eq!(body["apiKey"], "✅ Configured");
    assert!(body["timestamp"].as_str().unwrap().ends_with('Z'));

    let app = router("http://127.0.0.1:9/".to_string(), None);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(read_json(response).await["apiKey"], "❌ Missing");
}

#[tokio::test]
async fn test_chat_success_envelope() {
    let (url, calls) = mock_upstream(
        200,
        json_body(json!({
            "model": "google/gemma-3n-e4b-it",
            "choices": [{"message": {"role": "assistant", "content": "Watch Amélie!"}, "finish_reason": "stop"}],
            "usage": {"total_tokens": 42}
        })),
    )
    .await;
    let app = router(url, Some("secret"));

    let body = json!({
        "messages": [{"role": "user", "content": "Something romantic"}],
        "temperature": 5.0,
        "max_tokens": 9000
    });
    let response = app.oneshot(chat_request(body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["choices"][0]["message"]["content"], "Watch Amélie!");
    assert_eq!(body["choices"][0]["finish_reason"], "stop");
    assert_eq!(body["usage"]["total_tokens"], 42);
    assert_eq!(body["model"], "google/gemma-3n-e4b-it");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].authorization.as_deref(), Some("Bearer secret"));
    assert_eq!(calls[0].body["model"], "google/gemma-3n-e4b-it");
    assert_eq!(calls[0].body["temperature"], json!(2.0));
    assert_eq!(calls[0].body["max_tokens"], 2000);
}

#[tokio::test]
async fn test_empty_messages_rejected_without_upstream_call() {
    let (url, calls) = mock_upstream(200, json_body(json!({}))).await;
    let app = router(url, Some("secret"));

    for body in [json!({"messages": []}), json!({})] {
        let response = app
            .clone()
            .oneshot(chat_request(body.to_string()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Invalid or empty messages");
        assert_eq!(body["message"], "Please provide an array of message objects");
    }
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_validation_runs_before_key_check() {
    let app = router("http://127.0.0.1:9/".to_string(), None);
    let response = app
        .oneshot(chat_request(json!({"messages": []}).to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = router("http://127.0.0.1:9/".to_string(), Some("secret"));
    for body in ["{not json", r#"{"messages": [{"role": "robot", "content": "x"}]}"#] {
        let response = app.clone().oneshot(chat_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Invalid or empty messages");
    }
}

#[tokio::test]
async fn test_large_transcript_is_accepted() {
    let app = router("http://127.0.0.1:9/".to_string(), None);
    let long_message = "a".repeat(3 * 1024 * 1024);
    let body = json!({"messages": [{"role": "user", "content": long_message}]});
    let response = app.oneshot(chat_request(body.to_string())).await.unwrap();

    // past body parsing, so the missing key is what gets reported
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["error"], "API Key Error");
}

#[tokio::test]
async fn test_body_over_limit_is_rejected() {
    let app = router("http://127.0.0.1:9/".to_string(), None);
    let long_message = "a".repeat(server::server::BODY_LIMIT_BYTES + 1);
    let body = json!({"messages": [{"role": "user", "content": long_message}]});
    let response = app.oneshot(chat_request(body.to_string())).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_missing_key_is_configuration_error() {
    let (url, calls) = mock_upstream(200, json_body(json!({}))).await;
    let app = router(url, None);
    let response = app.oneshot(chat_request(hello())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "API Key Error");
    assert_eq!(body["solution"], "Create a .env file with AIML_API_KEY=your-key-here");
    assert!(calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_upstream_status_is_mirrored() {
    let (url, _) = mock_upstream(
        429,
        json_body(json!({"error": {"message": "Rate limit exceeded"}})),
    )
    .await;
    let app = router(url, Some("secret"));
    let response = app.oneshot(chat_request(hello())).await.unwrap();

    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = read_json(response).await;
    assert_eq!(body["error"], "AiML API Request Failed");
    assert_eq!(body["status"], 429);
    assert_eq!(body["details"]["error"]["message"], "Rate limit exceeded");
}

#[tokio::test]
async fn test_upstream_text_error_is_wrapped() {
    let (url, _) = mock_upstream(502, Body::from("bad gateway")).await;
    let app = router(url, Some("secret"));
    let response = app.oneshot(chat_request(hello())).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(read_json(response).await["details"]["raw_error"], "bad gateway");
}

#[tokio::test]
async fn test_missing_choices_is_invalid_response() {
    let (url, _) = mock_upstream(200, json_body(json!({"choices": []}))).await;
    let app = router(url, Some("secret"));
    let response = app.oneshot(chat_request(hello())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(read_json(response).await["error"], "Invalid API Response");
}

#[tokio::test]
async fn test_unreachable_upstream_is_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = router(format!("http://{addr}/v1/chat/completions"), Some("secret"));
    let response = app.oneshot(chat_request(hello())).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Network Error");
    assert_eq!(body["details"], "Failed to connect to AiML API");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = router("http://127.0.0.1:9/".to_string(), None);
    let response = app
        .oneshot(Request::get("/api/movies").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = read_json(response).await;
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["message"], "Endpoint /api/movies does not exist");
    assert_eq!(body["available"], json!(["/health", "/api/openai/chat"]));
}

#[tokio::test]
async fn test_cors_preflight_for_allowed_origin() {
    let app = router("http://127.0.0.1:9/".to_string(), None);
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/openai/chat")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "http://localhost:3000"
    );
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
        "true"
    );
}
