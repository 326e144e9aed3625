//! HTTP-level tests for the three backend integrations against a mock server.

use dialagent_backends::{
    Backend, BackendError, GeminiBackend, LocalBackend, OpenAiBackend,
};
use dialagent_core::config::{GeminiConfig, GenerationConfig, LocalConfig, OpenAiConfig};
use dialagent_core::session::ChatMessage;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_history() -> Vec<ChatMessage> {
    vec![
        ChatMessage::user("Hello"),
        ChatMessage::assistant("Hi sir ji"),
        ChatMessage::user("What is the price?"),
    ]
}

async fn first_request_body(server: &MockServer) -> serde_json::Value {
    let requests = server
        .received_requests()
        .await
        .expect("request recording enabled");
    serde_json::from_slice(&requests[0].body).expect("request body is JSON")
}

#[tokio::test]
async fn openai_returns_raw_text_and_sends_primer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "<response>₹9,500 sir ji</response>"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = OpenAiConfig {
        api_key: "sk-test".to_string(),
        api_base: server.uri(),
        model: "o4-mini".to_string(),
    };
    let backend = OpenAiBackend::new(&config, &GenerationConfig::default());

    let raw = backend
        .invoke("persona", &sample_history())
        .await
        .unwrap();
    assert_eq!(raw, "<response>₹9,500 sir ji</response>");

    let body = first_request_body(&server).await;
    let messages = body["messages"].as_array().unwrap();
    // system + 3 history + synthetic primer
    assert_eq!(messages.len(), 5);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], "persona");
    assert_eq!(messages.last().unwrap()["role"], "assistant");
    assert_eq!(messages.last().unwrap()["content"], "<response>");
}

#[tokio::test]
async fn openai_http_error_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exceeded"))
        .mount(&server)
        .await;

    let config = OpenAiConfig {
        api_key: "sk-test".to_string(),
        api_base: server.uri(),
        model: "o4-mini".to_string(),
    };
    let backend = OpenAiBackend::new(&config, &GenerationConfig::default());

    let err = backend.invoke("persona", &[]).await.unwrap_err();
    match err {
        BackendError::Api { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("quota"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn openai_missing_key_fails_before_any_request() {
    let config = OpenAiConfig {
        api_key: String::new(),
        // Unroutable on purpose: a request would fail differently
        api_base: "http://127.0.0.1:1".to_string(),
        model: "o4-mini".to_string(),
    };
    // Only run the assertion when the environment doesn't provide a key
    if std::env::var("OPENAI_API_KEY").is_err() {
        let backend = OpenAiBackend::new(&config, &GenerationConfig::default());
        let err = backend.invoke("persona", &[]).await.unwrap_err();
        assert!(matches!(err, BackendError::Config(_)));
    }
}

#[tokio::test]
async fn gemini_carries_system_instruction_separately_and_preserves_roles() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "gm-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "बिल्कुल sir ji!"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = GeminiConfig {
        api_key: "gm-test".to_string(),
        api_base: server.uri(),
        model: "gemini-2.5-flash".to_string(),
    };
    let backend = GeminiBackend::new(&config, &GenerationConfig::default());

    let raw = backend
        .invoke("persona", &sample_history())
        .await
        .unwrap();
    assert_eq!(raw, "बिल्कुल sir ji!");

    let body = first_request_body(&server).await;
    assert_eq!(body["system_instruction"]["parts"][0]["text"], "persona");
    let contents = body["contents"].as_array().unwrap();
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0]["role"], "user");
    assert_eq!(contents[1]["role"], "model");
    assert_eq!(contents[2]["role"], "user");
    // No primer for this variant
    assert_eq!(contents[2]["parts"][0]["text"], "What is the price?");
}

#[tokio::test]
async fn gemini_api_error_body_propagates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "Invalid API key"}
        })))
        .mount(&server)
        .await;

    let config = GeminiConfig {
        api_key: "gm-test".to_string(),
        api_base: server.uri(),
        model: "gemini-2.5-flash".to_string(),
    };
    let backend = GeminiBackend::new(&config, &GenerationConfig::default());

    let err = backend.invoke("persona", &[]).await.unwrap_err();
    assert!(matches!(err, BackendError::InvalidResponse(ref m) if m.contains("Invalid API key")));
}

#[tokio::test]
async fn local_sends_bounded_request_and_strips_control_tokens() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": {"role": "assistant", "content": "<response>Haan ji</response><|im_end|>"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = LocalConfig {
        base_url: server.uri(),
        model: "qwen2.5:0.5b-instruct".to_string(),
        max_new_tokens: 200,
    };
    let backend = LocalBackend::new(&config, &GenerationConfig::default());

    let raw = backend
        .invoke("persona", &sample_history())
        .await
        .unwrap();
    assert_eq!(raw, "<response>Haan ji</response>");

    let body = first_request_body(&server).await;
    assert_eq!(body["stream"], false);
    assert_eq!(body["options"]["num_predict"], 200);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 5);
    assert_eq!(messages.last().unwrap()["content"], "<response>");
}

#[tokio::test]
async fn local_unreachable_runtime_surfaces_http_error() {
    let config = LocalConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        ..LocalConfig::default()
    };
    let backend = LocalBackend::new(&config, &GenerationConfig::default());

    let err = backend.invoke("persona", &[]).await.unwrap_err();
    assert!(matches!(err, BackendError::Http(_)));
}
