use quickcall_model::{
    ErrorKind, ModelMessage, ModelProvider, ModelProviderError, ModelRequest,
};
use quickcall_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAIProvider {
    let config = OpenAIConfigBuilder::with_api_key("test-key")
        .with_base_url(format!("{}/openai/v1", server.uri()))
        .with_model("llama3-8b-8192")
        .build();
    OpenAIProvider::new(config)
}

fn translator_request() -> ModelRequest {
    ModelRequest::with_messages([
        ModelMessage::System("You translate English to Hindi.".to_owned()),
        ModelMessage::User("Translate: 'Hello, how are you?'".to_owned()),
    ])
}

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn test_sends_model_and_ordered_messages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "model": "llama3-8b-8192",
            "messages": [
                { "role": "system", "content": "You translate English to Hindi." },
                { "role": "user", "content": "Translate: 'Hello, how are you?'" }
            ]
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!("नमस्ते, आप कैसे हैं?"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap();
    assert_eq!(reply.content.as_deref(), Some("नमस्ते, आप कैसे हैं?"));
    assert_eq!(reply.finish_reason.as_deref(), Some("stop"));
}

#[tokio::test]
async fn test_null_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(Value::Null)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let reply = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap();
    assert_eq!(reply.content, None);
}

#[tokio::test]
async fn test_api_error_keeps_body_and_does_not_retry() {
    let server = MockServer::start().await;
    let error_body = json!({
        "error": {
            "message": "Invalid API Key",
            "type": "invalid_request_error",
            "code": "invalid_api_key"
        }
    });
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(error_body.clone()),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.body(), Some(&error_body));
    assert!(err.message().contains("Invalid API Key"));
}

#[tokio::test]
async fn test_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RateLimitExceeded);
    assert_eq!(err.body(), None);
    assert!(err.message().contains("slow down"));
}

#[tokio::test]
async fn test_no_choices() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
}

#[tokio::test]
async fn test_html_response_is_invalid() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><body>Gateway login</body></html>",
            "text/html",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .send_request(&translator_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidResponse);
    assert!(err.message().contains("text/html"));
    assert_eq!(err.body(), None);
}

#[tokio::test]
async fn test_request_future_outlives_borrows() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(completion(json!("ok"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let fut = {
        let provider = provider_for(&server);
        let req = translator_request();
        provider.send_request(&req)
    };
    let reply = tokio::spawn(fut).await.unwrap().unwrap();
    assert_eq!(reply.content.as_deref(), Some("ok"));
}

#[tokio::test]
async fn test_transport_error() {
    // Nothing listens on the discard port.
    let config = OpenAIConfigBuilder::with_api_key("test-key")
        .with_base_url("http://127.0.0.1:9")
        .build();
    let err = OpenAIProvider::new(config)
        .send_request(&translator_request())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}
