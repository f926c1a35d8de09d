use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_partial_json, header, header_exists, method, path},
};

/// Upstream whose `/api/chat` answers with `body` and nothing else.
pub async fn setup_chat_mock(status: u16, body: &str) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(header("user-agent", "TestAgent/1.0"))
        .and(header_exists("authorization"))
        .and(header_exists("x-forwarded-for"))
        .and(header_exists("x-real-ip"))
        .and(body_partial_json(json!({
            "user_level": "free",
            "prompt": "",
            "enableWebSearch": false,
            "usedVoiceInput": false
        })))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&mock_server)
        .await;

    mock_server
}

/// Upstream serving `image` from `/api/image`; `/api/chat` must not be called.
pub async fn setup_image_mock(status: u16, image: &[u8]) -> MockServer {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/image"))
        .and(body_partial_json(json!({ "user_level": "free" })))
        .respond_with(ResponseTemplate::new(status).set_body_bytes(image.to_vec()))
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    mock_server
}
