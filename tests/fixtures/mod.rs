#![allow(dead_code)]

use serde_json::{Value, json};

use aigc_gateway::config::{Config, default_models};
use aigc_gateway::models::Role;
use aigc_gateway::models::request::{ChatCompletionCreate, Message};

pub const MASTER_KEY: &str = "sk-test-master";

pub fn test_config(upstream_url: &str) -> Config {
    Config {
        port: 0,
        master_key: MASTER_KEY.to_string(),
        upstream_url: upstream_url.to_string(),
        user_agent: "TestAgent/1.0".to_string(),
        models: default_models(),
        read_timeout_secs: None,
        max_body_bytes: 64 * 1024 * 1024,
    }
}

pub fn sample_chat_request(model: &str, stream: bool) -> ChatCompletionCreate {
    ChatCompletionCreate {
        model: model.to_string(),
        messages: vec![Message::new(Role::User, "Hello, how are you?")],
        temperature: None,
        stream: Some(stream),
    }
}

pub fn conversation_request(model: &str, stream: bool) -> ChatCompletionCreate {
    ChatCompletionCreate {
        model: model.to_string(),
        messages: vec![
            Message::new(Role::User, "cat"),
            Message::new(Role::Assistant, "ok"),
            Message::new(Role::User, "dog"),
        ],
        temperature: Some(0.3),
        stream: Some(stream),
    }
}

pub fn sample_chat_body(model: &str, stream: bool) -> Value {
    json!({
        "model": model,
        "messages": [{"role": "user", "content": "Hello, how are you?", "name": "tester"}],
        "stream": stream
    })
}

pub const CITATION_FRAGMENT: &str = r#"{"type":"citations","citations":[{"url":"https://example.test"}]}"#;
