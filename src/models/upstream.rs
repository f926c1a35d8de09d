//! Request bodies understood by the upstream `/api/chat` and `/api/image` endpoints.

use serde::{self, Deserialize, Serialize};

use super::Role;
use super::request::{ChatCompletionCreate, MessageContent};
use crate::consts;
use crate::identity::GuestIdentity;

/// Only `role` and `content` are forwarded upstream.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpstreamMessage {
    pub role: Role,
    pub content: MessageContent,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpstreamChatRequest {
    pub user_id: String,
    pub user_level: String,
    pub model: String,
    pub messages: Vec<UpstreamMessage>,
    pub prompt: String,
    pub temperature: f64,
    #[serde(rename = "enableWebSearch")]
    pub enable_web_search: bool,
    #[serde(rename = "usedVoiceInput")]
    pub used_voice_input: bool,
    #[serde(rename = "deviceId")]
    pub device_id: String,
}

impl UpstreamChatRequest {
    pub fn new(
        request: &ChatCompletionCreate,
        upstream_model: &str,
        identity: &GuestIdentity,
    ) -> Self {
        Self {
            user_id: identity.guest_id.clone(),
            user_level: consts::UPSTREAM_USER_LEVEL.to_string(),
            model: upstream_model.to_string(),
            messages: request
                .messages
                .iter()
                .map(|m| UpstreamMessage {
                    role: m.role,
                    content: m.content.clone(),
                })
                .collect(),
            prompt: String::new(),
            temperature: request.temperature.unwrap_or(consts::DEFAULT_TEMPERATURE),
            enable_web_search: false,
            used_voice_input: false,
            device_id: identity.guest_id.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct UpstreamImageRequest {
    pub prompt: String,
    pub user_id: String,
    pub device_id: String,
    pub user_level: String,
}

impl UpstreamImageRequest {
    pub fn new(prompt: &str, identity: &GuestIdentity) -> Self {
        Self {
            prompt: prompt.to_string(),
            user_id: identity.guest_id.clone(),
            device_id: identity.guest_id.clone(),
            user_level: consts::UPSTREAM_USER_LEVEL.to_string(),
        }
    }
}
