//! Rewrites image-model chat requests into upstream image generation.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::consts;
use crate::models::Role;
use crate::models::request::Message;

/// True when the requested model should be served by the image endpoint.
pub fn is_image_model(model: &str) -> bool {
    model.to_lowercase().contains(consts::IMAGE_MODEL_KEYWORD)
}

/// Content of the most recent user message, or the default prompt.
pub fn select_prompt(messages: &[Message]) -> String {
    messages
        .iter()
        .rev()
        .find(|m| m.role == Role::User)
        .map(|m| m.content.text())
        .unwrap_or_else(|| consts::DEFAULT_IMAGE_PROMPT.to_string())
}

pub fn encode_image(image: &[u8]) -> String {
    STANDARD.encode(image)
}

/// Assistant message embedding a PNG data URI.
pub fn image_markdown(b64: &str) -> String {
    format!(
        "{}\n\n![Generated Image](data:image/png;base64,{})",
        consts::IMAGE_READY_MARKER,
        b64
    )
}
