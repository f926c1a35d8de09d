pub mod image;
pub mod model_list;
pub mod request;
pub mod response_direct;
pub mod response_stream;
pub mod upstream;

use serde::{self, Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
}

/// Coarse usage estimate; no tokenizer is involved.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

impl Usage {
    /// One token per started group of four characters; prompt tokens are not counted.
    pub fn estimate(content: &str) -> Self {
        let chars = content.chars().count();
        let completion_tokens = chars.div_ceil(crate::consts::CHARS_PER_TOKEN) as u64;
        Self {
            prompt_tokens: 0,
            completion_tokens,
            total_tokens: completion_tokens,
        }
    }
}
