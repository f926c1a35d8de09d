use serde::{self, Deserialize, Serialize};

/// `/images/generations` request. Only `prompt` reaches the upstream.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ImageGenerationCreate {
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub n: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub response_format: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImageData {
    pub b64_json: String,
    pub revised_prompt: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ImagesResponse {
    pub created: i64,
    pub data: Vec<ImageData>,
}
