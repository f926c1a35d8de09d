use phf::phf_map;

pub(crate) const DEFAULT_PORT: u16 = 3000;
pub(crate) const DEFAULT_MASTER_KEY: &str = "sk-hackaigc-free";
pub(crate) const DEFAULT_UPSTREAM_URL: &str = "https://chat.hackaigc.com";
/// Inbound JSON body limit. Follow-up turns carry earlier base64 images.
pub const DEFAULT_MAX_BODY_BYTES: usize = 64 * 1024 * 1024;
pub(crate) const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Client-facing model name -> upstream model name.
pub static DEFAULT_MODEL_MAP: phf::Map<&'static str, &'static str> = phf_map! {
    "gpt-4o" => "gpt-4o",
    "gpt-4o-mini" => "gpt-4o-mini",
    "gpt-4-turbo" => "gpt-4-turbo",
    "claude-3-5-sonnet" => "claude-3-5-sonnet",
    "midjourney" => "midjourney",
};

/// Upstream model used when the requested name is not in the alias table.
pub const FALLBACK_UPSTREAM_MODEL: &str = "gpt-3.5-turbo";

pub(crate) const DEFAULT_TEMPERATURE: f64 = 0.7;
pub(crate) const UPSTREAM_USER_LEVEL: &str = "free";
pub(crate) const GUEST_ID_PREFIX: &str = "guest_";
pub(crate) const GUEST_TOKEN_PREFIX: &str = "anonymous_";

/// Upstream fragments containing this marker are citation annotations, not content.
pub const CITATIONS_MARKER: &str = r#""type":"citations""#;

pub const IMAGE_MODEL_KEYWORD: &str = "midjourney";
pub const DEFAULT_IMAGE_PROMPT: &str = "A cute cat";
pub const IMAGE_READY_MARKER: &str = "🎨 **Generated Image**";

pub(crate) const SSE_DONE: &[u8] = b"data: [DONE]\n\n";
pub(crate) const CHUNK_OBJECT: &str = "chat.completion.chunk";
pub(crate) const COMPLETION_OBJECT: &str = "chat.completion";
pub(crate) const CHARS_PER_TOKEN: usize = 4;

pub(crate) const MODEL_CREATED: i64 = 1677610602;

pub(crate) const CONNECT_TIMEOUT_SECS: u64 = 30;
pub const CHANNEL_BUFFER_SIZE: usize = 100;
