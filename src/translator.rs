//! Upstream byte stream -> OpenAI chat output.
//!
//! [`Fragments`] is the single decode/filter source. Two sinks consume it:
//! [`stream_chunks`] emits one SSE event per fragment, [`collect_completion`]
//! buffers everything into one `chat.completion` object.

use actix_web::web::Bytes;
use serde::Serialize;
use serde_json::json;
use tokio::sync::mpsc::Sender;
use tokio_stream::StreamExt;

use crate::consts;
use crate::errors::GatewayError;
use crate::models::response_direct::{AssistantMessage, ChatCompletion, Choice};
use crate::models::response_stream::{ChatCompletionChunk, ChunkChoice, ChunkChoiceDelta};
use crate::models::{FinishReason, Role, Usage};
use crate::upstream::ByteStream;

/// Incremental UTF-8 decoder that carries incomplete trailing sequences
/// over to the next read. Invalid sequences decode to U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);

        let mut decoded = String::with_capacity(self.pending.len());
        let mut rest: &[u8] = &self.pending;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    decoded.push_str(text);
                    rest = &[];
                    break;
                }
                Err(e) => {
                    let (valid, tail) = rest.split_at(e.valid_up_to());
                    decoded.push_str(&String::from_utf8_lossy(valid));
                    match e.error_len() {
                        Some(invalid) => {
                            log::debug!("replacing {invalid} invalid UTF-8 bytes from upstream");
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = &tail[invalid..];
                        }
                        None => {
                            rest = tail;
                            break;
                        }
                    }
                }
            }
        }

        self.pending = rest.to_vec();
        decoded
    }

    /// Flushes a multi-byte character left incomplete at end of stream as U+FFFD.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        log::debug!(
            "upstream stream ended inside a multi-byte character ({} dangling bytes)",
            self.pending.len()
        );
        self.pending.clear();
        Some(char::REPLACEMENT_CHARACTER.to_string())
    }
}

pub fn is_citation_fragment(text: &str) -> bool {
    text.contains(consts::CITATIONS_MARKER)
}

/// Lazy, single-pass sequence of decoded and filtered upstream text fragments.
///
/// Yields at most one error, after which it is exhausted.
pub struct Fragments {
    inner: ByteStream,
    decoder: Utf8Decoder,
    finished: bool,
    seen_first: bool,
}

impl Fragments {
    pub fn new(inner: ByteStream) -> Self {
        Self {
            inner,
            decoder: Utf8Decoder::new(),
            finished: false,
            seen_first: false,
        }
    }

    pub async fn next(&mut self) -> Option<Result<String, GatewayError>> {
        while !self.finished {
            let (text, read_len) = match self.inner.next().await {
                Some(Ok(bytes)) => (self.decoder.decode(&bytes), bytes.len()),
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e));
                }
                None => {
                    self.finished = true;
                    match self.decoder.finish() {
                        Some(text) => (text, 0),
                        None => return None,
                    }
                }
            };

            if text.is_empty() {
                continue;
            }
            if !self.seen_first {
                self.seen_first = true;
                log::debug!(
                    "first upstream fragment ({} bytes): {}",
                    read_len,
                    text.chars().take(50).collect::<String>()
                );
            }
            if is_citation_fragment(&text) {
                log::debug!("dropping citation fragment ({} bytes)", text.len());
                continue;
            }
            return Some(Ok(text));
        }
        None
    }
}

/// Identity shared by every chunk of one response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionMeta {
    pub id: String,
    pub created: i64,
    pub model: String,
}

impl CompletionMeta {
    pub fn new(model: &str) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: format!("chatcmpl-{}", now.timestamp_millis()),
            created: now.timestamp(),
            model: model.to_string(),
        }
    }

    pub fn chunk(&self, content: String, finish_reason: Option<FinishReason>) -> ChatCompletionChunk {
        ChatCompletionChunk {
            id: self.id.clone(),
            object: consts::CHUNK_OBJECT.to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![ChunkChoice {
                index: 0,
                delta: ChunkChoiceDelta {
                    content: Some(content),
                },
                finish_reason,
            }],
        }
    }

    pub fn completion(&self, content: String) -> ChatCompletion {
        let usage = Usage::estimate(&content);
        ChatCompletion {
            id: self.id.clone(),
            object: consts::COMPLETION_OBJECT.to_string(),
            created: self.created,
            model: self.model.clone(),
            choices: vec![Choice {
                index: 0,
                message: AssistantMessage {
                    role: Role::Assistant,
                    content,
                },
                finish_reason: FinishReason::Stop,
            }],
            usage,
        }
    }
}

pub fn sse_event<T: Serialize>(payload: &T) -> Result<Bytes, GatewayError> {
    let json = serde_json::to_string(payload)?;
    Ok(Bytes::from(format!("data: {json}\n\n")))
}

pub fn sse_error(error: &GatewayError) -> Bytes {
    Bytes::from(format!("data: {}\n\n", json!({ "error": error.message() })))
}

pub fn sse_done() -> Bytes {
    Bytes::from_static(consts::SSE_DONE)
}

/// Complete SSE body carrying a whole message in a single `stop` chunk.
pub fn single_chunk_sse(meta: &CompletionMeta, content: String) -> Result<Bytes, GatewayError> {
    let chunk = sse_event(&meta.chunk(content, Some(FinishReason::Stop)))?;
    let mut body = Vec::with_capacity(chunk.len() + consts::SSE_DONE.len());
    body.extend_from_slice(&chunk);
    body.extend_from_slice(consts::SSE_DONE);
    Ok(Bytes::from(body))
}

/// Streaming sink: one SSE event per fragment, then `[DONE]`.
///
/// A failure mid-stream is reported as one SSE error event and ends the
/// stream. Returns early once the receiving side is gone.
pub async fn stream_chunks(
    mut fragments: Fragments,
    meta: CompletionMeta,
    sender: Sender<Result<Bytes, GatewayError>>,
) {
    while let Some(fragment) = fragments.next().await {
        let event = fragment.and_then(|text| sse_event(&meta.chunk(text, None)));
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                log::error!("stream translation error: {e}");
                let _ = sender.send(Ok(sse_error(&e))).await;
                return;
            }
        };
        if sender.send(Ok(event)).await.is_err() {
            log::debug!("client went away, stopping upstream relay");
            return;
        }
    }

    if sender.send(Ok(sse_done())).await.is_err() {
        log::debug!("client went away before [DONE]");
    }
}

/// Buffered sink: concatenates every fragment into one completion.
pub async fn collect_completion(
    mut fragments: Fragments,
    meta: &CompletionMeta,
) -> Result<ChatCompletion, GatewayError> {
    let mut content = String::new();
    while let Some(fragment) = fragments.next().await {
        content.push_str(&fragment?);
    }
    Ok(meta.completion(content))
}
