use std::sync::Mutex;

use actix_web::web::Bytes;
use async_trait::async_trait;

use aigc_gateway::errors::GatewayError;
use aigc_gateway::identity::GuestIdentity;
use aigc_gateway::models::upstream::{UpstreamChatRequest, UpstreamImageRequest};
use aigc_gateway::upstream::{ByteStream, UpstreamApi};

/// In-memory upstream that replays canned reads and records every call.
pub struct RecordingUpstream {
    chat_reads: Vec<Result<Bytes, GatewayError>>,
    chat_error: Option<GatewayError>,
    image: Result<Bytes, GatewayError>,
    chat_calls: Mutex<Vec<(UpstreamChatRequest, GuestIdentity)>>,
    image_calls: Mutex<Vec<(UpstreamImageRequest, GuestIdentity)>>,
}

impl RecordingUpstream {
    pub fn new() -> Self {
        Self {
            chat_reads: vec![],
            chat_error: None,
            image: Ok(Bytes::from_static(b"\x89PNG fake image")),
            chat_calls: Mutex::new(vec![]),
            image_calls: Mutex::new(vec![]),
        }
    }

    pub fn with_chat_reads(mut self, reads: &[&str]) -> Self {
        self.chat_reads = reads
            .iter()
            .map(|r| Ok(Bytes::copy_from_slice(r.as_bytes())))
            .collect();
        self
    }

    pub fn with_raw_chat_reads(mut self, reads: Vec<Result<Bytes, GatewayError>>) -> Self {
        self.chat_reads = reads;
        self
    }

    pub fn with_chat_error(mut self, error: GatewayError) -> Self {
        self.chat_error = Some(error);
        self
    }

    pub fn with_image(mut self, image: Result<Bytes, GatewayError>) -> Self {
        self.image = image;
        self
    }

    pub fn chat_calls(&self) -> Vec<(UpstreamChatRequest, GuestIdentity)> {
        self.chat_calls.lock().unwrap().clone()
    }

    pub fn image_calls(&self) -> Vec<(UpstreamImageRequest, GuestIdentity)> {
        self.image_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamApi for RecordingUpstream {
    async fn send_chat(
        &self,
        payload: &UpstreamChatRequest,
        identity: &GuestIdentity,
    ) -> Result<ByteStream, GatewayError> {
        self.chat_calls
            .lock()
            .unwrap()
            .push((payload.clone(), identity.clone()));

        if let Some(error) = &self.chat_error {
            return Err(error.clone());
        }
        Ok(Box::pin(tokio_stream::iter(self.chat_reads.clone())))
    }

    async fn send_image(
        &self,
        payload: &UpstreamImageRequest,
        identity: &GuestIdentity,
    ) -> Result<Bytes, GatewayError> {
        self.image_calls
            .lock()
            .unwrap()
            .push((payload.clone(), identity.clone()));
        self.image.clone()
    }
}
