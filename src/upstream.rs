use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use actix_web::web::Bytes;
use async_trait::async_trait;
use futures_core::Stream;
use serde::Serialize;
use tokio_stream::StreamExt;

use crate::config::Config;
use crate::consts;
use crate::errors::GatewayError;
use crate::identity::{self, GuestIdentity};
use crate::models::upstream::{UpstreamChatRequest, UpstreamImageRequest};

/// Raw upstream body, read incrementally.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, GatewayError>> + Send>>;

#[async_trait]
pub trait UpstreamApi: Send + Sync {
    /// POST `/api/chat`; the body is returned unread.
    async fn send_chat(
        &self,
        payload: &UpstreamChatRequest,
        identity: &GuestIdentity,
    ) -> Result<ByteStream, GatewayError>;

    /// POST `/api/image`; the full image body is returned.
    async fn send_image(
        &self,
        payload: &UpstreamImageRequest,
        identity: &GuestIdentity,
    ) -> Result<Bytes, GatewayError>;
}

pub struct UpstreamClient {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl UpstreamClient {
    pub fn new(client: reqwest::Client, config: Arc<Config>) -> Self {
        Self { client, config }
    }

    async fn post<T: Serialize + Sync>(
        &self,
        path: &str,
        body: &T,
        identity: &GuestIdentity,
    ) -> Result<reqwest::Response, GatewayError> {
        let response = self
            .client
            .post(format!("{}{}", self.config.upstream_url, path))
            .headers(identity::upstream_headers(identity, &self.config))
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            log::error!("upstream {path} error: status {status}, text {text}");

            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl UpstreamApi for UpstreamClient {
    async fn send_chat(
        &self,
        payload: &UpstreamChatRequest,
        identity: &GuestIdentity,
    ) -> Result<ByteStream, GatewayError> {
        log::info!("sending to upstream [{}]", payload.model);
        let response = self.post("/api/chat", payload, identity).await?;

        let stream = response
            .bytes_stream()
            .map(|read| read.map_err(|e| GatewayError::StreamTranslation(e.to_string())));
        Ok(Box::pin(stream))
    }

    async fn send_image(
        &self,
        payload: &UpstreamImageRequest,
        identity: &GuestIdentity,
    ) -> Result<Bytes, GatewayError> {
        let response = self.post("/api/image", payload, identity).await?;
        let image = response.bytes().await?;
        if image.is_empty() {
            return Err(GatewayError::EmptyResult(
                "upstream returned an empty image".to_string(),
            ));
        }
        Ok(image)
    }
}

/// Outbound HTTP client: fixed connect timeout, optional per-read timeout.
pub fn build_http_client(config: &Config) -> Result<reqwest::Client, GatewayError> {
    let mut builder =
        reqwest::Client::builder().connect_timeout(Duration::from_secs(consts::CONNECT_TIMEOUT_SECS));
    if let Some(secs) = config.read_timeout_secs {
        builder = builder.read_timeout(Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| GatewayError::Config(format!("failed to build HTTP client: {e}")))
}
