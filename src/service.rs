use std::sync::Arc;

use crate::config::Config;
use crate::consts;
use crate::errors::GatewayError;
use crate::identity::GuestIdentity;
use crate::interceptor;
use crate::models::image::{ImageData, ImageGenerationCreate, ImagesResponse};
use crate::models::model_list::{ListObject, Model, ModelList, ObjectType, Owner};
use crate::models::request::ChatCompletionCreate;
use crate::models::response_direct::ChatCompletion;
use crate::models::upstream::{UpstreamChatRequest, UpstreamImageRequest};
use crate::translator::{self, CompletionMeta, Fragments};
use crate::upstream::UpstreamApi;

pub struct GatewayService {
    upstream: Arc<dyn UpstreamApi>,
    config: Arc<Config>,
}

impl GatewayService {
    pub fn new(upstream: Arc<dyn UpstreamApi>, config: Arc<Config>) -> Self {
        Self { upstream, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Sends the chat request upstream under a fresh guest identity.
    ///
    /// Upstream status errors surface here, before any output is produced.
    pub async fn open_chat(
        &self,
        request: &ChatCompletionCreate,
    ) -> Result<Fragments, GatewayError> {
        let identity = GuestIdentity::new();
        let upstream_model = self.config.resolve_model(&request.model);
        let payload = UpstreamChatRequest::new(request, upstream_model, &identity);

        let stream = self.upstream.send_chat(&payload, &identity).await?;
        Ok(Fragments::new(stream))
    }

    pub async fn create_completion(
        &self,
        request: &ChatCompletionCreate,
    ) -> Result<ChatCompletion, GatewayError> {
        let fragments = self.open_chat(request).await?;
        translator::collect_completion(fragments, &CompletionMeta::new(&request.model)).await
    }

    /// Base64 of the upstream image for `prompt`.
    pub async fn fetch_image(&self, prompt: &str) -> Result<String, GatewayError> {
        let identity = GuestIdentity::new();
        let payload = UpstreamImageRequest::new(prompt, &identity);

        log::info!("requesting upstream image ({} prompt chars)", prompt.chars().count());
        let image = self.upstream.send_image(&payload, &identity).await?;
        Ok(interceptor::encode_image(&image))
    }

    pub async fn generate_image(
        &self,
        request: &ImageGenerationCreate,
    ) -> Result<ImagesResponse, GatewayError> {
        let b64 = self.fetch_image(&request.prompt).await.map_err(|e| {
            log::error!("image generation failed: {e}");
            e.into_unhandled()
        })?;

        Ok(ImagesResponse {
            created: chrono::Utc::now().timestamp(),
            data: vec![ImageData {
                b64_json: b64,
                revised_prompt: request.prompt.clone(),
            }],
        })
    }

    /// Markdown answer for an image-model chat request. Never touches `/api/chat`.
    pub async fn image_chat(&self, request: &ChatCompletionCreate) -> Result<String, GatewayError> {
        let prompt = interceptor::select_prompt(&request.messages);
        let b64 = self.fetch_image(&prompt).await.map_err(|e| {
            log::error!("image chat failed: {e}");
            e.into_unhandled()
        })?;
        Ok(interceptor::image_markdown(&b64))
    }

    pub fn model_list(&self) -> ModelList {
        let data = self
            .config
            .models
            .keys()
            .map(|id| Model {
                id: id.to_string(),
                object: ObjectType::Model,
                created: consts::MODEL_CREATED,
                owned_by: Owner::OpenAI,
                permission: vec![],
            })
            .collect();

        ModelList {
            object: ListObject::List,
            data,
        }
    }
}
