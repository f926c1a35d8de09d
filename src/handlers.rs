use actix_web::http::header;
use actix_web::web::{Bytes, Data, Json};
use actix_web::{HttpRequest, HttpResponse, mime};
use serde_json::json;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::consts;
use crate::errors::GatewayError;
use crate::interceptor;
use crate::middleware::normalize_path;
use crate::models::image::ImageGenerationCreate;
use crate::models::request::ChatCompletionCreate;
use crate::service::GatewayService;
use crate::translator::{self, CompletionMeta};

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok", "mode": "actix-adapter" }))
}

pub async fn models(service: Data<GatewayService>) -> HttpResponse {
    HttpResponse::Ok().json(service.model_list())
}

fn event_stream() -> actix_web::HttpResponseBuilder {
    let mut builder = HttpResponse::Ok();
    builder
        .content_type(mime::TEXT_EVENT_STREAM)
        .insert_header((header::CACHE_CONTROL, "no-cache"));
    builder
}

pub async fn chat_completion(
    service: Data<GatewayService>,
    request: Json<ChatCompletionCreate>,
) -> Result<HttpResponse, GatewayError> {
    let request = request.into_inner();
    log::debug!("request: {:?}", request);

    let meta = CompletionMeta::new(&request.model);

    if interceptor::is_image_model(&request.model) {
        let markdown = service.image_chat(&request).await?;
        if request.is_streaming() {
            return Ok(event_stream().body(translator::single_chunk_sse(&meta, markdown)?));
        }
        return Ok(HttpResponse::Ok().json(meta.completion(markdown)));
    }

    if request.is_streaming() {
        let fragments = service.open_chat(&request).await?;
        let (sender, receiver) =
            mpsc::channel::<Result<Bytes, GatewayError>>(consts::CHANNEL_BUFFER_SIZE);
        actix_web::rt::spawn(translator::stream_chunks(fragments, meta, sender));

        return Ok(event_stream().streaming(ReceiverStream::new(receiver)));
    }

    match service.create_completion(&request).await {
        Ok(chat_completion) => Ok(HttpResponse::Ok().json(chat_completion)),
        Err(e) => {
            log::error!("create_completion error: {:?}", e);
            Err(e)
        }
    }
}

pub async fn image_generation(
    service: Data<GatewayService>,
    request: Json<ImageGenerationCreate>,
) -> Result<HttpResponse, GatewayError> {
    let images = service.generate_image(&request).await?;
    Ok(HttpResponse::Ok().json(images))
}

pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, GatewayError> {
    Err(GatewayError::NotFound(format!(
        "no route for {} {}",
        req.method(),
        normalize_path(req.path())
    )))
}
