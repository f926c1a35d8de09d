use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath, from_fn};
use actix_web::web::Data;
use actix_web::{App, Error, web};

use crate::errors::GatewayError;
use crate::{config, handlers, middleware, service};

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::to(handlers::health))
        .route("/models", web::to(handlers::models))
        .route("/chat/completions", web::to(handlers::chat_completion))
        .route("/images/generations", web::to(handlers::image_generation));
}

/// Bodies are parsed as JSON whatever their content type.
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .error_handler(|err, _req| GatewayError::InvalidRequest(err.to_string()).into())
}

pub fn create_app(
    gateway_service: Arc<service::GatewayService>,
    config: Arc<config::Config>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    let body_limit = config.max_body_bytes;

    // Last wrap runs first: logger, CORS headers, path trim, preflight, auth.
    App::new()
        .wrap(from_fn(middleware::require_bearer))
        .wrap(from_fn(middleware::cors_preflight))
        .wrap(NormalizePath::trim())
        .wrap(middleware::cors_headers())
        .wrap(Logger::default())
        .app_data(Data::from(gateway_service))
        .app_data(Data::from(config))
        .app_data(json_config(body_limit))
        .route("/", web::to(handlers::health))
        .service(
            web::scope("/v1")
                .route("", web::to(handlers::health))
                .configure(routes),
        )
        .configure(routes)
        .default_service(web::to(handlers::not_found))
}
