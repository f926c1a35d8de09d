use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header::{self, HeaderMap};
use actix_web::http::Method;
use actix_web::middleware::{DefaultHeaders, Next};
use actix_web::web::Data;
use actix_web::{Error, HttpResponse, ResponseError};

use crate::config::Config;
use crate::errors::GatewayError;

/// Strips an optional `/v1` prefix and trailing slashes; the root stays `/`.
pub fn normalize_path(path: &str) -> &str {
    let path = match path.strip_prefix("/v1") {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() { "/" } else { trimmed }
}

/// Routes reachable without a bearer token.
pub fn is_auth_exempt(path: &str) -> bool {
    matches!(normalize_path(path), "/" | "/health" | "/models")
}

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
}

/// Permissive CORS headers on every response.
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_METHODS, "*"))
        .add((header::ACCESS_CONTROL_ALLOW_HEADERS, "*"))
}

/// Answers every `OPTIONS` request with 204 before auth and routing.
pub async fn cors_preflight(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if *req.method() == Method::OPTIONS {
        return Ok(req
            .into_response(HttpResponse::NoContent().finish())
            .map_into_right_body());
    }
    Ok(next.call(req).await?.map_into_left_body())
}

pub async fn require_bearer(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    if is_auth_exempt(req.path()) {
        return Ok(next.call(req).await?.map_into_left_body());
    }

    let rejection = match req.app_data::<Data<Config>>() {
        Some(config) if bearer_token(req.headers()) == Some(config.master_key.as_str()) => None,
        Some(_) => Some(GatewayError::Auth("Invalid API Key".to_string())),
        None => Some(GatewayError::Config("gateway configuration missing".to_string())),
    };

    if let Some(error) = rejection {
        log::info!("rejected {} {}: {}", req.method(), req.path(), error);
        let response = error.error_response();
        return Ok(req.into_response(response).map_into_right_body());
    }

    Ok(next.call(req).await?.map_into_left_body())
}
