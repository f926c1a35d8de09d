use std::fmt;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde_json::json;

#[derive(Debug, Clone)]
pub enum GatewayError {
    Auth(String),
    NotFound(String),
    InvalidRequest(String),
    Upstream { status: u16, body: String },
    EmptyResult(String),
    StreamTranslation(String),
    Network(String),
    Parse(String),
    Config(String),
    Unhandled(String),
}

impl GatewayError {
    /// Value of `error.type` in the JSON envelope.
    pub fn error_type(&self) -> &'static str {
        match self {
            GatewayError::Auth(_) => "auth_error",
            GatewayError::NotFound(_) => "not_found",
            GatewayError::InvalidRequest(_) => "invalid_request_error",
            GatewayError::Upstream { .. } => "upstream_error",
            GatewayError::EmptyResult(_) => "empty_result",
            GatewayError::StreamTranslation(_) => "stream_error",
            GatewayError::Network(_) => "network_error",
            GatewayError::Parse(_) => "parse_error",
            GatewayError::Config(_) => "config_error",
            GatewayError::Unhandled(_) => "server_error",
        }
    }

    /// Human-readable message without the variant prefix.
    pub fn message(&self) -> String {
        match self {
            GatewayError::Upstream { status, .. } => format!("Upstream error: {status}"),
            GatewayError::Auth(msg)
            | GatewayError::NotFound(msg)
            | GatewayError::InvalidRequest(msg)
            | GatewayError::EmptyResult(msg)
            | GatewayError::StreamTranslation(msg)
            | GatewayError::Network(msg)
            | GatewayError::Parse(msg)
            | GatewayError::Config(msg)
            | GatewayError::Unhandled(msg) => msg.clone(),
        }
    }

    /// Collapse any error into a request-level 500, keeping its message.
    pub fn into_unhandled(self) -> GatewayError {
        match self {
            GatewayError::Unhandled(_) => self,
            other => GatewayError::Unhandled(other.to_string()),
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayError::Auth(msg) => write!(f, "Auth error: {}", msg),
            GatewayError::NotFound(msg) => write!(f, "Not found: {}", msg),
            GatewayError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            GatewayError::Upstream { status, body } => {
                write!(f, "Upstream error: status {}, body {}", status, body)
            }
            GatewayError::EmptyResult(msg) => write!(f, "Empty result: {}", msg),
            GatewayError::StreamTranslation(msg) => write!(f, "Stream error: {}", msg),
            GatewayError::Network(msg) => write!(f, "Network error: {}", msg),
            GatewayError::Parse(msg) => write!(f, "Parse error: {}", msg),
            GatewayError::Config(msg) => write!(f, "Config error: {}", msg),
            GatewayError::Unhandled(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for GatewayError {}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::Auth(_) => StatusCode::UNAUTHORIZED,
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            GatewayError::Network(_) | GatewayError::Parse(_) => StatusCode::BAD_GATEWAY,
            GatewayError::EmptyResult(_)
            | GatewayError::StreamTranslation(_)
            | GatewayError::Config(_)
            | GatewayError::Unhandled(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let mut error = json!({
            "message": self.message(),
            "type": self.error_type(),
            "code": status.as_u16().to_string(),
        });
        if let GatewayError::Upstream { body, .. } = self {
            error["details"] = json!(body);
        }
        HttpResponse::build(status).json(json!({ "error": error }))
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() || err.is_connect() {
            GatewayError::Network(err.to_string())
        } else if let Some(status) = err.status() {
            GatewayError::Upstream {
                status: status.as_u16(),
                body: err.to_string(),
            }
        } else {
            GatewayError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::Parse(err.to_string())
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Config(err.to_string())
    }
}
