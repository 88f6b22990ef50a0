// HTTP API Error Types
use axum::{extract::rejection::JsonRejection, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::database::manager::{ConstraintKind, DatabaseError};
use crate::resources::ResourceSpec;

pub const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Ruta no encontrada";

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError(String),
    InvalidJson(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError(msg) => msg,
            ApiError::InvalidJson(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::Conflict(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Failure envelope
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message()
        })
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        ApiError::ValidationError(message.into())
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError(INTERNAL_ERROR_MESSAGE.to_string())
    }

    /// Translate a gateway error using the resource's own messages. Only constraint,
    /// input and not-found conditions get a specific answer; everything else is logged
    /// and reported as a generic internal error.
    pub fn from_database(err: DatabaseError, spec: &ResourceSpec) -> Self {
        match err {
            DatabaseError::ConstraintViolation { kind, code, constraint, message } => {
                tracing::debug!(
                    resource = spec.path,
                    code = %code,
                    constraint = ?constraint,
                    "constraint violation: {}",
                    message
                );
                match kind {
                    ConstraintKind::Unique => ApiError::conflict(spec.messages.conflict),
                    ConstraintKind::ForeignKey => ApiError::bad_request(spec.messages.missing_reference),
                    ConstraintKind::NotNull => ApiError::validation_error(spec.messages.required),
                    ConstraintKind::Check => {
                        ApiError::bad_request("Uno de los valores está fuera del rango permitido")
                    }
                }
            }
            DatabaseError::InvalidInput { code, message } => {
                tracing::debug!(resource = spec.path, code = %code, "invalid input: {}", message);
                ApiError::bad_request("Uno de los campos tiene un formato inválido")
            }
            DatabaseError::NotFound(_) => ApiError::not_found(spec.messages.not_found),
            other => {
                // Don't expose internal database errors to clients
                tracing::error!(resource = spec.path, "database error: {}", other);
                ApiError::internal_server_error()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("rejected request body: {}", rejection.body_text());
        ApiError::invalid_json("El cuerpo de la solicitud debe ser un objeto JSON válido")
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
