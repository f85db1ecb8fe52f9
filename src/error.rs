//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("duplicate resource type: {0}")]
    DuplicateResourceType(String),
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate field '{name}' on resource {resource_type}")]
    DuplicateField { resource_type: String, name: String },
    #[error("invalid id field: resource {resource_type} has no field '{field}'")]
    InvalidIdField { resource_type: String, field: String },
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("missing id: resource {resource_type} has no value for '{field}'")]
    MissingId { resource_type: String, field: String },
    #[error("invalid entity data: {0}")]
    InvalidData(String),
    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AppError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::MissingId { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "missing_id"),
            AppError::InvalidData(_) => (StatusCode::INTERNAL_SERVER_ERROR, "invalid_data"),
            AppError::Serialization(_) => (StatusCode::INTERNAL_SERVER_ERROR, "serialization_error"),
        }
    }
}

/// JSON:API error document: `{ "errors": [ ... ] }`.
#[derive(Serialize)]
pub struct ErrorBody {
    pub errors: Vec<ErrorObject>,
}

#[derive(Serialize)]
pub struct ErrorObject {
    pub status: String,
    pub code: String,
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let body = ErrorBody {
            errors: vec![ErrorObject {
                status: status.as_u16().to_string(),
                code: code.to_string(),
                detail: self.to_string(),
            }],
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_request_maps_to_400() {
        let resp = AppError::BadRequest("fields[".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn config_error_is_internal() {
        let err: AppError = ConfigError::DuplicateResourceType("tasks".into()).into();
        assert_eq!(err.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "config_error"));
        assert_eq!(err.to_string(), "duplicate resource type: tasks");
    }

    #[test]
    fn invalid_data_is_internal() {
        let err = AppError::InvalidData("unsupported id value for projects: [1,2]".into());
        assert_eq!(err.status_and_code(), (StatusCode::INTERNAL_SERVER_ERROR, "invalid_data"));
    }
}
