//! Typed errors and HTTP mapping.

use crate::model::NegativeId;
use crate::response::ErrorBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Message returned for every 500. Internal detail only goes to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<&'static str>),
    #[error("invalid port in {var}: '{value}'")]
    InvalidPort { var: &'static str, value: String },
    #[error("invalid number in {var}: '{value}'")]
    InvalidNumber { var: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StoreInitError {
    #[error("database connection: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("schema reconciliation: {0}")]
    Schema(#[source] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("device {0} not found")]
    NotFound(u64),
    #[error("database: {0}")]
    Store(#[from] sqlx::Error),
    #[error("corrupt row: {0}")]
    InvalidRow(#[from] NegativeId),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("internal: {0}")]
    Internal(String),
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) | AppError::BadRequest(msg) => {
                tracing::warn!(error = %msg, "rejected request");
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::warn!(error = %msg, "rejected request");
                (StatusCode::PAYLOAD_TOO_LARGE, msg.clone())
            }
            AppError::Service(ServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, "Device not found".to_string())
            }
            AppError::Service(ServiceError::Store(e)) => {
                tracing::error!(error = %e, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::Service(ServiceError::InvalidRow(e)) => {
                tracing::error!(error = %e, "invalid stored row");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
            AppError::Internal(detail) => {
                tracing::error!(error = %detail, "internal failure");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE.to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
