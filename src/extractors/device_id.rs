//! Extract a device id from the `:id` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

pub const INVALID_DEVICE_ID: &str = "Invalid device ID";

/// Non-negative integer id taken from the path. Anything else is a 400.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DeviceId(pub u64);

impl DeviceId {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.parse::<u64>()
            .map(DeviceId)
            .map_err(|_| AppError::BadRequest(INVALID_DEVICE_ID.into()))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for DeviceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest(INVALID_DEVICE_ID.into()))?;
        tracing::trace!(id = %raw, "device id segment");
        DeviceId::parse(&raw)
    }
}
