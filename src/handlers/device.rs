//! Device CRUD handlers.

use crate::error::AppError;
use crate::extractors::{DeviceId, ValidJson};
use crate::model::{CreateDeviceRequest, DeviceDto, UpdateDeviceRequest};
use crate::response::{created, ok};
use crate::service::RequestValidator;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};

pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("GET /devices");
    let devices: Vec<DeviceDto> = state.devices.list().await?;
    Ok(ok(devices))
}

pub async fn read(
    State(state): State<AppState>,
    DeviceId(id): DeviceId,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id, "GET /devices/:id");
    let device = state.devices.get(id).await?;
    Ok(ok(device))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<CreateDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!("POST /devices");
    RequestValidator::validate(&body)?;
    let device = state.devices.create(body).await?;
    Ok(created(device))
}

pub async fn update(
    State(state): State<AppState>,
    DeviceId(id): DeviceId,
    ValidJson(body): ValidJson<UpdateDeviceRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id, "PUT /devices/:id");
    RequestValidator::validate(&body)?;
    if !state.devices.update(id, body).await? {
        return Err(AppError::Internal(format!("update of device {} reported no change", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete(
    State(state): State<AppState>,
    DeviceId(id): DeviceId,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(id, "DELETE /devices/:id");
    if !state.devices.delete(id).await? {
        return Err(AppError::Internal(format!("delete of device {} reported no change", id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
