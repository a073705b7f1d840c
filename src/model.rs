//! Stored device rows and their wire projections.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `devices` table.
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Device {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "type")]
    pub device_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Soft-delete marker. Rows with a value here are invisible to reads.
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Insert payload; id and timestamps are assigned by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDevice {
    pub name: String,
    pub device_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDto {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub device_type: String,
}

/// A stored row whose id cannot be exposed as an unsigned wire id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("device row has negative id {0}")]
pub struct NegativeId(pub i64);

impl TryFrom<Device> for DeviceDto {
    type Error = NegativeId;

    fn try_from(d: Device) -> Result<Self, Self::Error> {
        let id = u64::try_from(d.id).map_err(|_| NegativeId(d.id))?;
        Ok(Self {
            id,
            name: d.name,
            device_type: d.device_type,
        })
    }
}

/// Body of `POST /api/v1/devices`. Fields are optional so that a missing
/// field reaches validation instead of failing decode.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateDeviceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
}

/// Body of `PUT /api/v1/devices/{id}`. Full replacement of name and type.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDeviceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub device_type: Option<String>,
}

impl CreateDeviceRequest {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            device_type: Some(device_type.into()),
        }
    }
}

impl UpdateDeviceRequest {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            device_type: Some(device_type.into()),
        }
    }
}
