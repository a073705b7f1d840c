//! Request extractors that reject with [`crate::error::AppError`] instead of axum's defaults.

mod device_id;
mod json;

pub use device_id::DeviceId;
pub use json::ValidJson;
