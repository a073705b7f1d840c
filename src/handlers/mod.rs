//! HTTP handlers for device CRUD and operational endpoints.

pub mod device;
pub mod common;
pub use device::*;
