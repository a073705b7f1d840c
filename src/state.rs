//! Shared application state for all routes.

use crate::service::DeviceService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub devices: Arc<DeviceService>,
}

impl AppState {
    pub fn new(devices: DeviceService) -> Self {
        Self {
            devices: Arc::new(devices),
        }
    }
}
