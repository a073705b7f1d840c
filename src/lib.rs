//! Device API: CRUD REST service for device records backed by PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod model;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;

pub use config::{DbConfig, ServerConfig};
pub use error::{AppError, ConfigError, ServiceError, StoreInitError};
pub use migration::ensure_devices_table;
pub use model::{CreateDeviceRequest, Device, DeviceDto, UpdateDeviceRequest};
pub use repository::{DeviceRepository, MemoryDeviceRepository, PgDeviceRepository};
pub use routes::{common_routes, device_routes};
pub use service::DeviceService;
pub use state::AppState;

use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Largest accepted request body. Larger JSON bodies are rejected by
/// [`extractors::ValidJson`] with a 413.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Full application router: operational routes at the root, devices under `/api/v1`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .nest("/api/v1", device_routes(state))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
}
