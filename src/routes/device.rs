//! Device CRUD routes, mounted under `/api/v1`.

use crate::handlers::device::{create, delete as delete_handler, list, read, update};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn device_routes(state: AppState) -> Router {
    Router::new()
        .route("/devices", get(list).post(create))
        .route(
            "/devices/:id",
            get(read).put(update).delete(delete_handler),
        )
        .with_state(state)
}
