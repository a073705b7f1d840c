//! Connection pool setup for the device store.

use crate::config::DbConfig;
use crate::error::StoreInitError;
use crate::migration::ensure_devices_table;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Open a pool against the configured database. Fails if no connection can be established.
pub async fn connect(config: &DbConfig) -> Result<PgPool, StoreInitError> {
    tracing::debug!(host = %config.host, port = config.port, database = %config.name, "connecting to database");
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(config.connect_options())
        .await
        .map_err(StoreInitError::Connect)
}

/// Connect and make sure the `devices` table matches the expected shape.
pub async fn open(config: &DbConfig) -> Result<PgPool, StoreInitError> {
    let pool = connect(config).await?;
    ensure_devices_table(&pool).await?;
    tracing::info!(database = %config.name, "device store ready");
    Ok(pool)
}
