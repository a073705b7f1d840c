//! Schema reconciliation for the `devices` table.
//! Additive only: missing tables, columns and indexes are created; nothing is dropped or renamed.

use crate::error::StoreInitError;
use sqlx::PgPool;

pub const DEVICES_TABLE: &str = "devices";

/// Expected columns and their definitions, in creation order.
const DEVICE_COLUMNS: &[(&str, &str)] = &[
    ("id", "BIGSERIAL PRIMARY KEY"),
    ("created_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("updated_at", "TIMESTAMPTZ NOT NULL DEFAULT NOW()"),
    ("deleted_at", "TIMESTAMPTZ"),
    ("name", "TEXT NOT NULL"),
    ("type", "TEXT NOT NULL"),
];

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// `CREATE TABLE IF NOT EXISTS` statement for the full table.
pub fn create_table_sql() -> String {
    let col_defs: Vec<String> = DEVICE_COLUMNS
        .iter()
        .map(|(name, def)| format!("{} {}", quote(name), def))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\n  {}\n)",
        quote(DEVICES_TABLE),
        col_defs.join(",\n  ")
    )
}

/// One `ADD COLUMN IF NOT EXISTS` per column, for tables created by an older version.
/// The primary key column is skipped; it always exists once the table does.
/// `NOT NULL` text columns get an empty default so the statement succeeds on populated tables.
pub fn add_column_sql() -> Vec<String> {
    DEVICE_COLUMNS
        .iter()
        .filter(|(name, _)| *name != "id")
        .map(|(name, def)| {
            let def = if def.starts_with("TEXT NOT NULL") {
                "TEXT NOT NULL DEFAULT ''"
            } else {
                *def
            };
            format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                quote(DEVICES_TABLE),
                quote(name),
                def
            )
        })
        .collect()
}

pub fn deleted_at_index_sql() -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS idx_devices_deleted_at ON {} ({})",
        quote(DEVICES_TABLE),
        quote("deleted_at")
    )
}

/// Create the `devices` table if absent and add any missing columns. Idempotent.
pub async fn ensure_devices_table(pool: &PgPool) -> Result<(), StoreInitError> {
    let create = create_table_sql();
    tracing::debug!(sql = %create, "schema");
    sqlx::query(&create)
        .execute(pool)
        .await
        .map_err(StoreInitError::Schema)?;

    for sql in add_column_sql() {
        tracing::debug!(sql = %sql, "schema");
        sqlx::query(&sql)
            .execute(pool)
            .await
            .map_err(StoreInitError::Schema)?;
    }

    sqlx::query(&deleted_at_index_sql())
        .execute(pool)
        .await
        .map_err(StoreInitError::Schema)?;
    Ok(())
}
