use crate::model::{Device, NewDevice};
use crate::repository::DeviceRepository;
use async_trait::async_trait;
use sqlx::PgPool;

const SELECT_COLUMNS: &str = "id, name, type, created_at, updated_at, deleted_at";

/// [`DeviceRepository`] over a PostgreSQL pool. Each call checks out one connection for its duration.
#[derive(Clone)]
pub struct PgDeviceRepository {
    pool: PgPool,
}

impl PgDeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DeviceRepository for PgDeviceRepository {
    async fn find_all(&self) -> Result<Vec<Device>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM devices WHERE deleted_at IS NULL ORDER BY id",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Device>(&sql).fetch_all(&self.pool).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Device>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM devices WHERE id = $1 AND deleted_at IS NULL",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, Device>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert(&self, device: NewDevice) -> Result<Device, sqlx::Error> {
        let sql = format!(
            "INSERT INTO devices (name, type) VALUES ($1, $2) RETURNING {}",
            SELECT_COLUMNS
        );
        tracing::debug!(sql = %sql, "query");
        sqlx::query_as::<_, Device>(&sql)
            .bind(&device.name)
            .bind(&device.device_type)
            .fetch_one(&self.pool)
            .await
    }

    async fn save(&self, device: &Device) -> Result<u64, sqlx::Error> {
        let sql = "UPDATE devices SET name = $2, type = $3, updated_at = NOW() \
                   WHERE id = $1 AND deleted_at IS NULL";
        tracing::debug!(sql = %sql, id = device.id, "query");
        let result = sqlx::query(sql)
            .bind(device.id)
            .bind(&device.name)
            .bind(&device.device_type)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let sql = "UPDATE devices SET deleted_at = NOW() WHERE id = $1 AND deleted_at IS NULL";
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
