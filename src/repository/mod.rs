//! Row-level access to the `devices` table. No business logic, no DTO mapping.

mod memory;
mod postgres;

pub use memory::MemoryDeviceRepository;
pub use postgres::PgDeviceRepository;

use crate::model::{Device, NewDevice};
use async_trait::async_trait;

/// Storage seam used by [`crate::service::DeviceService`].
/// Soft-deleted rows are never returned and never counted as affected.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// All live rows in id order.
    async fn find_all(&self) -> Result<Vec<Device>, sqlx::Error>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Device>, sqlx::Error>;

    /// Insert a row and return it with its assigned id and timestamps.
    async fn insert(&self, device: NewDevice) -> Result<Device, sqlx::Error>;

    /// Write name and type of `device` back to its row. Returns rows affected.
    async fn save(&self, device: &Device) -> Result<u64, sqlx::Error>;

    /// Soft-delete by id. Returns rows affected.
    async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error>;

    /// Cheap round-trip used by readiness checks.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}
