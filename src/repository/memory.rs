use crate::model::{Device, NewDevice};
use crate::repository::DeviceRepository;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: Vec<Device>,
    last_id: i64,
}

/// In-process [`DeviceRepository`] with the same soft-delete and id semantics as the Postgres table.
#[derive(Default)]
pub struct MemoryDeviceRepository {
    table: RwLock<Table>,
}

impl MemoryDeviceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DeviceRepository for MemoryDeviceRepository {
    async fn find_all(&self) -> Result<Vec<Device>, sqlx::Error> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .filter(|d| d.deleted_at.is_none())
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Device>, sqlx::Error> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .iter()
            .find(|d| d.id == id && d.deleted_at.is_none())
            .cloned())
    }

    async fn insert(&self, device: NewDevice) -> Result<Device, sqlx::Error> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let now = Utc::now();
        let row = Device {
            id: table.last_id,
            name: device.name,
            device_type: device.device_type,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn save(&self, device: &Device) -> Result<u64, sqlx::Error> {
        let mut table = self.table.write().await;
        match table
            .rows
            .iter_mut()
            .find(|d| d.id == device.id && d.deleted_at.is_none())
        {
            Some(row) => {
                row.name = device.name.clone();
                row.device_type = device.device_type.clone();
                row.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<u64, sqlx::Error> {
        let mut table = self.table.write().await;
        match table
            .rows
            .iter_mut()
            .find(|d| d.id == id && d.deleted_at.is_none())
        {
            Some(row) => {
                row.deleted_at = Some(Utc::now());
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        Ok(())
    }
}
