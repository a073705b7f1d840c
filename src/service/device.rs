//! Device business logic: DTO mapping and CRUD over a [`DeviceRepository`].

use crate::error::ServiceError;
use crate::model::{CreateDeviceRequest, Device, DeviceDto, NewDevice, UpdateDeviceRequest};
use crate::repository::DeviceRepository;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub struct DeviceService {
    repository: Arc<dyn DeviceRepository>,
}

/// Ids above `i64::MAX` cannot be stored, so they can never be found.
fn store_id(id: u64) -> Result<i64, ServiceError> {
    i64::try_from(id).map_err(|_| {
        warn!(id, "device id out of range");
        ServiceError::NotFound(id)
    })
}

fn to_dto(device: Device) -> Result<DeviceDto, ServiceError> {
    DeviceDto::try_from(device).map_err(|e| {
        error!(error = %e, "invalid device row");
        ServiceError::InvalidRow(e)
    })
}

impl DeviceService {
    pub fn new(repository: Arc<dyn DeviceRepository>) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> Result<Vec<DeviceDto>, ServiceError> {
        debug!("fetching all devices");
        let rows = self.repository.find_all().await.map_err(|e| {
            error!(error = %e, "failed to fetch devices");
            ServiceError::Store(e)
        })?;
        let devices = rows.into_iter().map(to_dto).collect::<Result<Vec<_>, _>>()?;
        debug!(count = devices.len(), "found devices");
        Ok(devices)
    }

    pub async fn get(&self, id: u64) -> Result<DeviceDto, ServiceError> {
        debug!(id, "fetching device");
        let row = self.repository.find_by_id(store_id(id)?).await.map_err(|e| {
            error!(id, error = %e, "failed to fetch device");
            ServiceError::Store(e)
        })?;
        match row {
            Some(device) => to_dto(device),
            None => {
                warn!(id, "device not found");
                Err(ServiceError::NotFound(id))
            }
        }
    }

    /// Insert a device. The request must already have passed validation.
    pub async fn create(&self, req: CreateDeviceRequest) -> Result<DeviceDto, ServiceError> {
        let new = NewDevice {
            name: req.name.unwrap_or_default(),
            device_type: req.device_type.unwrap_or_default(),
        };
        debug!(name = %new.name, device_type = %new.device_type, "creating device");
        let device = self.repository.insert(new).await.map_err(|e| {
            error!(error = %e, "failed to create device");
            ServiceError::Store(e)
        })?;
        info!(id = device.id, "device created");
        to_dto(device)
    }

    /// Read-modify-write of name and type. Concurrent writers are not fenced; the last save wins.
    pub async fn update(&self, id: u64, req: UpdateDeviceRequest) -> Result<bool, ServiceError> {
        debug!(id, "updating device");
        let sid = store_id(id)?;
        let mut device = match self.repository.find_by_id(sid).await {
            Ok(Some(device)) => device,
            Ok(None) => {
                warn!(id, "device not found for update");
                return Err(ServiceError::NotFound(id));
            }
            Err(e) => {
                error!(id, error = %e, "failed to fetch device for update");
                return Err(ServiceError::Store(e));
            }
        };

        device.name = req.name.unwrap_or_default();
        device.device_type = req.device_type.unwrap_or_default();

        let affected = self.repository.save(&device).await.map_err(|e| {
            error!(id, error = %e, "failed to update device");
            ServiceError::Store(e)
        })?;
        if affected == 0 {
            warn!(id, "device deleted before update was written");
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "device updated");
        Ok(true)
    }

    /// Soft delete. Zero affected rows means the id never existed or is already deleted.
    pub async fn delete(&self, id: u64) -> Result<bool, ServiceError> {
        debug!(id, "deleting device");
        let affected = self.repository.delete_by_id(store_id(id)?).await.map_err(|e| {
            error!(id, error = %e, "failed to delete device");
            ServiceError::Store(e)
        })?;
        if affected == 0 {
            warn!(id, "device not found for deletion");
            return Err(ServiceError::NotFound(id));
        }
        info!(id, "device deleted");
        Ok(true)
    }

    pub async fn ping(&self) -> Result<(), ServiceError> {
        self.repository.ping().await.map_err(ServiceError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockDeviceRepository;
    use chrono::Utc;

    fn row(id: i64, name: &str, device_type: &str) -> Device {
        let now = Utc::now();
        Device {
            id,
            name: name.into(),
            device_type: device_type.into(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn list_maps_rows_in_order() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_all()
            .times(1)
            .return_once(|| Ok(vec![row(1, "Device1", "Sensor"), row(2, "Device2", "Actuator")]));

        let service = DeviceService::new(Arc::new(mock_repo));
        let devices = service.list().await.unwrap();

        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].name, "Device1");
        assert_eq!(devices[0].device_type, "Sensor");
        assert_eq!(devices[1].name, "Device2");
        assert_eq!(devices[1].device_type, "Actuator");
    }

    #[tokio::test]
    async fn list_surfaces_store_errors() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_all()
            .return_once(|| Err(sqlx::Error::PoolTimedOut));

        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(matches!(service.list().await, Err(ServiceError::Store(_))));
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id: &i64| *id == 999)
            .times(1)
            .return_once(|_| Ok(None));

        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(matches!(service.get(999).await, Err(ServiceError::NotFound(999))));
    }

    #[tokio::test]
    async fn negative_stored_id_is_invalid_row() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_all()
            .return_once(|| Ok(vec![row(1, "a", "b"), row(-2, "c", "d")]));

        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(matches!(service.list().await, Err(ServiceError::InvalidRow(_))));
    }

    #[tokio::test]
    async fn get_out_of_range_id_skips_store() {
        let mock_repo = MockDeviceRepository::new();
        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(matches!(service.get(u64::MAX).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn create_returns_assigned_id() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_insert()
            .withf(|new: &NewDevice| new.name == "Device1" && new.device_type == "Sensor")
            .times(1)
            .return_once(|new| Ok(row(1, &new.name, &new.device_type)));

        let service = DeviceService::new(Arc::new(mock_repo));
        let dto = service
            .create(CreateDeviceRequest::new("Device1", "Sensor"))
            .await
            .unwrap();

        assert_eq!(
            dto,
            DeviceDto {
                id: 1,
                name: "Device1".into(),
                device_type: "Sensor".into()
            }
        );
    }

    #[tokio::test]
    async fn update_missing_device_fails_without_save() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo.expect_find_by_id().return_once(|_| Ok(None));
        mock_repo.expect_save().never();

        let service = DeviceService::new(Arc::new(mock_repo));
        let result = service
            .update(999, UpdateDeviceRequest::new("UpdatedDevice", "Actuator"))
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound(999))));
    }

    #[tokio::test]
    async fn update_writes_full_row() {
        let mut mock_repo = MockDeviceRepository::new();
        let existing = row(1, "Device1", "Sensor");
        let created_at = existing.created_at;
        mock_repo
            .expect_find_by_id()
            .withf(|id: &i64| *id == 1)
            .return_once(move |_| Ok(Some(existing)));
        mock_repo
            .expect_save()
            .withf(move |d: &Device| {
                d.id == 1 && d.name == "Device1x" && d.device_type == "Sensor" && d.created_at == created_at
            })
            .times(1)
            .return_once(|_| Ok(1));

        let service = DeviceService::new(Arc::new(mock_repo));
        let ok = service
            .update(1, UpdateDeviceRequest::new("Device1x", "Sensor"))
            .await
            .unwrap();
        assert!(ok);
    }

    #[tokio::test]
    async fn update_racing_delete_is_not_found() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_find_by_id()
            .return_once(|_| Ok(Some(row(3, "a", "b"))));
        mock_repo.expect_save().return_once(|_| Ok(0));

        let service = DeviceService::new(Arc::new(mock_repo));
        let result = service.update(3, UpdateDeviceRequest::new("c", "d")).await;
        assert!(matches!(result, Err(ServiceError::NotFound(3))));
    }

    #[tokio::test]
    async fn delete_uses_affected_rows() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_delete_by_id()
            .withf(|id: &i64| *id == 1)
            .return_once(|_| Ok(1));
        mock_repo
            .expect_delete_by_id()
            .withf(|id: &i64| *id == 2)
            .return_once(|_| Ok(0));
        mock_repo.expect_find_by_id().never();

        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(service.delete(1).await.unwrap());
        assert!(matches!(service.delete(2).await, Err(ServiceError::NotFound(2))));
    }

    #[tokio::test]
    async fn delete_store_failure_is_store_error() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_delete_by_id()
            .return_once(|_| Err(sqlx::Error::PoolClosed));

        let service = DeviceService::new(Arc::new(mock_repo));
        assert!(matches!(service.delete(5).await, Err(ServiceError::Store(_))));
    }
}
