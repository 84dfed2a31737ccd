use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::context::{CallContext, Principal};
use crate::device::{
    Device, DeviceId, DeviceStatus, RegisterDeviceInput, TransferDeviceInput,
    UpdateDeviceStatusInput,
};
use crate::error::{DomainError, DomainResult};
use crate::repository::{DeviceOwnerLookup, DeviceRepository};

/// Registry service for device records and their ownership.
///
/// Mutating operations serialize on a single write gate; reads go straight
/// to the repository and only ever observe committed state.
pub struct DeviceRegistry {
    repository: Arc<dyn DeviceRepository>,
    write_gate: Mutex<()>,
}

impl DeviceRegistry {
    pub fn new(repository: Arc<dyn DeviceRepository>) -> Self {
        Self {
            repository,
            write_gate: Mutex::new(()),
        }
    }

    /// Register a new device owned by the caller.
    /// The device starts in `active` status; returns the assigned id.
    pub async fn register_device(
        &self,
        ctx: &CallContext,
        input: RegisterDeviceInput,
    ) -> DomainResult<DeviceId> {
        let _gate = self.write_gate.lock().await;
        debug!(caller = %ctx.caller, name = %input.name, "Registering device");

        let device = Device {
            name: input.name,
            model: input.model,
            serial_number: input.serial_number,
            manufacturer: input.manufacturer,
            purchase_date: input.purchase_date,
            warranty_expiry: input.warranty_expiry,
            department: input.department,
            status: DeviceStatus::Active,
        };

        let device_id = self
            .repository
            .insert_device(device, ctx.caller.clone())
            .await?;

        info!(device_id, owner = %ctx.caller, "Device registered");
        Ok(device_id)
    }

    /// Get a device by id. No authorization; absent on miss.
    pub async fn get_device(&self, device_id: DeviceId) -> DomainResult<Option<Device>> {
        self.repository.get_device(device_id).await
    }

    /// Get the current owner of a device. No authorization; absent on miss.
    pub async fn get_device_owner(&self, device_id: DeviceId) -> DomainResult<Option<Principal>> {
        self.repository.get_owner(device_id).await
    }

    /// Replace the status of a device the caller owns.
    /// Only the status field changes; all other fields are untouched.
    pub async fn update_device_status(
        &self,
        ctx: &CallContext,
        input: UpdateDeviceStatusInput,
    ) -> DomainResult<()> {
        let _gate = self.write_gate.lock().await;
        debug!(device_id = input.device_id, status = %input.status, "Updating device status");

        // Missing device reports NotFound before any owner check.
        self.repository
            .get_device(input.device_id)
            .await?
            .ok_or(DomainError::DeviceNotFound(input.device_id))?;

        let owner = self
            .repository
            .get_owner(input.device_id)
            .await?
            .ok_or(DomainError::DeviceNotFound(input.device_id))?;

        if owner != ctx.caller {
            warn!(
                device_id = input.device_id,
                caller = %ctx.caller,
                "Status update refused: caller is not the owner"
            );
            return Err(DomainError::NotOwner);
        }

        self.repository
            .set_status(input.device_id, input.status)
            .await?;

        info!(device_id = input.device_id, status = %input.status, "Device status updated");
        Ok(())
    }

    /// Transfer ownership of a device the caller owns.
    /// Takes effect immediately; there is no pending-transfer state.
    pub async fn transfer_device(
        &self,
        ctx: &CallContext,
        input: TransferDeviceInput,
    ) -> DomainResult<()> {
        let _gate = self.write_gate.lock().await;
        debug!(device_id = input.device_id, new_owner = %input.new_owner, "Transferring device");

        let owner = self
            .repository
            .get_owner(input.device_id)
            .await?
            .ok_or(DomainError::DeviceNotFound(input.device_id))?;

        if owner != ctx.caller {
            warn!(
                device_id = input.device_id,
                caller = %ctx.caller,
                "Transfer refused: caller is not the owner"
            );
            return Err(DomainError::NotOwner);
        }

        self.repository
            .set_owner(input.device_id, input.new_owner.clone())
            .await?;

        info!(device_id = input.device_id, new_owner = %input.new_owner, "Device ownership transferred");
        Ok(())
    }
}

#[async_trait]
impl DeviceOwnerLookup for DeviceRegistry {
    async fn device_owner(&self, device_id: DeviceId) -> DomainResult<Option<Principal>> {
        self.repository.get_owner(device_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockDeviceRepository;

    fn sample_input() -> RegisterDeviceInput {
        RegisterDeviceInput {
            name: "MRI Scanner".to_string(),
            model: "Model XYZ-123".to_string(),
            serial_number: "SN-456789".to_string(),
            manufacturer: "Medical Imaging Corp".to_string(),
            purchase_date: 1_643_673_600,
            warranty_expiry: 1_706_745_600,
            department: "Radiology".to_string(),
        }
    }

    #[tokio::test]
    async fn register_device_stores_caller_as_owner() {
        let mut mock_repo = MockDeviceRepository::new();

        mock_repo
            .expect_insert_device()
            .withf(|device, owner| {
                device.name == "MRI Scanner"
                    && device.status == DeviceStatus::Active
                    && owner == &Principal::from("hospital-a")
            })
            .times(1)
            .return_once(|_, _| Ok(1));

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-a", 100);

        let device_id = registry.register_device(&ctx, sample_input()).await.unwrap();
        assert_eq!(device_id, 1);
    }

    #[tokio::test]
    async fn update_status_unknown_device_is_not_found() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_get_device()
            .times(1)
            .return_once(|_| Ok(None));

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-a", 100);

        let result = registry
            .update_device_status(
                &ctx,
                UpdateDeviceStatusInput {
                    device_id: 999,
                    status: DeviceStatus::Maintenance,
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            DomainError::DeviceNotFound(999)
        ));
    }

    #[tokio::test]
    async fn update_status_by_non_owner_is_refused() {
        let mut mock_repo = MockDeviceRepository::new();

        mock_repo
            .expect_get_device()
            .times(1)
            .return_once(|_| Ok(Some(device_fixture())));
        mock_repo
            .expect_get_owner()
            .times(1)
            .return_once(|_| Ok(Some(Principal::from("hospital-a"))));
        mock_repo.expect_set_status().times(0);

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-b", 100);

        let result = registry
            .update_device_status(
                &ctx,
                UpdateDeviceStatusInput {
                    device_id: 1,
                    status: DeviceStatus::Maintenance,
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotOwner));
    }

    #[tokio::test]
    async fn update_status_by_owner_replaces_status() {
        let mut mock_repo = MockDeviceRepository::new();

        mock_repo
            .expect_get_device()
            .times(1)
            .return_once(|_| Ok(Some(device_fixture())));
        mock_repo
            .expect_get_owner()
            .times(1)
            .return_once(|_| Ok(Some(Principal::from("hospital-a"))));
        mock_repo
            .expect_set_status()
            .withf(|device_id, status| *device_id == 1 && *status == DeviceStatus::Maintenance)
            .times(1)
            .return_once(|_, _| Ok(true));

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-a", 100);

        let result = registry
            .update_device_status(
                &ctx,
                UpdateDeviceStatusInput {
                    device_id: 1,
                    status: DeviceStatus::Maintenance,
                },
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn transfer_unknown_device_is_not_found() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_get_owner()
            .times(1)
            .return_once(|_| Ok(None));

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-a", 100);

        let result = registry
            .transfer_device(
                &ctx,
                TransferDeviceInput {
                    device_id: 999,
                    new_owner: Principal::from("hospital-b"),
                },
            )
            .await;

        assert!(matches!(
            result.unwrap_err(),
            DomainError::DeviceNotFound(999)
        ));
    }

    #[tokio::test]
    async fn transfer_by_non_owner_is_refused() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_get_owner()
            .times(1)
            .return_once(|_| Ok(Some(Principal::from("hospital-a"))));
        mock_repo.expect_set_owner().times(0);

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-b", 100);

        let result = registry
            .transfer_device(
                &ctx,
                TransferDeviceInput {
                    device_id: 1,
                    new_owner: Principal::from("hospital-c"),
                },
            )
            .await;

        assert!(matches!(result.unwrap_err(), DomainError::NotOwner));
    }

    #[tokio::test]
    async fn transfer_by_owner_replaces_ownership_record() {
        let mut mock_repo = MockDeviceRepository::new();
        mock_repo
            .expect_get_owner()
            .times(1)
            .return_once(|_| Ok(Some(Principal::from("hospital-a"))));
        mock_repo
            .expect_set_owner()
            .withf(|device_id, owner| *device_id == 1 && owner == &Principal::from("hospital-b"))
            .times(1)
            .return_once(|_, _| Ok(true));

        let registry = DeviceRegistry::new(Arc::new(mock_repo));
        let ctx = CallContext::new("hospital-a", 100);

        let result = registry
            .transfer_device(
                &ctx,
                TransferDeviceInput {
                    device_id: 1,
                    new_owner: Principal::from("hospital-b"),
                },
            )
            .await;

        assert!(result.is_ok());
    }

    fn device_fixture() -> Device {
        Device {
            name: "MRI Scanner".to_string(),
            model: "Model XYZ-123".to_string(),
            serial_number: "SN-456789".to_string(),
            manufacturer: "Medical Imaging Corp".to_string(),
            purchase_date: 1_643_673_600,
            warranty_expiry: 1_706_745_600,
            department: "Radiology".to_string(),
            status: DeviceStatus::Active,
        }
    }
}
