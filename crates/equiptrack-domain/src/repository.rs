use async_trait::async_trait;

use crate::context::Principal;
use crate::device::{Device, DeviceId, DeviceStatus};
use crate::error::DomainResult;
use crate::repair::{Repair, RepairAction, RepairId};

/// Storage operations for the device registry.
/// Each method is a single atomic transition against the backing store.
/// Infrastructure implementations (in-memory, SQL, ...) provide this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceRepository: Send + Sync {
    /// Assign the next sequential device id, store the device and record
    /// its initial owner. All-or-nothing; ids are never reused.
    async fn insert_device(&self, device: Device, owner: Principal) -> DomainResult<DeviceId>;

    /// Get a device by id
    async fn get_device(&self, device_id: DeviceId) -> DomainResult<Option<Device>>;

    /// Get the current owner of a device
    async fn get_owner(&self, device_id: DeviceId) -> DomainResult<Option<Principal>>;

    /// Replace only the status field of an existing device.
    /// Returns false if the device does not exist.
    async fn set_status(&self, device_id: DeviceId, status: DeviceStatus) -> DomainResult<bool>;

    /// Replace the ownership record of a device; the device record itself
    /// is untouched. Returns false if no ownership record exists.
    async fn set_owner(&self, device_id: DeviceId, owner: Principal) -> DomainResult<bool>;
}

/// Storage operations for repair tickets and their logged actions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepairRepository: Send + Sync {
    /// Assign the next sequential repair id and store the repair
    async fn insert_repair(&self, repair: Repair) -> DomainResult<RepairId>;

    /// Get a repair by id
    async fn get_repair(&self, repair_id: RepairId) -> DomainResult<Option<Repair>>;

    /// Replace only the status field of an existing repair.
    /// Returns false if the repair does not exist.
    async fn set_status(&self, repair_id: RepairId, status: String) -> DomainResult<bool>;

    /// Store an action at `(repair_id, recorded_at)`.
    /// A later write at the same key overwrites the earlier one.
    async fn put_action(
        &self,
        repair_id: RepairId,
        recorded_at: u64,
        action: RepairAction,
    ) -> DomainResult<()>;

    /// Get the action recorded at exactly `(repair_id, recorded_at)`
    async fn get_action(
        &self,
        repair_id: RepairId,
        recorded_at: u64,
    ) -> DomainResult<Option<RepairAction>>;
}

/// Read-only ownership lookup exposed by the device registry.
///
/// This is the only capability repair tracking holds into the device
/// registry; it carries no way to mutate device state.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceOwnerLookup: Send + Sync {
    /// Current owner of a device, if the device has an ownership record
    async fn device_owner(&self, device_id: DeviceId) -> DomainResult<Option<Principal>>;
}
