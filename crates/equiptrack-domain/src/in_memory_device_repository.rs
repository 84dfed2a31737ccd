use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::context::Principal;
use crate::device::{Device, DeviceId, DeviceStatus};
use crate::error::DomainResult;
use crate::repository::DeviceRepository;

#[derive(Debug, Default)]
struct DeviceState {
    last_device_id: DeviceId,
    devices: HashMap<DeviceId, Device>,
    owners: HashMap<DeviceId, Principal>,
}

/// In-memory implementation of DeviceRepository using HashMaps.
///
/// A single lock covers the id counter and both maps so every trait method
/// is one atomic transition; a device is never observable without its owner.
pub struct InMemoryDeviceRepository {
    state: Arc<RwLock<DeviceState>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(DeviceState::default())),
        }
    }
}

impl Default for InMemoryDeviceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn insert_device(&self, device: Device, owner: Principal) -> DomainResult<DeviceId> {
        let mut state = self.state.write().await;
        let new_id = state.last_device_id + 1;
        state.last_device_id = new_id;
        state.devices.insert(new_id, device);
        state.owners.insert(new_id, owner);
        Ok(new_id)
    }

    async fn get_device(&self, device_id: DeviceId) -> DomainResult<Option<Device>> {
        let state = self.state.read().await;
        Ok(state.devices.get(&device_id).cloned())
    }

    async fn get_owner(&self, device_id: DeviceId) -> DomainResult<Option<Principal>> {
        let state = self.state.read().await;
        Ok(state.owners.get(&device_id).cloned())
    }

    async fn set_status(&self, device_id: DeviceId, status: DeviceStatus) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        match state.devices.get_mut(&device_id) {
            Some(device) => {
                device.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn set_owner(&self, device_id: DeviceId, owner: Principal) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        match state.owners.get_mut(&device_id) {
            Some(current) => {
                *current = owner;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
