use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::DomainResult;
use crate::repair::{Repair, RepairAction, RepairId};
use crate::repository::RepairRepository;

#[derive(Debug, Default)]
struct RepairState {
    last_repair_id: RepairId,
    repairs: HashMap<RepairId, Repair>,
    actions: HashMap<(RepairId, u64), RepairAction>,
}

/// In-memory implementation of RepairRepository using HashMaps.
/// The repair id counter is independent of the device id counter.
pub struct InMemoryRepairRepository {
    state: Arc<RwLock<RepairState>>,
}

impl InMemoryRepairRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(RwLock::new(RepairState::default())),
        }
    }
}

impl Default for InMemoryRepairRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RepairRepository for InMemoryRepairRepository {
    async fn insert_repair(&self, repair: Repair) -> DomainResult<RepairId> {
        let mut state = self.state.write().await;
        let new_id = state.last_repair_id + 1;
        state.last_repair_id = new_id;
        state.repairs.insert(new_id, repair);
        Ok(new_id)
    }

    async fn get_repair(&self, repair_id: RepairId) -> DomainResult<Option<Repair>> {
        let state = self.state.read().await;
        Ok(state.repairs.get(&repair_id).cloned())
    }

    async fn set_status(&self, repair_id: RepairId, status: String) -> DomainResult<bool> {
        let mut state = self.state.write().await;
        match state.repairs.get_mut(&repair_id) {
            Some(repair) => {
                repair.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn put_action(
        &self,
        repair_id: RepairId,
        recorded_at: u64,
        action: RepairAction,
    ) -> DomainResult<()> {
        let mut state = self.state.write().await;
        state.actions.insert((repair_id, recorded_at), action);
        Ok(())
    }

    async fn get_action(
        &self,
        repair_id: RepairId,
        recorded_at: u64,
    ) -> DomainResult<Option<RepairAction>> {
        let state = self.state.read().await;
        Ok(state.actions.get(&(repair_id, recorded_at)).cloned())
    }
}
