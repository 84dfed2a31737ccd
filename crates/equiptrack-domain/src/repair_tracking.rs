use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::context::CallContext;
use crate::error::{DomainError, DomainResult};
use crate::repair::{
    AddRepairActionInput, Repair, RepairAction, RepairId, ReportIssueInput,
    UpdateRepairStatusInput, INITIAL_REPAIR_STATUS,
};
use crate::repository::{DeviceOwnerLookup, RepairRepository};

/// Ledger service for repair tickets and their logged actions.
///
/// Status changes are authorized against the *current* device owner via the
/// injected ownership lookup; transferring a device immediately changes who
/// may update the open repairs against it.
pub struct RepairTracking {
    repository: Arc<dyn RepairRepository>,
    device_owners: Arc<dyn DeviceOwnerLookup>,
    write_gate: Mutex<()>,
}

impl RepairTracking {
    pub fn new(
        repository: Arc<dyn RepairRepository>,
        device_owners: Arc<dyn DeviceOwnerLookup>,
    ) -> Self {
        Self {
            repository,
            device_owners,
            write_gate: Mutex::new(()),
        }
    }

    /// Report a new issue against a device. Returns the assigned repair id.
    ///
    /// The device reference is not validated here; it is only resolved when
    /// a status update needs the owning device's identity.
    pub async fn report_issue(
        &self,
        ctx: &CallContext,
        input: ReportIssueInput,
    ) -> DomainResult<RepairId> {
        let _gate = self.write_gate.lock().await;
        debug!(device_id = input.device_id, caller = %ctx.caller, "Reporting issue");

        let repair = Repair {
            device_id: input.device_id,
            reported_by: ctx.caller.clone(),
            issue_description: input.issue_description,
            priority: input.priority,
            reported_date: ctx.clock,
            status: INITIAL_REPAIR_STATUS.to_string(),
        };

        let repair_id = self.repository.insert_repair(repair).await?;

        info!(repair_id, device_id = input.device_id, "Issue reported");
        Ok(repair_id)
    }

    /// Get a repair by id. No authorization; absent on miss.
    pub async fn get_repair(&self, repair_id: RepairId) -> DomainResult<Option<Repair>> {
        self.repository.get_repair(repair_id).await
    }

    /// Replace the status of a repair.
    ///
    /// The caller must be the current owner of the repair's device. A repair
    /// whose device has no ownership record reports NotFound, never
    /// Forbidden.
    pub async fn update_repair_status(
        &self,
        ctx: &CallContext,
        input: UpdateRepairStatusInput,
    ) -> DomainResult<()> {
        let _gate = self.write_gate.lock().await;
        debug!(repair_id = input.repair_id, status = %input.status, "Updating repair status");

        let repair = self
            .repository
            .get_repair(input.repair_id)
            .await?
            .ok_or(DomainError::RepairNotFound(input.repair_id))?;

        let owner = self
            .device_owners
            .device_owner(repair.device_id)
            .await?
            .ok_or(DomainError::DeviceOwnerNotFound(repair.device_id))?;

        if owner != ctx.caller {
            warn!(
                repair_id = input.repair_id,
                device_id = repair.device_id,
                caller = %ctx.caller,
                "Repair status update refused: caller is not the device owner"
            );
            return Err(DomainError::NotOwner);
        }

        self.repository
            .set_status(input.repair_id, input.status.clone())
            .await?;

        info!(repair_id = input.repair_id, status = %input.status, "Repair status updated");
        Ok(())
    }

    /// Log an action against an existing repair at the current clock.
    ///
    /// No ownership check: any caller may log an action. A second action at
    /// the same `(repair_id, clock)` overwrites the first.
    pub async fn add_repair_action(
        &self,
        ctx: &CallContext,
        input: AddRepairActionInput,
    ) -> DomainResult<()> {
        let _gate = self.write_gate.lock().await;
        debug!(repair_id = input.repair_id, caller = %ctx.caller, "Adding repair action");

        self.repository
            .get_repair(input.repair_id)
            .await?
            .ok_or(DomainError::RepairNotFound(input.repair_id))?;

        let action = RepairAction {
            performed_by: ctx.caller.clone(),
            action_description: input.action_description,
            parts_replaced: input.parts_replaced,
            cost: input.cost,
        };

        self.repository
            .put_action(input.repair_id, ctx.clock, action)
            .await?;

        info!(
            repair_id = input.repair_id,
            recorded_at = ctx.clock,
            "Repair action recorded"
        );
        Ok(())
    }

    /// Get the action recorded at exactly `(repair_id, recorded_at)`.
    /// No authorization; absent on miss.
    pub async fn get_repair_action(
        &self,
        repair_id: RepairId,
        recorded_at: u64,
    ) -> DomainResult<Option<RepairAction>> {
        self.repository.get_action(repair_id, recorded_at).await
    }
}
