use serde::{Deserialize, Serialize};

use crate::context::Principal;
use crate::device::DeviceId;

/// Sequential identifier assigned by the repair repository, starting at 1.
/// Independent counter from device ids.
pub type RepairId = u64;

/// Status every repair starts in
pub const INITIAL_REPAIR_STATUS: &str = "reported";

/// Repair ticket domain entity
///
/// `device_id` is not validated against the device registry at creation
/// time; the reference is only resolved when a status update needs the
/// owning device's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repair {
    pub device_id: DeviceId,
    pub reported_by: Principal,
    pub issue_description: String,
    pub priority: String,
    pub reported_date: u64,
    pub status: String,
}

/// A single service event logged against a repair.
///
/// Keyed by `(repair_id, recorded_at)` where `recorded_at` is the logical
/// clock at the moment of recording; immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairAction {
    pub performed_by: Principal,
    pub action_description: String,
    pub parts_replaced: String,
    pub cost: u64,
}

/// Input for reporting a new issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportIssueInput {
    pub device_id: DeviceId,
    pub issue_description: String,
    pub priority: String,
}

/// Input for updating a repair's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRepairStatusInput {
    pub repair_id: RepairId,
    pub status: String,
}

/// Input for logging a repair action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRepairActionInput {
    pub repair_id: RepairId,
    pub action_description: String,
    pub parts_replaced: String,
    pub cost: u64,
}
