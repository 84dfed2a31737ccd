use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::context::Principal;
use crate::error::DomainError;

/// Sequential identifier assigned by the device repository, starting at 1
pub type DeviceId = u64;

/// Operational status of a registered device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceStatus {
    Active,
    Maintenance,
    Inactive,
}

impl fmt::Display for DeviceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DeviceStatus::Active => "active",
            DeviceStatus::Maintenance => "maintenance",
            DeviceStatus::Inactive => "inactive",
        };
        f.write_str(s)
    }
}

impl FromStr for DeviceStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(DeviceStatus::Active),
            "maintenance" => Ok(DeviceStatus::Maintenance),
            "inactive" => Ok(DeviceStatus::Inactive),
            other => Err(DomainError::InvalidDeviceStatus(other.to_string())),
        }
    }
}

/// Device domain entity
///
/// `purchase_date` and `warranty_expiry` are opaque integer timestamps;
/// no temporal validation is applied to them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub purchase_date: u64,
    pub warranty_expiry: u64,
    pub department: String,
    pub status: DeviceStatus,
}

/// Input for registering a new device (id is assigned by the repository)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDeviceInput {
    pub name: String,
    pub model: String,
    pub serial_number: String,
    pub manufacturer: String,
    pub purchase_date: u64,
    pub warranty_expiry: u64,
    pub department: String,
}

/// Input for updating a device's status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateDeviceStatusInput {
    pub device_id: DeviceId,
    pub status: DeviceStatus,
}

/// Input for transferring device ownership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferDeviceInput {
    pub device_id: DeviceId,
    pub new_owner: Principal,
}
