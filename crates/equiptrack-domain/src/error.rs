use thiserror::Error;

use crate::device::DeviceId;
use crate::repair::RepairId;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Device not found: {0}")]
    DeviceNotFound(DeviceId),

    #[error("Device has no recorded owner: {0}")]
    DeviceOwnerNotFound(DeviceId),

    #[error("Repair not found: {0}")]
    RepairNotFound(RepairId),

    #[error("Caller is not the device owner")]
    NotOwner,

    #[error("Invalid device status: {0}")]
    InvalidDeviceStatus(String),

    #[error("Repository error: {0}")]
    RepositoryError(#[from] anyhow::Error),
}

impl DomainError {
    /// Wire code surfaced in the response envelope: 404 for a missing
    /// entity or ownership record, 403 for a failed owner check.
    pub fn code(&self) -> u16 {
        match self {
            DomainError::DeviceNotFound(_)
            | DomainError::DeviceOwnerNotFound(_)
            | DomainError::RepairNotFound(_) => 404,
            DomainError::NotOwner => 403,
            DomainError::InvalidDeviceStatus(_) => 400,
            DomainError::RepositoryError(_) => 500,
        }
    }
}
