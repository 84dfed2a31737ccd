pub mod context;
pub mod device;
pub mod device_registry;
pub mod error;
pub mod in_memory_device_repository;
pub mod in_memory_repair_repository;
pub mod repair;
pub mod repair_tracking;
pub mod repository;
pub mod response;

pub use context::{CallContext, Principal};
pub use device::*;
pub use device_registry::DeviceRegistry;
pub use error::{DomainError, DomainResult};
pub use in_memory_device_repository::InMemoryDeviceRepository;
pub use in_memory_repair_repository::InMemoryRepairRepository;
pub use repair::*;
pub use repair_tracking::RepairTracking;
pub use repository::{DeviceOwnerLookup, DeviceRepository, RepairRepository};
pub use response::CallResponse;
