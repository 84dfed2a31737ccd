mod config;

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use equiptrack_domain::{
    AddRepairActionInput, CallContext, DeviceRegistry, DeviceStatus, InMemoryDeviceRepository,
    InMemoryRepairRepository, RegisterDeviceInput, RepairTracking, ReportIssueInput,
    UpdateDeviceStatusInput, UpdateRepairStatusInput,
};
use equiptrack_telemetry::{init_telemetry, TelemetryConfig};

#[tokio::main]
async fn main() {
    let config = match config::ServiceConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let telemetry_config = TelemetryConfig {
        service_name: "equiptrack-all-in-one".to_string(),
        log_level: config.log_level.clone(),
        json_logs: config.json_logs,
    };
    if let Err(e) = init_telemetry(&telemetry_config) {
        eprintln!("Failed to initialize telemetry: {}", e);
        std::process::exit(1);
    }

    info!("Starting equiptrack-all-in-one service");
    info!("Configuration: {:?}", config);

    if let Err(e) = run_service(config).await {
        tracing::error!("Service failed: {:#}", e);
        std::process::exit(1);
    }
}

/// Wire both registries over the in-memory repositories and walk one full
/// device/repair lifecycle so a fresh deployment can be smoke-checked from
/// the logs alone.
async fn run_service(config: config::ServiceConfig) -> Result<()> {
    let device_registry = Arc::new(DeviceRegistry::new(Arc::new(
        InMemoryDeviceRepository::new(),
    )));
    let repair_tracking = RepairTracking::new(
        Arc::new(InMemoryRepairRepository::new()),
        device_registry.clone(),
    );

    let mut clock = config.starting_clock;
    let operator = CallContext::new(config.service_account.as_str(), clock);

    let device_id = device_registry
        .register_device(
            &operator,
            RegisterDeviceInput {
                name: "Infusion Pump".to_string(),
                model: "IP-2000".to_string(),
                serial_number: "SN-IP-001".to_string(),
                manufacturer: "MedFlow".to_string(),
                purchase_date: 1_640_995_200,
                warranty_expiry: 1_704_067_200,
                department: "ICU".to_string(),
            },
        )
        .await?;

    clock += 1;
    let reporter = CallContext::new(config.service_account.as_str(), clock);
    let repair_id = repair_tracking
        .report_issue(
            &reporter,
            ReportIssueInput {
                device_id,
                issue_description: "Occlusion alarm will not clear".to_string(),
                priority: "high".to_string(),
            },
        )
        .await?;

    device_registry
        .update_device_status(
            &reporter,
            UpdateDeviceStatusInput {
                device_id,
                status: DeviceStatus::Maintenance,
            },
        )
        .await?;

    clock += 1;
    let technician = CallContext::new(config.service_account.as_str(), clock);
    repair_tracking
        .add_repair_action(
            &technician,
            AddRepairActionInput {
                repair_id,
                action_description: "Replaced occlusion sensor".to_string(),
                parts_replaced: "sensor-assembly".to_string(),
                cost: 120,
            },
        )
        .await?;

    repair_tracking
        .update_repair_status(
            &technician,
            UpdateRepairStatusInput {
                repair_id,
                status: "completed".to_string(),
            },
        )
        .await?;

    device_registry
        .update_device_status(
            &technician,
            UpdateDeviceStatusInput {
                device_id,
                status: DeviceStatus::Active,
            },
        )
        .await?;

    let device = device_registry.get_device(device_id).await?;
    let repair = repair_tracking.get_repair(repair_id).await?;
    info!(device_id, repair_id, ?device, ?repair, "Smoke scenario complete");

    Ok(())
}
