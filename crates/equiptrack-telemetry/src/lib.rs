mod config;
mod init;

pub use config::TelemetryConfig;
pub use init::init_telemetry;
