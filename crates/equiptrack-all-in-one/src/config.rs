use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServiceConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines instead of the plain formatter
    #[serde(default = "default_json_logs")]
    pub json_logs: bool,

    /// Principal the startup smoke scenario runs as
    #[serde(default = "default_service_account")]
    pub service_account: String,

    /// Logical clock value the smoke scenario starts at
    #[serde(default = "default_starting_clock")]
    pub starting_clock: u64,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_json_logs() -> bool {
    true
}

fn default_service_account() -> String {
    "equiptrack-service".to_string()
}

fn default_starting_clock() -> u64 {
    100_000
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(Environment::with_prefix("EQUIPTRACK"))
            .build()?
            .try_deserialize()
    }
}
