//! Orchestrator settings
//!
//! Integrators assign NVM ids per sensor; these defaults only cover the
//! common layout of one file holding a record per sensor.

use crate::diag::Level;

/// Default NVM file for sensor configuration records
pub const SENSOR_CONFIG_FILE: u16 = 0x5E00;

/// Settings of the lifecycle orchestrator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LifecycleConfig {
    /// Level of the configuration dumps written during configure
    pub log_level: Level,
    /// Hex-dump every blob written to or read from NVM at debug level
    pub dump_blobs: bool,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleConfig {
    /// Info-level dumps, no blob tracing
    pub const fn new() -> Self {
        Self {
            log_level: Level::Info,
            dump_blobs: false,
        }
    }

    /// Set the level of configuration dumps
    pub const fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Enable or disable blob hex dumps
    pub const fn with_blob_dump(mut self, enabled: bool) -> Self {
        self.dump_blobs = enabled;
        self
    }
}
