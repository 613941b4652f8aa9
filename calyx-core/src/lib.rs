//! Board-agnostic sensor lifecycle core
//!
//! This crate contains the logic that is shared by every sensor on a
//! device, regardless of which driver sits behind it:
//!
//! - Sensor capability traits (name, provided fields, configuration)
//! - Sensor context: driver handle, configuration, NVM location, addressing
//! - Lifecycle orchestrator: initialize, configure, store, load
//! - Registry and lookup by name or by provided data fields
//! - Diagnostics sink used to trace configuration changes
//!
//! Drivers, the flash subsystem and bus transports stay outside; they are
//! reached through the traits here and in `calyx-hal`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod diag;
pub mod lifecycle;
pub mod registry;
pub mod sensor;
pub mod traits;

#[cfg(test)]
mod testing;

pub use config::{LifecycleConfig, SensorConfiguration};
pub use diag::{DiagnosticSink, Level};
pub use lifecycle::{Lifecycle, LifecycleError};
pub use registry::{find_backend, find_provider, SensorRegistry};
pub use sensor::{DataFields, LifecycleState, SensorContext, SensorName};
pub use traits::{Capability, InitFn, SensorDriver};
