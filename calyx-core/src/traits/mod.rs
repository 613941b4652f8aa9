//! Driver-facing traits
//!
//! These traits define the interface between the lifecycle core and the
//! concrete sensor drivers.

pub mod sensor;

pub use sensor::{Capability, InitFn, SensorDriver};
