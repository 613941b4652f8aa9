//! Configuration types
//!
//! Sensor configuration persisted to NVM as postcard binary data, and the
//! settings of the lifecycle orchestrator itself.

pub mod lifecycle;
pub mod sensor;

pub use lifecycle::*;
pub use sensor::*;
