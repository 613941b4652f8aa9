//! Sensor data model
//!
//! Names, provided-field sets and the per-sensor context the lifecycle
//! operations work on.

pub mod context;
pub mod fields;
pub mod name;

pub use context::{LifecycleState, SensorContext};
pub use fields::DataFields;
pub use name::{NameError, SensorName, MAX_NAME_LEN};
