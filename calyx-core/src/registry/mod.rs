//! Sensor registry
//!
//! Free lookup functions over slices, plus [`SensorRegistry`] which checks a
//! sensor table once and then offers the same lookups as methods.

pub mod lookup;
pub mod table;

pub use lookup::{
    find_backend, find_backend_mut, find_provider, find_provider_context,
    find_provider_context_mut,
};
pub use table::{validate_nvm_keys, RegistryError, SensorRegistry};
