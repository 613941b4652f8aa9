//! Lifecycle orchestration
//!
//! Four operations take a sensor from construction to a configured,
//! persisted state:
//!
//! 1. [`Lifecycle::initialize`] - probe the driver, context becomes ready
//! 2. [`Lifecycle::configure`] - apply the requested configuration and read
//!    back what the hardware actually uses
//! 3. [`Lifecycle::store`] - persist the configuration to NVM
//! 4. [`Lifecycle::load`] - restore the configuration from NVM
//!
//! Each operation is a fail-fast pipeline: missing inputs and a busy NVM are
//! reported before any hardware or storage access, and driver or storage
//! status is handed back unchanged.

pub mod error;
pub mod orchestrator;

pub use error::LifecycleError;
pub use orchestrator::Lifecycle;
