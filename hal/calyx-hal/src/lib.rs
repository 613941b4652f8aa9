//! Calyx Hardware Abstraction Layer
//!
//! This crate defines the contracts the sensor core consumes from the
//! platform. Chip-specific crates (or the RAM simulation in
//! `calyx-hal-sim`) implement them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware tasks                         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  calyx-core (lifecycle, registry)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  calyx-hal (this crate - contracts)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ chip flash    │       │ calyx-hal-sim │
//! │ driver        │       │  (RAM NVM)    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Contracts
//!
//! - [`bus::Bus`] - Which transport a sensor sits on
//! - [`nvm::NvmStorage`] - Record-oriented persistent storage

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod nvm;

// Re-export key types at crate root for convenience
pub use bus::Bus;
pub use nvm::{NvmError, NvmStorage, RecordKey};
