//! Host simulation HAL for Calyx
//!
//! Implements the `calyx-hal` contracts in RAM so the sensor core can be
//! exercised without hardware, either from unit tests or from a host-side
//! simulation of the firmware.
//!
//! # Usage
//!
//! ```
//! use calyx_hal::{NvmStorage, RecordKey};
//! use calyx_hal_sim::RamNvm;
//!
//! let mut nvm: RamNvm<8, 32> = RamNvm::new();
//! nvm.store(RecordKey::new(1, 1), b"Hello Flash!").unwrap();
//!
//! let mut buf = [0u8; 32];
//! let len = nvm.load(RecordKey::new(1, 1), &mut buf).unwrap();
//! assert_eq!(&buf[..len], b"Hello Flash!");
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod nvm;

pub use nvm::{NvmStats, RamNvm};
