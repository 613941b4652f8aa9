//! Sensor capability traits

use calyx_hal::Bus;

use crate::config::SensorConfiguration;
use crate::sensor::DataFields;

/// What a sensor is and what it can measure
///
/// Object safe, so collections of different drivers can be searched as
/// `&dyn Capability`.
pub trait Capability {
    /// Short name of the sensor, at most eight characters
    fn name(&self) -> &str;

    /// Data fields this sensor can produce
    fn provides(&self) -> DataFields;
}

impl<T: Capability + ?Sized> Capability for &T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn provides(&self) -> DataFields {
        (**self).provides()
    }
}

impl<T: Capability + ?Sized> Capability for &mut T {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn provides(&self) -> DataFields {
        (**self).provides()
    }
}

/// An initialized sensor driver
///
/// A device with several kinds of sensors usually wraps its drivers in an
/// enum and implements this trait on the enum.
pub trait SensorDriver: Capability {
    /// Driver status, passed to callers unchanged
    type Error;

    /// Apply `configuration` to the hardware
    ///
    /// On return `configuration` holds what the hardware actually runs
    /// with, which may differ from the request due to quantization.
    fn configuration_set(&mut self, configuration: &mut SensorConfiguration)
        -> Result<(), Self::Error>;

    /// Read the configuration the hardware is running with
    fn configuration_get(&mut self, configuration: &mut SensorConfiguration)
        -> Result<(), Self::Error>;

    /// Whether this driver supports configuration at all
    ///
    /// Fixed-function sensors return `false`; configure then fails with
    /// an invalid-state error without touching the hardware.
    fn configurable(&self) -> bool {
        true
    }
}

/// Driver initializer
///
/// Probes the sensor with `handle` on `bus` and returns a ready driver.
pub type InitFn<D> = fn(Bus, u8) -> Result<D, <D as SensorDriver>::Error>;
