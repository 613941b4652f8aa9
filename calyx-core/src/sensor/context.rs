//! Sensor context
//!
//! One context bundles everything the core knows about a physical sensor:
//! the driver once initialized, the configuration, where it is persisted and
//! how it is addressed. Contexts are built by the integrator at startup,
//! usually in a static array, and live for the whole program.

use calyx_hal::{Bus, RecordKey};

use crate::config::SensorConfiguration;
use crate::sensor::DataFields;
use crate::traits::{InitFn, SensorDriver};

/// Lifecycle state of a context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleState {
    /// Constructed, driver not yet initialized
    #[default]
    Uninitialized,
    /// Driver initialized, configure is allowed
    Ready,
}

/// Runtime, configuration and persistence record of one sensor
#[derive(Debug)]
pub struct SensorContext<D: SensorDriver> {
    /// Driver, populated by a successful initialize
    pub sensor: Option<D>,
    /// Initializer, used only by initialize
    pub init: Option<InitFn<D>>,
    /// Desired configuration before configure, applied configuration after
    pub configuration: SensorConfiguration,
    /// NVM file holding this sensor's configuration record
    pub nvm_file: u16,
    /// NVM record of this sensor's configuration
    pub nvm_record: u16,
    /// Unit on the bus (chip select or address)
    pub handle: u8,
    /// Transport the sensor is attached to
    pub bus: Bus,
    pub(crate) state: LifecycleState,
}

impl<D: SensorDriver> SensorContext<D> {
    /// Create a context for a sensor reached through `init`
    pub const fn new(init: InitFn<D>, bus: Bus, handle: u8, nvm_file: u16, nvm_record: u16) -> Self {
        Self {
            sensor: None,
            init: Some(init),
            configuration: SensorConfiguration::new(),
            nvm_file,
            nvm_record,
            handle,
            bus,
            state: LifecycleState::Uninitialized,
        }
    }

    /// Create a context with no initializer
    ///
    /// Initializing it fails with a null error until `init` is set.
    pub const fn unbound(bus: Bus, handle: u8, nvm_file: u16, nvm_record: u16) -> Self {
        Self {
            sensor: None,
            init: None,
            configuration: SensorConfiguration::new(),
            nvm_file,
            nvm_record,
            handle,
            bus,
            state: LifecycleState::Uninitialized,
        }
    }

    /// Set the initial configuration request
    pub fn with_configuration(mut self, configuration: SensorConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Check whether initialize has succeeded
    pub fn is_ready(&self) -> bool {
        self.state == LifecycleState::Ready
    }

    /// NVM key of this sensor's configuration record
    pub fn nvm_key(&self) -> RecordKey {
        RecordKey::new(self.nvm_file, self.nvm_record)
    }

    /// Driver name, if initialized
    pub fn name(&self) -> Option<&str> {
        self.sensor.as_ref().map(|s| s.name())
    }

    /// Fields the driver provides, empty until initialized
    pub fn provides(&self) -> DataFields {
        self.sensor
            .as_ref()
            .map(|s| s.provides())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{init_accel, MockSensor};

    #[test]
    fn test_new_context_is_uninitialized() {
        let ctx: SensorContext<MockSensor> = SensorContext::new(init_accel, Bus::Spi, 1, 1, 2);
        assert_eq!(ctx.state(), LifecycleState::Uninitialized);
        assert!(!ctx.is_ready());
        assert!(ctx.init.is_some());
        assert!(ctx.name().is_none());
        assert!(ctx.provides().is_empty());
        assert_eq!(ctx.nvm_key(), RecordKey::new(1, 2));
    }

    #[test]
    fn test_unbound_context() {
        let ctx: SensorContext<MockSensor> = SensorContext::unbound(Bus::I2c, 0x76, 1, 3);
        assert!(ctx.init.is_none());
        assert_eq!(ctx.bus, Bus::I2c);
        assert_eq!(ctx.handle, 0x76);
    }

    #[test]
    fn test_with_configuration() {
        let config = SensorConfiguration::new().with_sample_rate(50.0);
        let ctx: SensorContext<MockSensor> =
            SensorContext::new(init_accel, Bus::Spi, 1, 1, 2).with_configuration(config);
        assert_eq!(ctx.configuration, config);
    }
}
