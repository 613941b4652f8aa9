//! Test doubles shared by the unit tests
//!
//! Driver calls are counted per test thread, so tests can assert that an
//! operation rejected early never reached the hardware.

use std::cell::Cell;
use std::string::String;
use std::thread::LocalKey;
use std::vec::Vec;

use calyx_hal::Bus;

use crate::config::SensorConfiguration;
use crate::diag::{DiagnosticSink, Level};
use crate::sensor::{DataFields, SensorName};
use crate::traits::{Capability, SensorDriver};

thread_local! {
    static INIT_CALLS: Cell<u32> = const { Cell::new(0) };
    static SET_CALLS: Cell<u32> = const { Cell::new(0) };
}

fn bump(counter: &'static LocalKey<Cell<u32>>) {
    counter.with(|c| c.set(c.get() + 1));
}

/// Initializer calls on this thread
pub fn init_calls() -> u32 {
    INIT_CALLS.with(Cell::get)
}

/// `configuration_set` calls on this thread
pub fn set_calls() -> u32 {
    SET_CALLS.with(Cell::get)
}

/// Sample rates the mock hardware supports
pub const SUPPORTED_RATES: [f32; 6] = [1.0, 12.5, 25.0, 50.0, 100.0, 200.0];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockError {
    /// Nothing answered on the bus
    NotFound,
    /// Sensor answered but failed its self test
    SelfTest,
    /// Sensor refused the configuration
    Rejected,
}

impl core::fmt::Display for MockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MockSensor {
    name: SensorName,
    provides: DataFields,
    configurable: bool,
    reject: bool,
    pub applied: SensorConfiguration,
}

impl MockSensor {
    pub fn new(name: &str, provides: DataFields) -> Self {
        Self {
            name: SensorName::new(name).unwrap(),
            provides,
            configurable: true,
            reject: false,
            applied: SensorConfiguration::new(),
        }
    }

    pub fn fixed(mut self) -> Self {
        self.configurable = false;
        self
    }

    pub fn rejecting(mut self) -> Self {
        self.reject = true;
        self
    }
}

/// Closest supported rate, ties resolved upward
fn quantize_rate(requested: f32) -> f32 {
    if requested <= 0.0 {
        return SUPPORTED_RATES[0];
    }
    let mut best = SUPPORTED_RATES[0];
    for rate in SUPPORTED_RATES {
        if (rate - requested).abs() <= (best - requested).abs() {
            best = rate;
        }
    }
    best
}

impl Capability for MockSensor {
    fn name(&self) -> &str {
        self.name.as_str()
    }

    fn provides(&self) -> DataFields {
        self.provides
    }
}

impl SensorDriver for MockSensor {
    type Error = MockError;

    fn configuration_set(
        &mut self,
        configuration: &mut SensorConfiguration,
    ) -> Result<(), MockError> {
        bump(&SET_CALLS);

        if self.reject {
            // Half-written output, must never reach the context
            configuration.sample_rate = -1.0;
            return Err(MockError::Rejected);
        }

        configuration.sample_rate = quantize_rate(configuration.sample_rate);
        configuration.resolution = match configuration.resolution {
            0 => 10,
            1..=8 => 8,
            9..=10 => 10,
            _ => 12,
        };
        configuration.scale = match configuration.scale {
            0..=2 => 2,
            3..=4 => 4,
            5..=8 => 8,
            _ => 16,
        };
        self.applied = *configuration;
        Ok(())
    }

    fn configuration_get(
        &mut self,
        configuration: &mut SensorConfiguration,
    ) -> Result<(), MockError> {
        *configuration = self.applied;
        Ok(())
    }

    fn configurable(&self) -> bool {
        self.configurable
    }
}

/// Accelerometer with a temperature channel, absent when there is no bus
pub fn init_accel(bus: Bus, _handle: u8) -> Result<MockSensor, MockError> {
    bump(&INIT_CALLS);
    if bus == Bus::None {
        return Err(MockError::NotFound);
    }
    Ok(MockSensor::new(
        "accel",
        DataFields::ACCELERATION | DataFields::TEMPERATURE,
    ))
}

/// Temperature, humidity and pressure sensor
pub fn init_env(_bus: Bus, _handle: u8) -> Result<MockSensor, MockError> {
    bump(&INIT_CALLS);
    Ok(MockSensor::new("env", DataFields::ENVIRONMENTAL))
}

/// Thermistor without any configuration support
pub fn init_ntc(_bus: Bus, _handle: u8) -> Result<MockSensor, MockError> {
    bump(&INIT_CALLS);
    Ok(MockSensor::new("ntc", DataFields::TEMPERATURE).fixed())
}

/// Sensor that refuses every configuration
pub fn init_rejecting(_bus: Bus, _handle: u8) -> Result<MockSensor, MockError> {
    bump(&INIT_CALLS);
    Ok(MockSensor::new("flaky", DataFields::LUMINOSITY).rejecting())
}

/// Sensor that fails its self test
pub fn init_failing(_bus: Bus, _handle: u8) -> Result<MockSensor, MockError> {
    bump(&INIT_CALLS);
    Err(MockError::SelfTest)
}

/// Capability with nothing behind it, for lookup tests
#[derive(Debug, Clone, Copy)]
pub struct StaticCapability {
    pub name: &'static str,
    pub provides: DataFields,
}

impl Capability for StaticCapability {
    fn name(&self) -> &str {
        self.name
    }

    fn provides(&self) -> DataFields {
        self.provides
    }
}

/// Sink keeping everything it is given
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub messages: Vec<(Level, String)>,
    pub hex: Vec<(Level, Vec<u8>)>,
}

impl RecordingSink {
    pub fn contains(&self, needle: &str) -> bool {
        self.messages.iter().any(|(_, m)| m.contains(needle))
    }

    pub fn position(&self, needle: &str) -> Option<usize> {
        self.messages.iter().position(|(_, m)| m.contains(needle))
    }
}

impl DiagnosticSink for RecordingSink {
    fn log(&mut self, level: Level, message: &str) {
        self.messages.push((level, message.into()));
    }

    fn log_hex(&mut self, level: Level, data: &[u8]) {
        self.hex.push((level, data.to_vec()));
    }
}
