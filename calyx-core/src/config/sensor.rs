//! Sensor configuration
//!
//! The configuration is opaque to the lifecycle core: it is handed to the
//! driver, rewritten by the driver with what the hardware actually applied,
//! and persisted as a fixed-size postcard blob.

use serde::{Deserialize, Serialize};

/// Digital signal processing applied by the sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DspFunction {
    /// Report the last raw sample
    #[default]
    Last,
    /// Low-pass filter, parameter is the filter strength
    LowPass,
    /// High-pass filter, parameter is the filter strength
    HighPass,
    /// IIR filter, parameter is the coefficient
    Iir,
    /// Oversampling, parameter is the sample count
    Oversampling,
}

impl DspFunction {
    /// Lowercase label for diagnostics
    pub const fn as_str(self) -> &'static str {
        match self {
            DspFunction::Last => "last",
            DspFunction::LowPass => "low-pass",
            DspFunction::HighPass => "high-pass",
            DspFunction::Iir => "iir",
            DspFunction::Oversampling => "oversampling",
        }
    }
}

/// Sampling mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorMode {
    /// Powered down, no sampling
    #[default]
    Sleep,
    /// Take one sample, then return to sleep
    Single,
    /// Sample continuously at the configured rate
    Continuous,
}

impl SensorMode {
    /// Lowercase label for diagnostics
    pub const fn as_str(self) -> &'static str {
        match self {
            SensorMode::Sleep => "sleep",
            SensorMode::Single => "single",
            SensorMode::Continuous => "continuous",
        }
    }
}

/// Errors converting a configuration to or from its stored form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// Serialization failed
    Serialize,
    /// Deserialization failed (bad enum tag, truncated data)
    Deserialize,
    /// Stored blob has the wrong size
    Length,
}

/// Sensor configuration
///
/// Zero in a numeric field asks the driver for its default. The driver
/// overwrites every field with the value actually applied, e.g. a requested
/// 10 Hz sample rate may come back as 12.5 Hz.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorConfiguration {
    /// Sample rate in Hz
    pub sample_rate: f32,
    /// Resolution in bits
    pub resolution: u8,
    /// Full-scale range in the sensor's natural unit (g, dps, ...)
    pub scale: u8,
    /// On-sensor filtering
    pub dsp_function: DspFunction,
    /// Parameter for `dsp_function`
    pub dsp_parameter: u8,
    /// Sampling mode
    pub mode: SensorMode,
    /// Reserved for driver use, persisted as-is
    pub reserved: [u8; 3],
}

impl SensorConfiguration {
    /// Size of the stored blob in bytes
    pub const SIZE: usize = 12;

    /// Create a configuration that requests driver defaults everywhere
    pub const fn new() -> Self {
        Self {
            sample_rate: 0.0,
            resolution: 0,
            scale: 0,
            dsp_function: DspFunction::Last,
            dsp_parameter: 0,
            mode: SensorMode::Sleep,
            reserved: [0; 3],
        }
    }

    /// Set the sample rate
    pub const fn with_sample_rate(mut self, hz: f32) -> Self {
        self.sample_rate = hz;
        self
    }

    /// Set the resolution
    pub const fn with_resolution(mut self, bits: u8) -> Self {
        self.resolution = bits;
        self
    }

    /// Set the full-scale range
    pub const fn with_scale(mut self, scale: u8) -> Self {
        self.scale = scale;
        self
    }

    /// Set the DSP function and its parameter
    pub const fn with_dsp(mut self, function: DspFunction, parameter: u8) -> Self {
        self.dsp_function = function;
        self.dsp_parameter = parameter;
        self
    }

    /// Set the sampling mode
    pub const fn with_mode(mut self, mode: SensorMode) -> Self {
        self.mode = mode;
        self
    }

    /// Serialize to the fixed-size stored form
    pub fn to_bytes(&self) -> Result<[u8; Self::SIZE], CodecError> {
        let mut buffer = [0u8; Self::SIZE];
        let used = postcard::to_slice(self, &mut buffer)
            .map_err(|_| CodecError::Serialize)?
            .len();

        if used != Self::SIZE {
            return Err(CodecError::Length);
        }
        Ok(buffer)
    }

    /// Deserialize from the stored form
    ///
    /// `bytes` must be exactly [`SensorConfiguration::SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        if bytes.len() != Self::SIZE {
            return Err(CodecError::Length);
        }
        postcard::from_bytes(bytes).map_err(|_| CodecError::Deserialize)
    }

    /// Iterate over the human-readable lines of this configuration
    pub fn lines(&self) -> impl Iterator<Item = ConfigLine<'_>> {
        ConfigItem::ALL
            .into_iter()
            .map(move |item| ConfigLine { config: self, item })
    }
}

/// One printable line of a configuration dump
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigItem {
    SampleRate,
    Resolution,
    Scale,
    Dsp,
    Mode,
}

impl ConfigItem {
    /// Every line, in print order
    pub const ALL: [ConfigItem; 5] = [
        ConfigItem::SampleRate,
        ConfigItem::Resolution,
        ConfigItem::Scale,
        ConfigItem::Dsp,
        ConfigItem::Mode,
    ];
}

/// A single line of a configuration dump, rendered through `Display`
#[derive(Debug, Clone, Copy)]
pub struct ConfigLine<'a> {
    config: &'a SensorConfiguration,
    item: ConfigItem,
}

impl ConfigLine<'_> {
    /// Which field this line shows
    pub fn item(&self) -> ConfigItem {
        self.item
    }
}

impl core::fmt::Display for ConfigLine<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let c = self.config;
        match self.item {
            ConfigItem::SampleRate if c.sample_rate == 0.0 => f.write_str("Sample rate: default"),
            ConfigItem::SampleRate => write!(f, "Sample rate: {} Hz", c.sample_rate),
            ConfigItem::Resolution if c.resolution == 0 => f.write_str("Resolution: default"),
            ConfigItem::Resolution => write!(f, "Resolution: {} bits", c.resolution),
            ConfigItem::Scale if c.scale == 0 => f.write_str("Scale: default"),
            ConfigItem::Scale => write!(f, "Scale: {}", c.scale),
            ConfigItem::Dsp => write!(
                f,
                "DSP: {} x {}",
                c.dsp_function.as_str(),
                c.dsp_parameter
            ),
            ConfigItem::Mode => write!(f, "Mode: {}", c.mode.as_str()),
        }
    }
}

impl core::fmt::Display for SensorConfiguration {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blob_is_fixed_size() {
        let config = SensorConfiguration::new()
            .with_sample_rate(12.5)
            .with_resolution(10)
            .with_scale(2)
            .with_dsp(DspFunction::Oversampling, 4)
            .with_mode(SensorMode::Continuous);

        let bytes = config.to_bytes().unwrap();
        assert_eq!(bytes.len(), SensorConfiguration::SIZE);
        // f32 little-endian first, then one byte per field
        assert_eq!(&bytes[..4], &12.5f32.to_le_bytes());
        assert_eq!(&bytes[4..9], &[10, 2, 4, 4, 2]);
        assert_eq!(SensorConfiguration::from_bytes(&bytes).unwrap(), config);
    }

    #[test]
    fn test_wrong_length_rejected() {
        let bytes = SensorConfiguration::new().to_bytes().unwrap();
        assert_eq!(
            SensorConfiguration::from_bytes(&bytes[..11]),
            Err(CodecError::Length)
        );
    }

    #[test]
    fn test_bad_enum_tag_rejected() {
        let mut bytes = SensorConfiguration::new().to_bytes().unwrap();
        bytes[6] = 0x7F; // dsp_function
        assert_eq!(
            SensorConfiguration::from_bytes(&bytes),
            Err(CodecError::Deserialize)
        );
    }

    #[test]
    fn test_pretty_print() {
        let config = SensorConfiguration::new()
            .with_sample_rate(12.5)
            .with_dsp(DspFunction::LowPass, 2)
            .with_mode(SensorMode::Continuous);

        let text = format!("{}", config);
        assert_eq!(
            text,
            "Sample rate: 12.5 Hz\n\
             Resolution: default\n\
             Scale: default\n\
             DSP: low-pass x 2\n\
             Mode: continuous\n"
        );
    }
}
