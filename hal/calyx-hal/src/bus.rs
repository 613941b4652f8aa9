//! Bus descriptors
//!
//! A sensor is addressed by the transport it sits on plus an 8-bit handle
//! (chip select index for SPI, 7-bit address for I2C). The transports
//! themselves are implemented by the platform; the core only passes the
//! descriptor through to the backend initializer.

/// Transport a sensor is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    /// No bus, e.g. an on-chip peripheral such as the internal temperature sensor
    #[default]
    None,
    /// SPI, handle is the chip select index
    Spi,
    /// I2C, handle is the 7-bit device address
    I2c,
    /// UART
    Uart,
    /// PDM microphone interface
    Pdm,
}

impl Bus {
    /// Short lowercase label used in diagnostics
    pub const fn as_str(self) -> &'static str {
        match self {
            Bus::None => "none",
            Bus::Spi => "spi",
            Bus::I2c => "i2c",
            Bus::Uart => "uart",
            Bus::Pdm => "pdm",
        }
    }

    /// Check whether a handle is addressable on this bus
    ///
    /// I2C addresses are 7 bits wide; other transports accept any handle.
    pub const fn accepts_handle(self, handle: u8) -> bool {
        match self {
            Bus::I2c => handle <= 0x7F,
            _ => true,
        }
    }
}

impl core::fmt::Display for Bus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
