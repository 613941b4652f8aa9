//! Short sensor names
//!
//! Names are at most eight visible characters, matching the nine-byte
//! null-terminated field drivers traditionally fill in.

use heapless::String;

/// Maximum visible characters in a sensor name
pub const MAX_NAME_LEN: usize = 8;

/// Reasons a name is rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NameError {
    /// More than [`MAX_NAME_LEN`] bytes
    TooLong,
    /// Contains a NUL byte, which would truncate the name on the wire
    InteriorNul,
}

/// Fixed-capacity sensor name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorName(String<MAX_NAME_LEN>);

impl SensorName {
    /// Create a name, rejecting anything that does not fit
    pub fn new(name: &str) -> Result<Self, NameError> {
        if name.as_bytes().contains(&0) {
            return Err(NameError::InteriorNul);
        }

        let mut inner = String::new();
        inner.push_str(name).map_err(|_| NameError::TooLong)?;
        Ok(Self(inner))
    }

    /// The name as a string slice
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for SensorName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for SensorName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<&str> for SensorName {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

impl TryFrom<&str> for SensorName {
    type Error = NameError;

    fn try_from(name: &str) -> Result<Self, NameError> {
        Self::new(name)
    }
}

impl core::fmt::Display for SensorName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fits() {
        let name = SensorName::new("LIS2DH12").unwrap();
        assert_eq!(name.as_str(), "LIS2DH12");
        assert_eq!(name, "LIS2DH12");
    }

    #[test]
    fn test_too_long() {
        assert_eq!(SensorName::new("LIS2DH12X"), Err(NameError::TooLong));
    }

    #[test]
    fn test_interior_nul() {
        assert_eq!(SensorName::new("acc\0el"), Err(NameError::InteriorNul));
    }

    #[test]
    fn test_empty_is_allowed() {
        let name = SensorName::try_from("").unwrap();
        assert!(name.as_str().is_empty());
    }
}
