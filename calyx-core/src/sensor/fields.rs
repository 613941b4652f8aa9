//! Provided data fields
//!
//! Every sensor declares the kinds of values it can produce as a bit set.
//! Lookups ask for a set of fields and accept any sensor whose set is a
//! superset of the request.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign};

/// Set of data field kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DataFields(u32);

impl DataFields {
    /// No fields
    pub const NONE: Self = Self(0);

    pub const ACCELERATION_X: Self = Self(1 << 0);
    pub const ACCELERATION_Y: Self = Self(1 << 1);
    pub const ACCELERATION_Z: Self = Self(1 << 2);
    pub const GYROSCOPE_X: Self = Self(1 << 3);
    pub const GYROSCOPE_Y: Self = Self(1 << 4);
    pub const GYROSCOPE_Z: Self = Self(1 << 5);
    pub const MAGNETOMETER_X: Self = Self(1 << 6);
    pub const MAGNETOMETER_Y: Self = Self(1 << 7);
    pub const MAGNETOMETER_Z: Self = Self(1 << 8);
    /// Relative humidity
    pub const HUMIDITY: Self = Self(1 << 9);
    /// Air pressure
    pub const PRESSURE: Self = Self(1 << 10);
    pub const TEMPERATURE: Self = Self(1 << 11);
    pub const LUMINOSITY: Self = Self(1 << 12);
    /// Supply or battery voltage
    pub const VOLTAGE: Self = Self(1 << 13);
    pub const CO2: Self = Self(1 << 14);
    /// Volatile organic compound index
    pub const VOC: Self = Self(1 << 15);
    /// Nitrogen oxide index
    pub const NOX: Self = Self(1 << 16);
    pub const PM1_0: Self = Self(1 << 17);
    pub const PM2_5: Self = Self(1 << 18);
    pub const PM4_0: Self = Self(1 << 19);
    pub const PM10: Self = Self(1 << 20);

    /// All three acceleration axes
    pub const ACCELERATION: Self = Self::ACCELERATION_X
        .union(Self::ACCELERATION_Y)
        .union(Self::ACCELERATION_Z);

    /// All three gyroscope axes
    pub const GYROSCOPE: Self = Self::GYROSCOPE_X
        .union(Self::GYROSCOPE_Y)
        .union(Self::GYROSCOPE_Z);

    /// All three magnetometer axes
    pub const MAGNETOMETER: Self = Self::MAGNETOMETER_X
        .union(Self::MAGNETOMETER_Y)
        .union(Self::MAGNETOMETER_Z);

    /// Temperature, humidity and pressure
    pub const ENVIRONMENTAL: Self = Self::TEMPERATURE
        .union(Self::HUMIDITY)
        .union(Self::PRESSURE);

    /// Every defined field
    pub const ALL: Self = Self((1 << 21) - 1);

    /// Create an empty set
    pub const fn empty() -> Self {
        Self::NONE
    }

    /// Create a set from raw bits, keeping unknown bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Create a set from raw bits, dropping bits with no defined field
    pub const fn from_bits_truncate(bits: u32) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Combine two sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Fields present in both sets
    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Check whether every field of `other` is in `self`
    ///
    /// An empty `other` is contained in every set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Check whether the sets share at least one field
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Check whether the set is empty
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of fields in the set
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }
}

impl BitOr for DataFields {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitOrAssign for DataFields {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for DataFields {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl BitAndAssign for DataFields {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl From<u32> for DataFields {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}
