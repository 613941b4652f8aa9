//! Non-volatile storage abstractions
//!
//! Provides a record-oriented storage contract: data is arranged in files,
//! each holding records addressed by a 16-bit id. A typical layout keeps one
//! file for sensor configuration with one record per sensor.
//!
//! Implementations own wear leveling, integrity and busy tracking. Callers
//! must check [`NvmStorage::is_busy`] before issuing a request; a busy
//! subsystem rejects requests instead of queueing them.

/// Lowest valid file or record id
pub const MIN_ID: u16 = 0x0001;

/// Highest valid file or record id
pub const MAX_ID: u16 = 0xBFFF;

/// Address of one record in storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RecordKey {
    /// File id, valid range 1 ..= 0xBFFF
    pub file: u16,
    /// Record id within the file, valid range 1 ..= 0xBFFF
    pub record: u16,
}

impl RecordKey {
    /// Serialized key length in bytes
    pub const SIZE: usize = 4;

    /// Create a key from raw ids
    ///
    /// Ids are not validated here; use [`RecordKey::is_valid`].
    pub const fn new(file: u16, record: u16) -> Self {
        Self { file, record }
    }

    /// Check both ids lie in the range the storage accepts
    pub const fn is_valid(&self) -> bool {
        self.file >= MIN_ID && self.file <= MAX_ID && self.record >= MIN_ID && self.record <= MAX_ID
    }

    /// Encode as little-endian `file ++ record`
    pub fn to_bytes(self) -> [u8; Self::SIZE] {
        let f = self.file.to_le_bytes();
        let r = self.record.to_le_bytes();
        [f[0], f[1], r[0], r[1]]
    }

    /// Decode from the representation produced by [`RecordKey::to_bytes`]
    pub fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self {
            file: u16::from_le_bytes([bytes[0], bytes[1]]),
            record: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }
}

/// Status codes of a storage subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NvmError {
    /// Storage has not been initialized
    NotInitialized,
    /// Another operation is in progress
    Busy,
    /// No space left for the record, even after garbage collection
    NoMem,
    /// Record not found
    NotFound,
    /// Record exceeds the maximum size, or the read buffer is too small
    DataSize,
    /// File or record id outside the valid range
    InvalidKey,
    /// Low-level flash operation failed
    Flash,
}

impl core::fmt::Display for NvmError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            NvmError::NotInitialized => "storage not initialized",
            NvmError::Busy => "storage busy",
            NvmError::NoMem => "storage full",
            NvmError::NotFound => "record not found",
            NvmError::DataSize => "record size mismatch",
            NvmError::InvalidKey => "invalid file or record id",
            NvmError::Flash => "flash operation failed",
        };
        f.write_str(msg)
    }
}

/// Record storage trait
///
/// Every call is treated as atomic-or-failed; there are no transactions
/// spanning several calls.
pub trait NvmStorage {
    /// Status type returned by the subsystem
    type Error;

    /// Check if the subsystem is running an operation
    ///
    /// Must not block.
    fn is_busy(&self) -> bool;

    /// Store `data` under `key`, replacing any previous record
    fn store(&mut self, key: RecordKey, data: &[u8]) -> Result<(), Self::Error>;

    /// Load the record under `key` into `buffer`
    ///
    /// # Returns
    /// The number of bytes written to `buffer`.
    fn load(&mut self, key: RecordKey, buffer: &mut [u8]) -> Result<usize, Self::Error>;

    /// Mark the record under `key` as deletable
    ///
    /// Space is reclaimed by the next [`NvmStorage::gc_run`].
    fn free(&mut self, key: RecordKey) -> Result<(), Self::Error>;

    /// Reclaim space held by freed and superseded records
    fn gc_run(&mut self) -> Result<(), Self::Error>;
}

impl<T: NvmStorage + ?Sized> NvmStorage for &mut T {
    type Error = T::Error;

    fn is_busy(&self) -> bool {
        (**self).is_busy()
    }

    fn store(&mut self, key: RecordKey, data: &[u8]) -> Result<(), Self::Error> {
        (**self).store(key, data)
    }

    fn load(&mut self, key: RecordKey, buffer: &mut [u8]) -> Result<usize, Self::Error> {
        (**self).load(key, buffer)
    }

    fn free(&mut self, key: RecordKey) -> Result<(), Self::Error> {
        (**self).free(key)
    }

    fn gc_run(&mut self) -> Result<(), Self::Error> {
        (**self).gc_run()
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for RecordKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.len() < Self::SIZE {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[..Self::SIZE].copy_from_slice(&self.to_bytes());
        Ok(Self::SIZE)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.len() < Self::SIZE {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        let key = Self::from_bytes([buffer[0], buffer[1], buffer[2], buffer[3]]);
        if !key.is_valid() {
            return Err(sequential_storage::map::SerializationError::InvalidFormat);
        }
        Ok((key, Self::SIZE))
    }
}
