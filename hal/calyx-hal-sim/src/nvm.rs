//! RAM-backed record storage
//!
//! Behaves like a small flash file system: updating a record appends a new
//! copy and leaves the old one dirty, freeing only marks a record dirty, and
//! space comes back on garbage collection. A store that finds no free slot
//! runs garbage collection once and retries before reporting `NoMem`.

use heapless::Vec;

use calyx_hal::nvm::{NvmError, NvmStorage, RecordKey};

/// Request counters, for asserting what reached the storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NvmStats {
    /// Calls to `store`
    pub stores: u32,
    /// Calls to `load`
    pub loads: u32,
    /// Calls to `free`
    pub frees: u32,
    /// Garbage collection passes, explicit or triggered by a full store
    pub gc_runs: u32,
}

#[derive(Debug, Clone)]
struct Slot<const RECORD_SIZE: usize> {
    key: RecordKey,
    data: Vec<u8, RECORD_SIZE>,
    live: bool,
}

/// Simulated NVM with room for `RECORDS` record copies of up to
/// `RECORD_SIZE` bytes each
#[derive(Debug, Clone)]
pub struct RamNvm<const RECORDS: usize, const RECORD_SIZE: usize> {
    slots: Vec<Slot<RECORD_SIZE>, RECORDS>,
    initialized: bool,
    busy: bool,
    busy_after_write: bool,
    stats: NvmStats,
}

impl<const RECORDS: usize, const RECORD_SIZE: usize> Default for RamNvm<RECORDS, RECORD_SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const RECORDS: usize, const RECORD_SIZE: usize> RamNvm<RECORDS, RECORD_SIZE> {
    /// Create empty, initialized storage
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            initialized: true,
            busy: false,
            busy_after_write: false,
            stats: NvmStats {
                stores: 0,
                loads: 0,
                frees: 0,
                gc_runs: 0,
            },
        }
    }

    /// Create storage that rejects every request until [`RamNvm::init`]
    pub const fn uninitialized() -> Self {
        Self {
            slots: Vec::new(),
            initialized: false,
            busy: false,
            busy_after_write: false,
            stats: NvmStats {
                stores: 0,
                loads: 0,
                frees: 0,
                gc_runs: 0,
            },
        }
    }

    /// Bring the storage up
    pub fn init(&mut self) {
        self.initialized = true;
    }

    /// Force the busy state, as if another task had an operation in flight
    pub fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Stay busy after every successful store until [`RamNvm::settle`]
    ///
    /// Models flash drivers that only queue the write.
    pub fn set_busy_after_write(&mut self, enabled: bool) {
        self.busy_after_write = enabled;
    }

    /// Finish any queued operation
    pub fn settle(&mut self) {
        self.busy = false;
    }

    /// Request counters
    pub fn stats(&self) -> NvmStats {
        self.stats
    }

    /// Number of records currently readable
    pub fn live_records(&self) -> usize {
        self.slots.iter().filter(|s| s.live).count()
    }

    /// Number of slots waiting for garbage collection
    pub fn dirty_records(&self) -> usize {
        self.slots.iter().filter(|s| !s.live).count()
    }

    /// Slots still available without garbage collection
    pub fn free_slots(&self) -> usize {
        RECORDS - self.slots.len()
    }

    /// Erase everything, including dirty slots
    pub fn purge(&mut self) {
        self.slots.clear();
    }

    fn check_ready(&self, key: RecordKey) -> Result<(), NvmError> {
        if !self.initialized {
            return Err(NvmError::NotInitialized);
        }
        if self.busy {
            return Err(NvmError::Busy);
        }
        if !key.is_valid() {
            return Err(NvmError::InvalidKey);
        }
        Ok(())
    }

    fn live_index(&self, key: RecordKey) -> Option<usize> {
        self.slots.iter().rposition(|s| s.live && s.key == key)
    }

    fn collect(&mut self) {
        self.stats.gc_runs += 1;
        self.slots.retain(|s| s.live);
    }
}

impl<const RECORDS: usize, const RECORD_SIZE: usize> NvmStorage for RamNvm<RECORDS, RECORD_SIZE> {
    type Error = NvmError;

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn store(&mut self, key: RecordKey, data: &[u8]) -> Result<(), NvmError> {
        self.stats.stores += 1;
        self.check_ready(key)?;

        let data = Vec::from_slice(data).map_err(|_| NvmError::DataSize)?;

        if self.slots.is_full() {
            self.collect();
        }

        let previous = self.live_index(key);

        self.slots
            .push(Slot {
                key,
                data,
                live: true,
            })
            .map_err(|_| NvmError::NoMem)?;

        // The new copy is in place, retire the old one
        if let Some(index) = previous {
            self.slots[index].live = false;
        }

        if self.busy_after_write {
            self.busy = true;
        }

        Ok(())
    }

    fn load(&mut self, key: RecordKey, buffer: &mut [u8]) -> Result<usize, NvmError> {
        self.stats.loads += 1;
        self.check_ready(key)?;

        let index = self.live_index(key).ok_or(NvmError::NotFound)?;
        let data = &self.slots[index].data;
        if buffer.len() < data.len() {
            return Err(NvmError::DataSize);
        }

        buffer[..data.len()].copy_from_slice(data);
        Ok(data.len())
    }

    fn free(&mut self, key: RecordKey) -> Result<(), NvmError> {
        self.stats.frees += 1;
        self.check_ready(key)?;

        let index = self.live_index(key).ok_or(NvmError::NotFound)?;
        self.slots[index].live = false;
        Ok(())
    }

    fn gc_run(&mut self) -> Result<(), NvmError> {
        if !self.initialized {
            return Err(NvmError::NotInitialized);
        }
        if self.busy {
            return Err(NvmError::Busy);
        }

        self.collect();
        Ok(())
    }
}
