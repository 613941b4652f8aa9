//! Validated sensor table

use crate::sensor::{DataFields, SensorContext};
use crate::traits::SensorDriver;

use super::lookup;

/// Errors building a [`SensorRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegistryError {
    /// Two contexts persist to the same NVM record
    DuplicateNvmKey { first: usize, second: usize },
    /// A context's NVM key is outside the valid id range
    InvalidNvmKey { index: usize },
}

impl core::fmt::Display for RegistryError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RegistryError::DuplicateNvmKey { first, second } => {
                write!(f, "sensors {} and {} share an NVM record", first, second)
            }
            RegistryError::InvalidNvmKey { index } => {
                write!(f, "sensor {} has an invalid NVM key", index)
            }
        }
    }
}

/// Check that every context has its own valid NVM key
///
/// # Errors
/// The first invalid key, or the first pair of contexts sharing a key.
pub fn validate_nvm_keys<D: SensorDriver>(contexts: &[SensorContext<D>]) -> Result<(), RegistryError> {
    for (index, ctx) in contexts.iter().enumerate() {
        let key = ctx.nvm_key();
        if !key.is_valid() {
            return Err(RegistryError::InvalidNvmKey { index });
        }
        if let Some(first) = contexts[..index].iter().position(|other| other.nvm_key() == key) {
            return Err(RegistryError::DuplicateNvmKey {
                first,
                second: index,
            });
        }
    }
    Ok(())
}

/// Sensor table owned by the integrator, checked once at startup
///
/// Borrows the contexts for its lifetime; the slice is typically a
/// `static` array or a local array in `main`.
#[derive(Debug)]
pub struct SensorRegistry<'a, D: SensorDriver> {
    contexts: &'a mut [SensorContext<D>],
}

impl<'a, D: SensorDriver> SensorRegistry<'a, D> {
    /// Wrap `contexts` after validating their NVM keys
    ///
    /// # Errors
    /// See [`validate_nvm_keys`].
    pub fn new(contexts: &'a mut [SensorContext<D>]) -> Result<Self, RegistryError> {
        validate_nvm_keys(contexts)?;
        Ok(Self { contexts })
    }

    /// Number of sensors
    pub fn len(&self) -> usize {
        self.contexts.len()
    }

    /// Check whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SensorContext<D>> {
        self.contexts.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut SensorContext<D>> {
        self.contexts.get_mut(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, SensorContext<D>> {
        self.contexts.iter()
    }

    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, SensorContext<D>> {
        self.contexts.iter_mut()
    }

    /// See [`lookup::find_backend`]
    pub fn find_backend(&self, name: &str) -> Option<&SensorContext<D>> {
        lookup::find_backend(&*self.contexts, name)
    }

    /// See [`lookup::find_backend_mut`]
    pub fn find_backend_mut(&mut self, name: &str) -> Option<&mut SensorContext<D>> {
        lookup::find_backend_mut(&mut *self.contexts, name)
    }

    /// See [`lookup::find_provider_context`]
    pub fn find_provider(&self, fields: DataFields) -> Option<&SensorContext<D>> {
        lookup::find_provider_context(&*self.contexts, fields)
    }

    /// See [`lookup::find_provider_context_mut`]
    pub fn find_provider_mut(&mut self, fields: DataFields) -> Option<&mut SensorContext<D>> {
        lookup::find_provider_context_mut(&mut *self.contexts, fields)
    }

    /// Release the borrowed contexts
    pub fn into_inner(self) -> &'a mut [SensorContext<D>] {
        self.contexts
    }
}
