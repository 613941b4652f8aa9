//! Lifecycle errors

use crate::config::CodecError;

/// Errors from lifecycle operations
///
/// `E` is the status type of the collaborator the operation talks to: the
/// driver for initialize, configure and refresh, the NVM for store, load
/// and erase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LifecycleError<E> {
    /// A required input was absent (context, initializer)
    Null,
    /// The sensor is not in a state that allows the operation
    InvalidState,
    /// The NVM subsystem is mid-operation; retry later
    Busy,
    /// Status returned by the driver or NVM, unchanged
    Backend(E),
    /// The stored configuration blob could not be encoded or decoded
    Codec(CodecError),
}

impl<E> LifecycleError<E> {
    /// Check whether retrying later may succeed
    pub fn is_transient(&self) -> bool {
        matches!(self, LifecycleError::Busy)
    }

    /// The collaborator status, if that is what failed
    pub fn backend(&self) -> Option<&E> {
        match self {
            LifecycleError::Backend(e) => Some(e),
            _ => None,
        }
    }
}

impl<E> From<CodecError> for LifecycleError<E> {
    fn from(e: CodecError) -> Self {
        LifecycleError::Codec(e)
    }
}

impl<E: core::fmt::Display> core::fmt::Display for LifecycleError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LifecycleError::Null => f.write_str("required reference missing"),
            LifecycleError::InvalidState => f.write_str("invalid state"),
            LifecycleError::Busy => f.write_str("storage busy"),
            LifecycleError::Backend(e) => write!(f, "backend: {}", e),
            LifecycleError::Codec(e) => write!(f, "configuration blob: {:?}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calyx_hal::NvmError;

    #[test]
    fn test_only_busy_is_transient() {
        assert!(LifecycleError::<NvmError>::Busy.is_transient());
        assert!(!LifecycleError::<NvmError>::Null.is_transient());
        assert!(!LifecycleError::Backend(NvmError::NoMem).is_transient());
    }

    #[test]
    fn test_backend_accessor() {
        let err = LifecycleError::Backend(NvmError::NoMem);
        assert_eq!(err.backend(), Some(&NvmError::NoMem));
        assert_eq!(LifecycleError::<NvmError>::InvalidState.backend(), None);
    }

    #[test]
    fn test_display() {
        let err = LifecycleError::Backend(NvmError::NotFound);
        assert_eq!(err.to_string(), "backend: record not found");
    }
}
