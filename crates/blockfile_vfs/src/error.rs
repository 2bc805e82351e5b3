//! Error types for the VFS adapter.

use thiserror::Error;

/// Result type for VFS operations.
pub type VfsResult<T> = Result<T, VfsError>;

/// Errors that can occur in VFS operations.
///
/// Operations the adapter declines by design report [`VfsError::Unsupported`],
/// which is distinct from real device failures: the engine treats both as I/O
/// errors, but callers of this crate can tell "not implemented" apart from
/// "the device broke".
#[derive(Debug, Error)]
pub enum VfsError {
    /// Block device error.
    #[error("device error: {0}")]
    Device(#[from] blockfile_device::DeviceError),

    /// The operation is not implemented by this adapter, by design.
    #[error("operation not supported: {op}")]
    Unsupported {
        /// Name of the declined operation.
        op: &'static str,
    },

    /// No database file has been opened yet.
    #[error("no database file is open")]
    NotOpen,
}

impl VfsError {
    /// Creates an unsupported-operation error.
    #[must_use]
    pub fn unsupported(op: &'static str) -> Self {
        Self::Unsupported { op }
    }

    /// Returns `true` if this is a by-design unsupported-operation error.
    #[must_use]
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported { .. })
    }
}
