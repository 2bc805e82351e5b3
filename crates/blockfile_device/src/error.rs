//! Error types for block device operations.

use std::io;
use thiserror::Error;

/// Result type for block device operations.
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Errors that can occur during block device operations.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A transfer was not sector-aligned.
    #[error("unaligned transfer: offset {offset}, len {len}, sector size {sector_size}")]
    Unaligned {
        /// The requested device offset in bytes.
        offset: u64,
        /// The requested transfer length in bytes.
        len: usize,
        /// The device's sector size in bytes.
        sector_size: usize,
    },

    /// A transfer extended beyond the device capacity.
    #[error("transfer out of range: offset {offset}, len {len}, capacity {capacity}")]
    OutOfRange {
        /// The requested device offset in bytes.
        offset: u64,
        /// The requested transfer length in bytes.
        len: usize,
        /// The device capacity in bytes.
        capacity: u64,
    },
}
