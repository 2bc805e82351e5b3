//! Block device trait and geometry.

use crate::error::{DeviceError, DeviceResult};

/// The fixed geometry of an attached block device.
///
/// Geometry is queried once when the device is attached and never changes
/// for the lifetime of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    /// Minimum I/O granule of the device, in bytes.
    pub sector_size: usize,
    /// Total number of sectors on the device.
    pub sector_count: u64,
}

impl Geometry {
    /// Creates a geometry description.
    ///
    /// # Panics
    ///
    /// Panics if `sector_size` is zero.
    #[must_use]
    pub fn new(sector_size: usize, sector_count: u64) -> Self {
        assert!(sector_size > 0, "sector size must be non-zero");
        Self {
            sector_size,
            sector_count,
        }
    }

    /// Returns the device capacity in bytes.
    #[must_use]
    pub fn capacity(&self) -> u64 {
        self.sector_count * self.sector_size as u64
    }

    /// Validates that a transfer is sector-aligned and within bounds.
    ///
    /// # Errors
    ///
    /// Returns [`DeviceError::Unaligned`] if `offset` or `len` is not a
    /// multiple of the sector size, or [`DeviceError::OutOfRange`] if the
    /// transfer extends beyond the device capacity.
    pub fn check_transfer(&self, offset: u64, len: usize) -> DeviceResult<()> {
        let sector_size = self.sector_size as u64;

        if offset % sector_size != 0 || len as u64 % sector_size != 0 {
            return Err(DeviceError::Unaligned {
                offset,
                len,
                sector_size: self.sector_size,
            });
        }

        let capacity = self.capacity();
        let end = offset.saturating_add(len as u64);
        if end > capacity {
            return Err(DeviceError::OutOfRange {
                offset,
                len,
                capacity,
            });
        }

        Ok(())
    }
}

/// A sector-addressable block device.
///
/// Block devices are **sector stores**. Every transfer starts at a
/// sector-aligned byte offset and covers a whole number of sectors; devices
/// do not interpret the bytes they carry. The byte-addressable file
/// abstraction on top belongs to `blockfile_vfs`.
///
/// # Invariants
///
/// - `geometry` is immutable for the lifetime of the device
/// - `read_sectors` returns exactly `len` bytes
/// - Unwritten sectors read as zeroes
/// - Devices must be `Send + Sync` for shared access
///
/// # Implementors
///
/// - [`super::MemDevice`] - For testing
/// - [`super::ImageDevice`] - For disk-image files
pub trait BlockDevice: Send + Sync {
    /// Returns the device geometry.
    fn geometry(&self) -> Geometry;

    /// Reads `len` bytes starting at device byte offset `offset`.
    ///
    /// Both `offset` and `len` must be multiples of the sector size.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transfer is not sector-aligned
    /// - The transfer extends beyond the device capacity
    /// - An I/O error occurs
    fn read_sectors(&self, offset: u64, len: usize) -> DeviceResult<Vec<u8>>;

    /// Writes `data` starting at device byte offset `offset`.
    ///
    /// Both `offset` and `data.len()` must be multiples of the sector size.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The transfer is not sector-aligned
    /// - The transfer extends beyond the device capacity
    /// - An I/O error occurs
    fn write_sectors(&self, offset: u64, data: &[u8]) -> DeviceResult<()>;
}
