//! In-memory block device for testing.

use crate::device::{BlockDevice, Geometry};
use crate::error::DeviceResult;
use parking_lot::RwLock;

/// An in-memory block device.
///
/// This device keeps all sectors in memory and is suitable for:
/// - Unit tests
/// - Integration tests
/// - Ephemeral databases that don't need persistence
///
/// A freshly created device reads as all zeroes, which is what a
/// never-initialized physical volume looks like to the metadata bootstrap.
///
/// # Thread Safety
///
/// This device is thread-safe and can be shared across threads.
///
/// # Example
///
/// ```rust
/// use blockfile_device::{BlockDevice, MemDevice};
///
/// let device = MemDevice::new(512, 8);
/// assert_eq!(device.geometry().capacity(), 4096);
/// ```
#[derive(Debug)]
pub struct MemDevice {
    geometry: Geometry,
    data: RwLock<Vec<u8>>,
}

impl MemDevice {
    /// Creates a zero-filled in-memory device.
    #[must_use]
    pub fn new(sector_size: usize, sector_count: u64) -> Self {
        let geometry = Geometry::new(sector_size, sector_count);
        let data = vec![0u8; geometry.capacity() as usize];
        Self {
            geometry,
            data: RwLock::new(data),
        }
    }

    /// Creates an in-memory device with pre-existing sector contents.
    ///
    /// Useful for testing re-attach scenarios.
    ///
    /// # Panics
    ///
    /// Panics if `data.len()` is not a multiple of `sector_size`.
    #[must_use]
    pub fn with_data(sector_size: usize, data: Vec<u8>) -> Self {
        assert!(
            data.len() % sector_size == 0,
            "device contents must be a whole number of sectors"
        );
        let geometry = Geometry::new(sector_size, (data.len() / sector_size) as u64);
        Self {
            geometry,
            data: RwLock::new(data),
        }
    }

    /// Returns a copy of the full device contents.
    ///
    /// Useful for testing and debugging.
    #[must_use]
    pub fn data(&self) -> Vec<u8> {
        self.data.read().clone()
    }
}

impl BlockDevice for MemDevice {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn read_sectors(&self, offset: u64, len: usize) -> DeviceResult<Vec<u8>> {
        self.geometry.check_transfer(offset, len)?;

        let data = self.data.read();
        let start = offset as usize;
        Ok(data[start..start + len].to_vec())
    }

    fn write_sectors(&self, offset: u64, data: &[u8]) -> DeviceResult<()> {
        self.geometry.check_transfer(offset, data.len())?;

        let mut sectors = self.data.write();
        let start = offset as usize;
        sectors[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}
