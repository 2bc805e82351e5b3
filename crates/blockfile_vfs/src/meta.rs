//! Metadata store for the reserved header sector.

use crate::error::VfsResult;
use crate::header::{FileHeader, DEFAULT_NAME, FORMAT_VERSION, HEADER_LEN};
use blockfile_device::BlockDevice;
use std::sync::Arc;
use tracing::debug;

/// Reads and writes the metadata header in sector 0 of the device.
///
/// The header always occupies one whole sector, zero-padded beyond its
/// serialized width. Reserving a full sector avoids partial-sector
/// read-modify-write on devices whose minimum I/O granule is the sector.
///
/// # Panics
///
/// Both [`load`](Self::load) and [`persist`](Self::persist) abort the
/// process if the device's sector size is smaller than the serialized
/// header. Such a device cannot hold the metadata sector at all; there is
/// no degraded mode.
#[derive(Clone)]
pub struct MetadataStore {
    device: Arc<dyn BlockDevice>,
}

impl MetadataStore {
    /// Creates a metadata store over the given device.
    #[must_use]
    pub fn new(device: Arc<dyn BlockDevice>) -> Self {
        Self { device }
    }

    fn checked_sector_size(&self) -> usize {
        let sector_size = self.device.geometry().sector_size;
        assert!(
            sector_size >= HEADER_LEN,
            "sector size {sector_size} is smaller than the metadata header ({HEADER_LEN} bytes)"
        );
        sector_size
    }

    /// Loads the header, initializing it on first use.
    ///
    /// Reads one full sector at device offset 0. A decoded `version` of 0
    /// means the device has never been initialized: the header is
    /// normalized (`version = 1`, name `"unknown"`, size 0) and persisted
    /// before being returned, so a zero version is never observed by
    /// callers.
    ///
    /// # Errors
    ///
    /// Returns an error if the device read or the bootstrap write fails.
    pub fn load(&self) -> VfsResult<FileHeader> {
        let sector_size = self.checked_sector_size();
        let sector = self.device.read_sectors(0, sector_size)?;
        let mut header = FileHeader::decode(&sector);

        if header.is_uninitialized() {
            header.version = FORMAT_VERSION;
            header.set_name(DEFAULT_NAME);
            debug!(name = %header.name(), "metadata sector uninitialized, bootstrapping");
            self.persist(&header)?;
        } else {
            debug!(
                name = %header.name(),
                version = header.version,
                size = header.size,
                "metadata loaded"
            );
        }

        Ok(header)
    }

    /// Persists the header into sector 0.
    ///
    /// The write always spans exactly one full sector, zero-padded beyond
    /// the header's serialized width.
    ///
    /// # Errors
    ///
    /// Returns an error if the device write fails.
    pub fn persist(&self, header: &FileHeader) -> VfsResult<()> {
        let sector_size = self.checked_sector_size();
        let sector = header.encode_sector(sector_size);
        self.device.write_sectors(0, &sector)?;
        debug!(size = header.size, "metadata persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfile_device::MemDevice;

    fn device() -> Arc<MemDevice> {
        Arc::new(MemDevice::new(512, 8))
    }

    #[test]
    fn load_bootstraps_fresh_device() {
        let device = device();
        let store = MetadataStore::new(device.clone());

        let header = store.load().unwrap();
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.size, 0);
        assert_eq!(header.name(), DEFAULT_NAME);

        // The normalized header was persisted, not just returned
        let sector = device.read_sectors(0, 512).unwrap();
        assert_eq!(FileHeader::decode(&sector), header);
    }

    #[test]
    fn load_is_idempotent_on_fresh_device() {
        let store = MetadataStore::new(device());

        let first = store.load().unwrap();
        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn load_returns_existing_header_unchanged() {
        let device = device();
        let store = MetadataStore::new(device.clone());

        let mut header = FileHeader::new();
        header.version = 2;
        header.size = 8192;
        header.set_name("prod.db");
        store.persist(&header).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, header);
    }

    #[test]
    fn persist_load_roundtrip() {
        let store = MetadataStore::new(device());

        let mut header = store.load().unwrap();
        header.size = 12_345;
        store.persist(&header).unwrap();

        assert_eq!(store.load().unwrap().size, 12_345);
    }

    #[test]
    fn persist_writes_exactly_one_sector() {
        let device = device();
        let store = MetadataStore::new(device.clone());
        store.load().unwrap();

        // Everything past sector 0 is still zero
        let rest = device.read_sectors(512, 512 * 7).unwrap();
        assert!(rest.iter().all(|&b| b == 0));
    }

    #[test]
    #[should_panic(expected = "smaller than the metadata header")]
    fn undersized_sector_aborts() {
        let device = Arc::new(MemDevice::new(32, 8));
        let store = MetadataStore::new(device);
        let _ = store.load();
    }
}
