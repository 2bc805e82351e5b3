//! The open-file half of the VFS capability surface.

use crate::error::{VfsError, VfsResult};
use crate::header::FileHeader;
use crate::translate::translate;
use crate::types::{LockLevel, SyncMode};
use blockfile_device::BlockDevice;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

/// The file-operation capability set the engine drives after `open`.
///
/// Byte-addressed, like an ordinary random-access file. This adapter is
/// read-only: the mutating operations and `close` return
/// [`VfsError::Unsupported`] rather than silently succeeding, and the lock
/// family is acknowledged without any real locking.
///
/// # Implementors
///
/// - [`BlockFile`] - Read-only file backed by a raw block device
pub trait VfsFile: Send + Sync {
    /// Reads `len` bytes starting at logical byte offset `offset`.
    ///
    /// # Errors
    ///
    /// Returns an error if no file is open or the device read fails.
    fn read_at(&self, offset: u64, len: usize) -> VfsResult<Vec<u8>>;

    /// Writes `data` at logical byte offset `offset`.
    ///
    /// # Errors
    ///
    /// Always fails: this adapter has no write path.
    fn write_at(&self, offset: u64, data: &[u8]) -> VfsResult<()>;

    /// Truncates the file to `size` bytes.
    ///
    /// # Errors
    ///
    /// Always fails: this adapter has no write path.
    fn truncate(&self, size: u64) -> VfsResult<()>;

    /// Forces written data to durable storage.
    ///
    /// # Errors
    ///
    /// Always fails: there is no write path, so nothing can be synced.
    fn sync(&self, mode: SyncMode) -> VfsResult<()>;

    /// Returns the logical file size in bytes.
    ///
    /// The size comes from the cached metadata header, never from probing
    /// the device.
    ///
    /// # Errors
    ///
    /// Returns [`VfsError::NotOpen`] if no header has been loaded.
    fn size(&self) -> VfsResult<u64>;

    /// Takes a lock at the given level. No-op success.
    ///
    /// # Errors
    ///
    /// Never fails.
    fn lock(&self, level: LockLevel) -> VfsResult<()>;

    /// Releases a lock down to the given level. No-op success.
    ///
    /// # Errors
    ///
    /// Never fails.
    fn unlock(&self, level: LockLevel) -> VfsResult<()>;

    /// Reports whether some connection holds a reserved lock.
    ///
    /// Always reports "not held".
    ///
    /// # Errors
    ///
    /// Never fails.
    fn check_reserved_lock(&self) -> VfsResult<bool>;

    /// Engine-specific control operation on the open file.
    ///
    /// # Errors
    ///
    /// Always fails: no control operations are implemented.
    fn file_control(&self, op: u32) -> VfsResult<()>;

    /// Returns the sector size of the backing device.
    ///
    /// The engine assumes this call cannot fail.
    fn sector_size(&self) -> usize;

    /// Returns the device characteristic flags. Always 0 here.
    fn device_characteristics(&self) -> u32;

    /// Closes the file.
    ///
    /// # Errors
    ///
    /// Always fails: the single logical file stays open for the life of
    /// the process.
    fn close(&self) -> VfsResult<()>;
}

impl std::fmt::Debug for dyn VfsFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("VfsFile")
    }
}

/// A read-only database file backed by a raw block device.
///
/// Created by [`crate::BlockVfs::open`]. Holds the device handle and a
/// reference to the VFS-wide cached header; the header is the single
/// source of truth for the file size, shared with the VFS so that
/// `delete` and a second `open` are observed immediately.
pub struct BlockFile {
    device: Arc<dyn BlockDevice>,
    header: Arc<RwLock<Option<FileHeader>>>,
}

impl BlockFile {
    pub(crate) fn new(
        device: Arc<dyn BlockDevice>,
        header: Arc<RwLock<Option<FileHeader>>>,
    ) -> Self {
        Self { device, header }
    }
}

impl VfsFile for BlockFile {
    fn read_at(&self, offset: u64, len: usize) -> VfsResult<Vec<u8>> {
        if self.header.read().is_none() {
            return Err(VfsError::NotOpen);
        }

        let sector_size = self.device.geometry().sector_size;
        let range = translate(offset, len, sector_size);
        trace!(
            offset,
            len,
            start_sector = range.start_sector,
            sector_count = range.sector_count,
            skip = range.skip,
            "read"
        );

        let run = self.device.read_sectors(range.device_offset(), range.device_len())?;
        Ok(run[range.skip..range.skip + len].to_vec())
    }

    fn write_at(&self, _offset: u64, _data: &[u8]) -> VfsResult<()> {
        debug!("write declined, adapter is read-only");
        Err(VfsError::unsupported("write"))
    }

    fn truncate(&self, _size: u64) -> VfsResult<()> {
        debug!("truncate declined, adapter is read-only");
        Err(VfsError::unsupported("truncate"))
    }

    fn sync(&self, mode: SyncMode) -> VfsResult<()> {
        debug!(?mode, "sync declined, adapter is read-only");
        Err(VfsError::unsupported("sync"))
    }

    fn size(&self) -> VfsResult<u64> {
        let header = self.header.read();
        let size = header.as_ref().ok_or(VfsError::NotOpen)?.size;
        trace!(size, "size");
        Ok(size)
    }

    fn lock(&self, level: LockLevel) -> VfsResult<()> {
        trace!(?level, "lock acknowledged");
        Ok(())
    }

    fn unlock(&self, level: LockLevel) -> VfsResult<()> {
        trace!(?level, "unlock acknowledged");
        Ok(())
    }

    fn check_reserved_lock(&self) -> VfsResult<bool> {
        trace!("reserved lock probe, not held");
        Ok(false)
    }

    fn file_control(&self, op: u32) -> VfsResult<()> {
        debug!(op, "file control declined");
        Err(VfsError::unsupported("file_control"))
    }

    fn sector_size(&self) -> usize {
        self.device.geometry().sector_size
    }

    fn device_characteristics(&self) -> u32 {
        0
    }

    fn close(&self) -> VfsResult<()> {
        debug!("close declined, logical file lives for the process");
        Err(VfsError::unsupported("close"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfile_device::MemDevice;

    fn open_file(device: Arc<MemDevice>) -> BlockFile {
        let mut header = FileHeader::new();
        header.version = 1;
        header.size = 2048;
        BlockFile::new(device, Arc::new(RwLock::new(Some(header))))
    }

    #[test]
    fn read_copies_from_middle_of_fetched_run() {
        let device = Arc::new(MemDevice::new(512, 8));

        // Logical offset 600 lands 88 bytes into device sector 2
        let mut sector = vec![0u8; 512];
        for (i, b) in sector.iter_mut().enumerate() {
            *b = (i % 251) as u8;
        }
        device.write_sectors(1024, &sector).unwrap();

        let file = open_file(device);
        let data = file.read_at(600, 100).unwrap();
        assert_eq!(data, &sector[88..188]);
    }

    #[test]
    fn read_starting_at_offset_zero_maps_to_sector_one() {
        let device = Arc::new(MemDevice::new(512, 8));
        device.write_sectors(512, &[7u8; 512]).unwrap();

        let file = open_file(device);
        assert_eq!(file.read_at(0, 16).unwrap(), vec![7u8; 16]);
    }

    #[test]
    fn read_never_observes_metadata_sector() {
        let device = Arc::new(MemDevice::new(512, 8));
        device.write_sectors(0, &[0xffu8; 512]).unwrap();

        let file = open_file(device);
        // Logical offset 0 is device sector 1, still zero-filled
        assert_eq!(file.read_at(0, 32).unwrap(), vec![0u8; 32]);
    }

    #[test]
    fn read_without_header_fails() {
        let device = Arc::new(MemDevice::new(512, 8));
        let file = BlockFile::new(device, Arc::new(RwLock::new(None)));

        assert!(matches!(file.read_at(0, 16), Err(VfsError::NotOpen)));
    }

    #[test]
    fn size_comes_from_cached_header() {
        let device = Arc::new(MemDevice::new(512, 8));
        let file = open_file(device);
        assert_eq!(file.size().unwrap(), 2048);
    }

    #[test]
    fn size_without_header_fails() {
        let device = Arc::new(MemDevice::new(512, 8));
        let file = BlockFile::new(device, Arc::new(RwLock::new(None)));
        assert!(matches!(file.size(), Err(VfsError::NotOpen)));
    }

    #[test]
    fn mutating_operations_are_unsupported() {
        let device = Arc::new(MemDevice::new(512, 8));
        let file = open_file(device);

        assert!(file.write_at(0, b"x").unwrap_err().is_unsupported());
        assert!(file.truncate(0).unwrap_err().is_unsupported());
        assert!(file.sync(SyncMode::Full).unwrap_err().is_unsupported());
        assert!(file.file_control(7).unwrap_err().is_unsupported());
        assert!(file.close().unwrap_err().is_unsupported());
    }

    #[test]
    fn lock_family_is_a_noop() {
        let device = Arc::new(MemDevice::new(512, 8));
        let file = open_file(device);

        file.lock(LockLevel::Shared).unwrap();
        file.lock(LockLevel::Exclusive).unwrap();
        file.unlock(LockLevel::None).unwrap();
        assert!(!file.check_reserved_lock().unwrap());
    }

    #[test]
    fn sector_size_and_characteristics() {
        let device = Arc::new(MemDevice::new(4096, 8));
        let file = open_file(device);

        assert_eq!(file.sector_size(), 4096);
        assert_eq!(file.device_characteristics(), 0);
    }
}
