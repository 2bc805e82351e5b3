//! The VFS half of the capability surface.

use crate::error::{VfsError, VfsResult};
use crate::file::{BlockFile, VfsFile};
use crate::header::FileHeader;
use crate::meta::MetadataStore;
use crate::types::{AccessMode, OpenKind};
use blockfile_device::BlockDevice;
use parking_lot::RwLock;
use rand::RngCore;
use std::sync::Arc;
use tracing::debug;

/// Name under which [`BlockVfs`] is registered with the engine.
pub const VFS_NAME: &str = "blockfile";

/// The filesystem-level capability set the engine drives.
///
/// The engine looks a VFS up by name in the [`crate::VfsRegistry`] at
/// startup, then opens its database file through it. `sleep`,
/// `current_time`, and `last_error` are part of the surface the engine
/// expects but are not implemented by this adapter.
///
/// # Implementors
///
/// - [`BlockVfs`] - Single read-only database file on a raw block device
pub trait Vfs: Send + Sync {
    /// Returns the name this VFS registers under.
    fn name(&self) -> &str;

    /// Opens the file `path` of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is not supported or the open fails.
    fn open(&self, path: &str, kind: OpenKind) -> VfsResult<Box<dyn VfsFile>>;

    /// Deletes the file `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete is not possible.
    fn delete(&self, path: &str) -> VfsResult<()>;

    /// Probes existence or permissions of `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the probe itself fails.
    fn access(&self, path: &str, mode: AccessMode) -> VfsResult<bool>;

    /// Resolves `path` to a full pathname.
    ///
    /// # Errors
    ///
    /// Returns an error if resolution fails.
    fn full_pathname(&self, path: &str) -> VfsResult<String>;

    /// Fills `buf` with pseudo-random bytes. Cannot fail.
    fn randomness(&self, buf: &mut [u8]);

    /// Suspends the caller for at least `micros` microseconds.
    ///
    /// # Errors
    ///
    /// Not implemented by this adapter.
    fn sleep(&self, micros: u64) -> VfsResult<()>;

    /// Returns the current time as a Julian day number.
    ///
    /// # Errors
    ///
    /// Not implemented by this adapter.
    fn current_time(&self) -> VfsResult<f64>;

    /// Returns the most recent OS-level error message.
    ///
    /// # Errors
    ///
    /// Not implemented by this adapter.
    fn last_error(&self) -> VfsResult<String>;
}

/// A VFS exposing one read-only database file stored on a raw block
/// device.
///
/// Only the main database may be opened; journals and temporary files are
/// declined without touching the device. The loaded header is cached here
/// and shared with every [`BlockFile`] handed out, so there is exactly one
/// logical file and one source of truth for its size. A second `open`
/// re-reads the header from the device and replaces the cache.
pub struct BlockVfs {
    device: Arc<dyn BlockDevice>,
    meta: MetadataStore,
    header: Arc<RwLock<Option<FileHeader>>>,
}

impl BlockVfs {
    /// Creates a VFS over an attached device.
    #[must_use]
    pub fn new(device: Arc<dyn BlockDevice>) -> Self {
        let meta = MetadataStore::new(device.clone());
        Self {
            device,
            meta,
            header: Arc::new(RwLock::new(None)),
        }
    }

    /// Returns the current cached header, if a file has been opened.
    #[must_use]
    pub fn header(&self) -> Option<FileHeader> {
        self.header.read().clone()
    }
}

impl Vfs for BlockVfs {
    fn name(&self) -> &str {
        VFS_NAME
    }

    fn open(&self, path: &str, kind: OpenKind) -> VfsResult<Box<dyn VfsFile>> {
        if kind != OpenKind::MainDb {
            debug!(path, kind = kind.as_str(), "open declined, only the main database is backed");
            return Err(VfsError::unsupported("open"));
        }

        let header = self.meta.load()?;
        debug!(path, name = %header.name(), size = header.size, "database file opened");
        *self.header.write() = Some(header);

        Ok(Box::new(BlockFile::new(
            self.device.clone(),
            self.header.clone(),
        )))
    }

    fn delete(&self, path: &str) -> VfsResult<()> {
        let mut guard = self.header.write();
        let header = guard.as_mut().ok_or(VfsError::NotOpen)?;

        debug!(path, "delete resets the logical file size");
        header.size = 0;
        self.meta.persist(header)?;
        Ok(())
    }

    fn access(&self, path: &str, mode: AccessMode) -> VfsResult<bool> {
        debug!(path, ?mode, "access probe, always accessible");
        Ok(true)
    }

    fn full_pathname(&self, path: &str) -> VfsResult<String> {
        // No directory tree to resolve against
        Ok(path.to_string())
    }

    fn randomness(&self, buf: &mut [u8]) {
        rand::thread_rng().fill_bytes(buf);
    }

    fn sleep(&self, micros: u64) -> VfsResult<()> {
        debug!(micros, "sleep declined");
        Err(VfsError::unsupported("sleep"))
    }

    fn current_time(&self) -> VfsResult<f64> {
        debug!("current_time declined");
        Err(VfsError::unsupported("current_time"))
    }

    fn last_error(&self) -> VfsResult<String> {
        Err(VfsError::unsupported("last_error"))
    }
}
