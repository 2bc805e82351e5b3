//! # blockfile VFS
//!
//! Byte-addressable database file adapter over a raw block device.
//!
//! An embedded relational engine treats a block device as a single
//! random-access file through this crate:
//!
//! - [`MetadataStore`] owns the binary header in the device's reserved
//!   first sector (logical file size, format version, label), and
//!   bootstraps it on first use
//! - [`translate`] maps arbitrary byte ranges onto whole-sector device
//!   transfers, compensating for sub-sector offsets by copying out of the
//!   middle of the fetched run
//! - [`BlockVfs`] / [`BlockFile`] expose the capability surface the
//!   engine dispatches through ([`Vfs`] and [`VfsFile`])
//! - [`VfsRegistry`] is the named registration surface the engine uses to
//!   find the adapter at startup
//!
//! The adapter is read-only and models exactly one logical file. Write,
//! truncate, sync, close, and control operations report
//! [`VfsError::Unsupported`]; they never silently succeed.
//!
//! ## Example
//!
//! ```rust
//! use blockfile_device::MemDevice;
//! use blockfile_vfs::{BlockVfs, OpenKind, Vfs, VfsFile};
//! use std::sync::Arc;
//!
//! let device = Arc::new(MemDevice::new(512, 64));
//! let vfs = BlockVfs::new(device);
//!
//! let file = vfs.open("test.db", OpenKind::MainDb).unwrap();
//! assert_eq!(file.size().unwrap(), 0);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod header;
mod meta;
mod registry;
mod translate;
mod types;
mod vfs;

pub use error::{VfsError, VfsResult};
pub use file::{BlockFile, VfsFile};
pub use header::{FileHeader, DEFAULT_NAME, FORMAT_VERSION, HEADER_LEN, NAME_LEN};
pub use meta::MetadataStore;
pub use registry::VfsRegistry;
pub use translate::{translate, SectorRange};
pub use types::{AccessMode, LockLevel, OpenKind, SyncMode};
pub use vfs::{BlockVfs, Vfs, VFS_NAME};
