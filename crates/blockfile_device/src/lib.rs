//! # blockfile device layer
//!
//! Sector-addressable block device trait and implementations.
//!
//! This crate provides the lowest-level abstraction for blockfile.
//! Devices are **sector stores** - every transfer covers whole sectors at
//! sector-aligned offsets, and devices do not interpret the bytes they
//! carry. All byte-level structure (the metadata header, file contents)
//! is owned by `blockfile_vfs`.
//!
//! ## Design Principles
//!
//! - Devices expose immutable [`Geometry`] (sector size, sector count)
//!   queried once at attach time
//! - All I/O is validated for sector alignment and device bounds
//! - Must be `Send + Sync` for shared access
//!
//! ## Available Devices
//!
//! - [`MemDevice`] - Zero-filled in-memory device for testing
//! - [`ImageDevice`] - Device backed by a disk-image file
//!
//! ## Example
//!
//! ```rust
//! use blockfile_device::{BlockDevice, MemDevice};
//!
//! let device = MemDevice::new(512, 8);
//! let sector = device.read_sectors(0, 512).unwrap();
//! assert!(sector.iter().all(|&b| b == 0));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod device;
mod error;
mod file;
mod memory;

pub use device::{BlockDevice, Geometry};
pub use error::{DeviceError, DeviceResult};
pub use file::ImageDevice;
pub use memory::MemDevice;
