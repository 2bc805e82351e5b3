//! Disk-image block device.

use crate::device::{BlockDevice, Geometry};
use crate::error::{DeviceError, DeviceResult};
use parking_lot::RwLock;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// A block device backed by a disk-image file.
///
/// The image file is treated as a flat array of sectors. Its length is
/// fixed when the device is created; geometry never changes while the
/// device is attached.
///
/// # Thread Safety
///
/// This device is thread-safe and can be shared across threads.
/// Internal locking ensures consistent access.
///
/// # Example
///
/// ```no_run
/// use blockfile_device::{BlockDevice, ImageDevice};
/// use std::path::Path;
///
/// let device = ImageDevice::create(Path::new("disk.img"), 512, 1024).unwrap();
/// let sector = device.read_sectors(0, 512).unwrap();
/// ```
#[derive(Debug)]
pub struct ImageDevice {
    path: PathBuf,
    geometry: Geometry,
    file: RwLock<File>,
}

impl ImageDevice {
    /// Creates a new zero-filled image of `sector_count` sectors.
    ///
    /// An existing file at `path` is truncated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or sized.
    pub fn create(path: &Path, sector_size: usize, sector_count: u64) -> DeviceResult<Self> {
        let geometry = Geometry::new(sector_size, sector_count);

        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        file.set_len(geometry.capacity())?;

        Ok(Self {
            path: path.to_path_buf(),
            geometry,
            file: RwLock::new(file),
        })
    }

    /// Opens an existing image file.
    ///
    /// The sector count is derived from the image length, which must be a
    /// whole number of sectors.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its length is not
    /// a multiple of `sector_size`.
    pub fn open(path: &Path, sector_size: usize) -> DeviceResult<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;

        let len = file.metadata()?.len();
        if len % sector_size as u64 != 0 {
            return Err(DeviceError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "image length {} is not a multiple of sector size {}",
                    len, sector_size
                ),
            )));
        }

        Ok(Self {
            path: path.to_path_buf(),
            geometry: Geometry::new(sector_size, len / sector_size as u64),
            file: RwLock::new(file),
        })
    }

    /// Returns the path to the underlying image file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BlockDevice for ImageDevice {
    fn geometry(&self) -> Geometry {
        self.geometry
    }

    fn read_sectors(&self, offset: u64, len: usize) -> DeviceResult<Vec<u8>> {
        self.geometry.check_transfer(offset, len)?;

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;

        let mut buffer = vec![0u8; len];
        file.read_exact(&mut buffer)?;

        Ok(buffer)
    }

    fn write_sectors(&self, offset: u64, data: &[u8]) -> DeviceResult<()> {
        self.geometry.check_transfer(offset, data.len())?;

        let mut file = self.file.write();
        file.seek(SeekFrom::Start(offset))?;
        file.write_all(data)?;

        Ok(())
    }
}
