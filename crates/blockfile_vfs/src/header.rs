//! On-device metadata header.
//!
//! The first sector of the device holds a fixed-layout binary header
//! describing the logical database file. The header is the single source
//! of truth for the file size - the adapter never probes the device to
//! derive it.

/// Serialized header length in bytes.
pub const HEADER_LEN: usize = 44;

/// Length of the fixed name field, including the NUL terminator.
pub const NAME_LEN: usize = 32;

/// Header format version written on first-use initialization.
pub const FORMAT_VERSION: u32 = 1;

/// Name given to a freshly initialized database file.
pub const DEFAULT_NAME: &str = "unknown";

/// The metadata header persisted in sector 0 of the device.
///
/// Fixed little-endian layout, zero-padded to a full sector on disk:
///
/// | Bytes  | Field     |
/// |--------|-----------|
/// | 0..4   | `version` |
/// | 4..12  | `size`    |
/// | 12..44 | `name`    |
///
/// A `version` of 0 marks a never-initialized device (fresh devices read
/// as zeroes); [`crate::MetadataStore::load`] normalizes it before the
/// header is ever observed by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileHeader {
    /// Header format version. 0 means "uninitialized".
    pub version: u32,
    /// Logical file size in bytes, as seen by the engine.
    pub size: u64,
    /// Human-readable label, NUL-padded.
    name: [u8; NAME_LEN],
}

impl FileHeader {
    /// Creates an uninitialized header (all fields zero).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if this header has never been initialized.
    #[must_use]
    pub fn is_uninitialized(&self) -> bool {
        self.version == 0
    }

    /// Returns the name field up to its NUL terminator.
    #[must_use]
    pub fn name(&self) -> String {
        let end = self.name.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
        String::from_utf8_lossy(&self.name[..end]).into_owned()
    }

    /// Sets the name field, truncating to fit the fixed 32-byte field
    /// with its NUL terminator.
    pub fn set_name(&mut self, name: &str) {
        let bytes = name.as_bytes();
        let len = bytes.len().min(NAME_LEN - 1);
        self.name = [0; NAME_LEN];
        self.name[..len].copy_from_slice(&bytes[..len]);
    }

    /// Encodes the header into the front of `buf`.
    ///
    /// # Panics
    ///
    /// Panics if `buf` is shorter than [`HEADER_LEN`].
    pub fn encode_into(&self, buf: &mut [u8]) {
        assert!(
            buf.len() >= HEADER_LEN,
            "metadata buffer smaller than header"
        );
        buf[0..4].copy_from_slice(&self.version.to_le_bytes());
        buf[4..12].copy_from_slice(&self.size.to_le_bytes());
        buf[12..HEADER_LEN].copy_from_slice(&self.name);
    }

    /// Encodes the header into a full zero-padded sector buffer.
    ///
    /// # Panics
    ///
    /// Panics if `sector_size` is smaller than [`HEADER_LEN`].
    #[must_use]
    pub fn encode_sector(&self, sector_size: usize) -> Vec<u8> {
        let mut buf = vec![0u8; sector_size];
        self.encode_into(&mut buf);
        buf
    }

    /// Decodes a header from the front of a sector buffer.
    ///
    /// # Panics
    ///
    /// Panics if `data` is shorter than [`HEADER_LEN`].
    #[must_use]
    pub fn decode(data: &[u8]) -> Self {
        assert!(
            data.len() >= HEADER_LEN,
            "metadata buffer smaller than header"
        );

        let version = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let size = u64::from_le_bytes([
            data[4], data[5], data[6], data[7], data[8], data[9], data[10], data[11],
        ]);

        let mut name = [0u8; NAME_LEN];
        name.copy_from_slice(&data[12..HEADER_LEN]);

        Self {
            version,
            size,
            name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_header_is_uninitialized() {
        let header = FileHeader::new();
        assert!(header.is_uninitialized());
        assert_eq!(header.size, 0);
        assert_eq!(header.name(), "");
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut header = FileHeader::new();
        header.version = 3;
        header.size = 0xdead_beef_0042;
        header.set_name("test.db");

        let sector = header.encode_sector(512);
        assert_eq!(sector.len(), 512);

        let decoded = FileHeader::decode(&sector);
        assert_eq!(decoded, header);
        assert_eq!(decoded.name(), "test.db");
    }

    #[test]
    fn encode_layout_is_little_endian() {
        let mut header = FileHeader::new();
        header.version = 1;
        header.size = 0x0102_0304;
        header.set_name("a");

        let sector = header.encode_sector(64);
        assert_eq!(&sector[0..4], &[1, 0, 0, 0]);
        assert_eq!(&sector[4..12], &[4, 3, 2, 1, 0, 0, 0, 0]);
        assert_eq!(sector[12], b'a');
        assert!(sector[13..44].iter().all(|&b| b == 0));
        // Padding beyond the header is zero
        assert!(sector[44..].iter().all(|&b| b == 0));
    }

    #[test]
    fn name_truncated_to_field_width() {
        let mut header = FileHeader::new();
        let long = "x".repeat(100);
        header.set_name(&long);

        // 31 bytes of name, one byte of terminator
        assert_eq!(header.name().len(), NAME_LEN - 1);
        assert_eq!(header.name(), "x".repeat(NAME_LEN - 1));
    }

    #[test]
    fn set_name_clears_previous_value() {
        let mut header = FileHeader::new();
        header.set_name("a-fairly-long-label");
        header.set_name("db");
        assert_eq!(header.name(), "db");
    }

    #[test]
    fn zeroed_sector_decodes_as_uninitialized() {
        let header = FileHeader::decode(&[0u8; 512]);
        assert!(header.is_uninitialized());
        assert_eq!(header.size, 0);
        assert_eq!(header.name(), "");
    }

    #[test]
    #[should_panic(expected = "metadata buffer smaller than header")]
    fn decode_short_buffer_panics() {
        let _ = FileHeader::decode(&[0u8; 16]);
    }
}
