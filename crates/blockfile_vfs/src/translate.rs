//! Byte-range to sector-run translation.
//!
//! The engine issues byte-addressed reads; the device only accepts whole
//! sectors. [`translate`] computes the contiguous sector run covering a
//! requested byte range, skipping the reserved metadata sector.

/// A contiguous run of data sectors covering a requested byte range.
///
/// Produced by [`translate`]. `skip` is the byte offset of the requested
/// range within the fetched run; after reading
/// [`device_len`](Self::device_len) bytes at
/// [`device_offset`](Self::device_offset), the caller copies the requested
/// length starting at `skip`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectorRange {
    /// First device sector of the run. Sector 0 is reserved for metadata,
    /// so this is always at least 1.
    pub start_sector: u64,
    /// Number of sectors in the run.
    pub sector_count: u64,
    /// Byte offset of the requested range within the fetched run.
    pub skip: usize,
    /// Sector size used to compute the run.
    pub sector_size: usize,
}

impl SectorRange {
    /// Device byte offset of the run. Always a multiple of the sector size
    /// and never inside sector 0.
    #[must_use]
    pub fn device_offset(&self) -> u64 {
        self.start_sector * self.sector_size as u64
    }

    /// Device transfer length in bytes. Always a whole number of sectors.
    #[must_use]
    pub fn device_len(&self) -> usize {
        (self.sector_count as usize) * self.sector_size
    }
}

/// Computes the sector run covering `len` bytes at logical offset `offset`.
///
/// Logical offset 0 maps to the start of sector 1; sector 0 holds the
/// metadata header and is never part of file data.
///
/// The sector count carries a fixed `+1` term, so a request whose start
/// and end are both sector-aligned still fetches one sector beyond the
/// minimum. This conservative over-read is long-standing behavior that
/// callers may rely on; it is kept as is rather than tightened to the
/// minimal count.
#[must_use]
pub fn translate(offset: u64, len: usize, sector_size: usize) -> SectorRange {
    let sector_size_u64 = sector_size as u64;

    let skip = (offset % sector_size_u64) as usize;
    let start_sector = 1 + offset / sector_size_u64;
    let sector_count = 1 + (len as u64 + skip as u64) / sector_size_u64;

    SectorRange {
        start_sector,
        sector_count,
        skip,
        sector_size,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sub_sector_read_within_second_data_sector() {
        // Worked example: 100 bytes at offset 600 on a 512-byte-sector device
        let range = translate(600, 100, 512);
        assert_eq!(range.start_sector, 2);
        assert_eq!(range.sector_count, 1);
        assert_eq!(range.skip, 88);
        assert_eq!(range.device_offset(), 1024);
        assert_eq!(range.device_len(), 512);
    }

    #[test]
    fn read_at_offset_zero() {
        let range = translate(0, 100, 512);
        assert_eq!(range.start_sector, 1);
        assert_eq!(range.skip, 0);
        assert_eq!(range.sector_count, 1);
    }

    #[test]
    fn aligned_request_keeps_conservative_extra_sector() {
        // Start and length both sector-aligned: the +1 term still fetches
        // one sector past the minimum. Pinned on purpose.
        let range = translate(512, 512, 512);
        assert_eq!(range.start_sector, 2);
        assert_eq!(range.sector_count, 2);
        assert_eq!(range.skip, 0);
    }

    #[test]
    fn straddling_request_covers_both_sectors() {
        // 200 bytes starting 100 bytes before a sector boundary
        let range = translate(412, 200, 512);
        assert_eq!(range.start_sector, 1);
        assert_eq!(range.skip, 412);
        assert_eq!(range.sector_count, 2);
        assert!(range.skip + 200 <= range.device_len());
    }

    #[test]
    fn large_offset_large_len() {
        let range = translate(1_048_576, 65_536, 4096);
        assert_eq!(range.start_sector, 1 + 256);
        assert_eq!(range.skip, 0);
        assert_eq!(range.sector_count, 17);
        assert_eq!(range.device_offset() % 4096, 0);
    }

    proptest! {
        #[test]
        fn run_is_sector_aligned_and_skips_metadata(
            offset in 0u64..1_000_000_000,
            len in 1usize..1_000_000,
            shift in 0u32..5,
        ) {
            let sector_size = 512usize << shift;
            let range = translate(offset, len, sector_size);

            // Whole-sector transfer, never overlapping sector 0
            prop_assert_eq!(range.device_offset() % sector_size as u64, 0);
            prop_assert_eq!(range.device_len() % sector_size, 0);
            prop_assert!(range.device_offset() >= sector_size as u64);

            // The fetched run covers the requested range
            prop_assert!(range.skip + len <= range.device_len());

            // The first copied byte sits at logical `offset` in the data
            // region, which starts one sector into the device
            prop_assert_eq!(
                range.device_offset() + range.skip as u64,
                sector_size as u64 + offset
            );
        }
    }
}
