//! Byte lookup over a sparse list of captured extents

use crate::memory::{CapturedByte, MemoryExtent};
use std::convert::TryFrom;
use std::sync::Arc;

/// Answers "what byte, if any, was captured at this address".
///
/// The extent list is kept sorted by start address, highest first, so that
/// resolving an address is a predecessor search. Producers may hand us
/// overlapping extents; they are not merged, and lookups always resolve to
/// the extent with the highest start at or below the address.
#[derive(Clone, Debug, Default)]
pub struct RangeIndex {
    /// Captured extents, sorted by descending `start_address`.
    extents: Vec<MemoryExtent>,

    /// The raw dump the extents point into.
    ///
    /// `None` means no dump is loaded, in which case every byte is unknown.
    image: Option<Arc<[u8]>>,
}

impl RangeIndex {
    /// An index with no image loaded.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index over a captured image.
    ///
    /// The extents may arrive in any order. Extents sharing a start address
    /// keep the order the producer gave them in, and the first one wins.
    pub fn new(mut extents: Vec<MemoryExtent>, image: Arc<[u8]>) -> Self {
        // `sort_by` is stable, which is what makes the tie-break deterministic.
        extents.sort_by(|a, b| b.start_address.cmp(&a.start_address));

        RangeIndex {
            extents,
            image: Some(image),
        }
    }

    /// All extents, highest start address first.
    pub fn extents(&self) -> &[MemoryExtent] {
        &self.extents
    }

    /// Find the extent with the greatest start address at or below `address`.
    ///
    /// The returned extent does not necessarily contain `address`; it may end
    /// before it.
    pub fn find_extent(&self, address: u64) -> Option<&MemoryExtent> {
        let first_candidate = self
            .extents
            .partition_point(|extent| extent.start_address > address);

        self.extents.get(first_candidate)
    }

    /// Resolve a single byte of the address space.
    pub fn read_byte(&self, address: u64) -> CapturedByte {
        let image = match &self.image {
            Some(image) => image,
            None => return CapturedByte::Unknown,
        };

        let extent = match self.find_extent(address) {
            Some(extent) if extent.contains(address) => extent,
            _ => return CapturedByte::Unknown,
        };

        extent
            .source_offset
            .checked_add(address - extent.start_address)
            .and_then(|offset| usize::try_from(offset).ok())
            .and_then(|offset| image.get(offset).copied())
            .into()
    }

    /// Resolve `count` consecutive bytes starting at `address`.
    ///
    /// Each byte is resolved independently, so a read may cross from one
    /// extent into another or into uncaptured space.
    pub fn read(&self, address: u64, count: usize) -> Vec<CapturedByte> {
        (0..count as u64)
            .map(|i| match address.checked_add(i) {
                Some(address) => self.read_byte(address),
                None => CapturedByte::Unknown,
            })
            .collect()
    }
}
