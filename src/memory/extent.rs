//! Captured spans of memory

use serde::{Deserialize, Serialize};
use std::fmt;

/// A contiguous span of the address space whose bytes were captured.
///
/// `source_offset` locates the first byte of the span inside the raw dump.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MemoryExtent {
    pub start_address: u64,
    pub length: u64,
    pub source_offset: u64,
}

impl MemoryExtent {
    pub fn new(start_address: u64, length: u64, source_offset: u64) -> Self {
        MemoryExtent {
            start_address,
            length,
            source_offset,
        }
    }

    /// The last captured address, or `None` for an empty extent.
    pub fn last_address(&self) -> Option<u64> {
        self.length
            .checked_sub(1)
            .map(|len| self.start_address.saturating_add(len))
    }

    pub fn contains(&self, address: u64) -> bool {
        address >= self.start_address && address - self.start_address < self.length
    }
}

/// The value of one byte of the address space, as far as the dump knows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CapturedByte {
    /// The byte was captured with this value.
    Known(u8),

    /// No captured extent covers this address.
    Unknown,
}

impl From<Option<u8>> for CapturedByte {
    fn from(value: Option<u8>) -> Self {
        value.map_or(CapturedByte::Unknown, CapturedByte::Known)
    }
}

impl fmt::Display for CapturedByte {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapturedByte::Known(v) => write!(f, "{:02X}", v),
            CapturedByte::Unknown => write!(f, "??"),
        }
    }
}
