//! Decoded state, type, and protection flags of a memory region.
//!
//! The raw values are the Windows `MEM_*` and `PAGE_*` constants reported in
//! the minidump memory info stream. They are decoded once, when a `Region` is
//! built, so nothing downstream re-tests raw integers.

use bitflags::bitflags;
use std::fmt;

const MEM_COMMIT: u32 = 0x1000;
const MEM_RESERVE: u32 = 0x2000;
const MEM_FREE: u32 = 0x10000;

/// Allocation state of a region. Exactly one state applies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionState {
    Commit,
    Reserve,
    Free,

    /// Anything other than exactly one known state bit.
    Unknown(u32),
}

impl From<u32> for RegionState {
    fn from(raw: u32) -> Self {
        match raw {
            MEM_COMMIT => RegionState::Commit,
            MEM_RESERVE => RegionState::Reserve,
            MEM_FREE => RegionState::Free,
            other => RegionState::Unknown(other),
        }
    }
}

impl fmt::Display for RegionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            RegionState::Commit => "commit",
            RegionState::Reserve => "reserve",
            RegionState::Free => "free",
            RegionState::Unknown(_) => "unknown",
        })
    }
}

bitflags! {
    /// Backing type of a region. Unlisted bits are retained as-is.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct RegionType: u32 {
        const PRIVATE = 0x0002_0000;
        const MAPPED = 0x0004_0000;
        const IMAGE = 0x0100_0000;
    }
}

impl RegionType {
    pub fn is_image(self) -> bool {
        self.contains(RegionType::IMAGE)
    }
}

impl fmt::Display for RegionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = if self.is_image() {
            "image"
        } else if self.contains(RegionType::MAPPED) {
            "mapped"
        } else if self.contains(RegionType::PRIVATE) {
            "private"
        } else {
            ""
        };

        f.pad(label)
    }
}

/// The access mode selected by the low byte of a protection value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BaseProtection {
    Unspecified,
    NoAccess,
    ReadOnly,
    ReadWrite,
    WriteCopy,
    Execute,
    ExecuteRead,
    ExecuteReadWrite,
    ExecuteWriteCopy,
}

impl BaseProtection {
    fn from_bit(bit: u8) -> Option<Self> {
        match bit {
            0x00 => Some(BaseProtection::Unspecified),
            0x01 => Some(BaseProtection::NoAccess),
            0x02 => Some(BaseProtection::ReadOnly),
            0x04 => Some(BaseProtection::ReadWrite),
            0x08 => Some(BaseProtection::WriteCopy),
            0x10 => Some(BaseProtection::Execute),
            0x20 => Some(BaseProtection::ExecuteRead),
            0x40 => Some(BaseProtection::ExecuteReadWrite),
            0x80 => Some(BaseProtection::ExecuteWriteCopy),
            _ => None,
        }
    }

    /// Decode the low byte of a protection value.
    ///
    /// Valid values have at most one bit set. When more than one is set, the
    /// lowest one selects the mode and the others are dropped.
    pub fn from_low_byte(low: u8) -> Self {
        Self::from_bit(low)
            .or_else(|| Self::from_bit(low & low.wrapping_neg()))
            .unwrap_or(BaseProtection::Unspecified)
    }

    pub fn label(self) -> &'static str {
        match self {
            BaseProtection::Unspecified => "",
            BaseProtection::NoAccess => "NA",
            BaseProtection::ReadOnly => "RO",
            BaseProtection::ReadWrite => "RW",
            BaseProtection::WriteCopy => "CW",
            BaseProtection::Execute => "EX",
            BaseProtection::ExecuteRead => "EX+RD",
            BaseProtection::ExecuteReadWrite => "EX+RW",
            BaseProtection::ExecuteWriteCopy => "EX+CW",
        }
    }
}

bitflags! {
    /// Page attributes that may accompany any base protection.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct ProtectModifiers: u32 {
        const GUARD = 0x100;
        const NOCACHE = 0x200;
        const WRITECOMBINE = 0x400;
    }
}

/// Bits of a protection value covered by the base mode and the modifiers.
const PROTECT_KNOWN_MASK: u32 = 0x7FF;

/// A decoded page protection value.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Protection {
    pub base: BaseProtection,
    pub modifiers: ProtectModifiers,

    /// Set bits above `0x7FF`, kept verbatim.
    pub other: u32,
}

impl From<u32> for Protection {
    fn from(raw: u32) -> Self {
        Protection {
            base: BaseProtection::from_low_byte((raw & 0xFF) as u8),
            modifiers: ProtectModifiers::from_bits_truncate(raw),
            other: raw & !PROTECT_KNOWN_MASK,
        }
    }
}

impl fmt::Display for Protection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.base.label())?;

        if self.modifiers.contains(ProtectModifiers::GUARD) {
            write!(f, "+PG")?;
        }
        if self.modifiers.contains(ProtectModifiers::NOCACHE) {
            write!(f, "+NC")?;
        }
        if self.modifiers.contains(ProtectModifiers::WRITECOMBINE) {
            write!(f, "+WC")?;
        }

        if self.other != 0 {
            write!(f, "+{}", self.other)?;
        }

        Ok(())
    }
}
