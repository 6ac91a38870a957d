//! Allocations and the regions that partition them

use crate::analyzer::{AllocationRecord, RegionRecord};
use crate::regions::{Protection, RegionState, RegionType};

/// One run of pages within an allocation sharing state, type, and protection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    pub base_address: u64,
    pub size: u64,
    pub protect: Protection,
    pub state: RegionState,
    pub kind: RegionType,
}

impl From<&RegionRecord> for Region {
    fn from(record: &RegionRecord) -> Self {
        Region {
            base_address: record.base_address,
            size: record.region_size,
            protect: Protection::from(record.protect),
            state: RegionState::from(record.state),
            kind: RegionType::from_bits_retain(record.kind),
        }
    }
}

/// One OS-level allocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Allocation {
    pub base_address: u64,
    pub size: u64,

    /// Protection requested when the allocation was made.
    pub initial_protect: Protection,

    /// Name of the module mapped here, for image allocations.
    pub module_name: Option<String>,

    pub regions: Vec<Region>,
}

impl Allocation {
    pub fn end_address(&self) -> u64 {
        self.base_address.saturating_add(self.size)
    }
}

impl From<&AllocationRecord> for Allocation {
    fn from(record: &AllocationRecord) -> Self {
        Allocation {
            base_address: record.allocation_base,
            size: record.allocation_size,
            initial_protect: Protection::from(record.allocation_protect),
            module_name: record.module_name.clone(),
            regions: record.regions.iter().map(Region::from).collect(),
        }
    }
}
