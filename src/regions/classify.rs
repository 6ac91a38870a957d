//! Gap-aware memory map construction

use crate::regions::{format_size, Allocation, RegionState, RegionType};
use std::fmt;
use tracing::debug;

/// Gaps smaller than this start out collapsed.
pub const COLLAPSE_THRESHOLD: u64 = 1024 * 1024;

/// Address space between two allocations that belongs to neither.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GapEntry {
    pub base: u64,
    pub size: u64,
    pub size_label: String,
    pub collapsed: bool,
}

/// One region of an allocation, ready to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegionEntry {
    pub base: u64,
    pub size: u64,
    pub size_label: String,
    pub protect_label: String,
    pub state: RegionState,
    pub kind: RegionType,

    /// Module name, shown on the first region of an image allocation.
    pub module: Option<String>,
}

/// One allocation and its regions, ready to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AllocationEntry {
    pub base: u64,
    pub size: u64,
    pub size_label: String,
    pub module_name: Option<String>,
    pub collapsed: bool,
    pub regions: Vec<RegionEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapEntry {
    Gap(GapEntry),
    Allocation(AllocationEntry),
}

impl MapEntry {
    pub fn base(&self) -> u64 {
        match self {
            MapEntry::Gap(gap) => gap.base,
            MapEntry::Allocation(alloc) => alloc.base,
        }
    }

    pub fn size(&self) -> u64 {
        match self {
            MapEntry::Gap(gap) => gap.size,
            MapEntry::Allocation(alloc) => alloc.size,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        match self {
            MapEntry::Gap(gap) => gap.collapsed,
            MapEntry::Allocation(alloc) => alloc.collapsed,
        }
    }
}

/// The classified memory map of a dump.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryMap {
    entries: Vec<MapEntry>,
}

impl MemoryMap {
    pub fn entries(&self) -> &[MapEntry] {
        &self.entries
    }

    /// Find the entry covering an address.
    pub fn entry_at(&self, address: u64) -> Option<&MapEntry> {
        let index = self.entries.partition_point(|e| e.base() <= address);

        index
            .checked_sub(1)
            .and_then(|i| self.entries.get(i))
            .filter(|e| address - e.base() < e.size())
    }
}

fn classify_allocation(allocation: &Allocation) -> AllocationEntry {
    let regions = allocation
        .regions
        .iter()
        .map(|region| RegionEntry {
            base: region.base_address,
            size: region.size,
            size_label: format_size(region.size),
            protect_label: region.protect.to_string(),
            state: region.state,
            kind: region.kind,
            module: if region.kind.is_image() && region.base_address == allocation.base_address {
                allocation.module_name.clone()
            } else {
                None
            },
        })
        .collect();

    AllocationEntry {
        base: allocation.base_address,
        size: allocation.size,
        size_label: format_size(allocation.size),
        module_name: allocation.module_name.clone(),
        collapsed: false,
        regions,
    }
}

/// Build the display map of a list of allocations.
///
/// Allocations are walked in ascending order of base address. Unallocated
/// space before each allocation becomes a gap entry; the end of the previous
/// allocation (starting at address zero) is where each gap begins.
pub fn classify(allocations: &[Allocation]) -> MemoryMap {
    let mut ordered: Vec<&Allocation> = allocations.iter().collect();
    ordered.sort_by_key(|a| a.base_address);

    let mut entries = Vec::with_capacity(ordered.len() * 2);
    let mut prev_limit = 0;

    for allocation in ordered {
        if allocation.base_address > prev_limit {
            let size = allocation.base_address - prev_limit;

            entries.push(MapEntry::Gap(GapEntry {
                base: prev_limit,
                size,
                size_label: format_size(size),
                collapsed: size < COLLAPSE_THRESHOLD,
            }));
        }

        entries.push(MapEntry::Allocation(classify_allocation(allocation)));
        prev_limit = allocation.end_address();
    }

    debug!(
        allocations = allocations.len(),
        entries = entries.len(),
        "classified memory map"
    );

    MemoryMap { entries }
}

impl fmt::Display for MemoryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in self.entries() {
            let toggle = if entry.is_collapsed() { '+' } else { '-' };

            match entry {
                MapEntry::Gap(gap) => {
                    writeln!(
                        f,
                        "[{}] {:012x} {:>6} free",
                        toggle, gap.base, gap.size_label
                    )?;
                }
                MapEntry::Allocation(alloc) => {
                    write!(
                        f,
                        "[{}] {:012x} {:>6}",
                        toggle, alloc.base, alloc.size_label
                    )?;
                    if let Some(name) = &alloc.module_name {
                        write!(f, " {}", name)?;
                    }
                    writeln!(f)?;

                    if alloc.collapsed {
                        continue;
                    }

                    for region in alloc.regions.iter() {
                        write!(
                            f,
                            "      {:012x} {:>6} {:<8} {:<7} {}",
                            region.base,
                            region.size_label,
                            region.protect_label,
                            region.state,
                            region.kind
                        )?;
                        if let Some(module) = &region.module {
                            write!(f, " {}", module)?;
                        }
                        writeln!(f)?;
                    }
                }
            }
        }

        Ok(())
    }
}
