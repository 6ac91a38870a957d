//! Reassembling allocations out of flat region lists

use crate::analyzer::{MemoryInfoRecord, ModuleRecord, RegionRecord};
use crate::regions::{Allocation, Protection, Region, RegionError, Result};
use tracing::{debug, warn};

/// Allocation base reported for address space that belongs to no allocation.
const UNALLOCATED_BASE: u64 = 0;

/// Group a memory info stream into allocations.
///
/// Records must be in ascending address order and must not overlap. Records
/// with an allocation base of zero describe unallocated space and are left
/// out; the classifier recreates that space as gaps. Regions of a single
/// allocation must follow one another without holes.
pub fn group_regions(records: &[MemoryInfoRecord]) -> Result<Vec<Allocation>> {
    let mut allocations: Vec<Allocation> = Vec::new();
    let mut previous_end = 0;

    for info in records {
        if info.base_address < previous_end {
            return Err(RegionError::OutOfOrder {
                address: info.base_address,
                previous_end,
            });
        }
        previous_end = info.base_address.saturating_add(info.region_size);

        if info.allocation_base == UNALLOCATED_BASE {
            continue;
        }

        let starts_new = allocations
            .last()
            .map_or(true, |current| current.base_address != info.allocation_base);

        if starts_new {
            allocations.push(Allocation {
                base_address: info.allocation_base,
                size: 0,
                initial_protect: Protection::from(info.allocation_protect),
                module_name: None,
                regions: Vec::new(),
            });
        }

        let current = match allocations.last_mut() {
            Some(current) => current,
            None => continue,
        };

        let expected = current.end_address();
        if info.base_address != expected {
            return Err(RegionError::Discontiguous {
                allocation_base: current.base_address,
                expected,
                found: info.base_address,
            });
        }

        if Protection::from(info.allocation_protect) != current.initial_protect {
            warn!(
                allocation = current.base_address,
                region = info.base_address,
                "region disagrees with its allocation's initial protection"
            );
        }

        current.size = current.size.saturating_add(info.region_size);
        current.regions.push(Region::from(&RegionRecord::from(info)));
    }

    debug!(
        records = records.len(),
        allocations = allocations.len(),
        "grouped memory info into allocations"
    );

    Ok(allocations)
}

/// Attach module names to the allocations the modules were loaded into.
///
/// `allocations` must be sorted by base address. Names the analyzer already
/// provided are kept.
pub fn annotate_modules(allocations: &mut [Allocation], modules: &[ModuleRecord]) {
    for module in modules {
        let name = match &module.module_name {
            Some(name) => name,
            None => continue,
        };

        match allocations.binary_search_by_key(&module.base_of_image, |a| a.base_address) {
            Ok(index) => {
                let allocation = &mut allocations[index];

                if let Some(size) = module.size_of_image {
                    if size != allocation.size {
                        debug!(
                            module = %name,
                            image_size = size,
                            allocation_size = allocation.size,
                            "module size differs from its allocation"
                        );
                    }
                }

                if allocation.module_name.is_none() {
                    allocation.module_name = Some(name.clone());
                }
            }
            Err(_) => debug!(
                module = %name,
                base = module.base_of_image,
                "module does not start an allocation"
            ),
        }
    }
}
