//! Turns an analyzer's allocation records into a labeled memory map.

mod classify;
mod error;
mod flags;
mod group;
mod model;
mod size;

pub use classify::{classify, MapEntry, MemoryMap};
pub use error::{Error as RegionError, Result};
pub use flags::{Protection, RegionState, RegionType};
pub use group::{annotate_modules, group_regions};
pub use model::{Allocation, Region};
pub use size::format_size;
