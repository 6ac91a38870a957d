//! Structured records produced by a dump analyzer.
//!
//! These mirror the JSON an analyzer emits for one dump. Field names follow
//! the minidump stream structures they were extracted from.

use crate::memory::MemoryExtent;
use crate::regions::{self, Allocation};
use serde::{Deserialize, Serialize};

/// Everything an analyzer reports about one dump.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The four-character header signature, e.g. `MDMP`.
    pub magic: String,

    /// Size of the analyzed dump in bytes.
    pub bytelen: u64,

    #[serde(default)]
    pub module_info: Vec<ModuleRecord>,

    #[serde(default)]
    pub memory_info: MemoryInfoList,

    /// The spans of memory actually captured in the dump.
    #[serde(default)]
    pub memory_range: Vec<MemoryRangeRecord>,

    #[serde(default)]
    pub thread_list: Vec<ThreadRecord>,

    #[serde(default)]
    pub exception_record: Option<ExceptionRecord>,

    /// Opaque system description; passed through untouched.
    #[serde(default)]
    pub system_info: Option<serde_json::Value>,
}

impl AnalysisReport {
    /// The captured spans of memory, as extents into the dump.
    pub fn extents(&self) -> Vec<MemoryExtent> {
        self.memory_range.iter().map(MemoryExtent::from).collect()
    }

    /// The memory map as allocations, with module names filled in from the
    /// module list where the analyzer left them out.
    pub fn allocations(&self) -> regions::Result<Vec<Allocation>> {
        let mut allocations = self.memory_info.to_allocations()?;

        allocations.sort_by_key(|a| a.base_address);
        regions::annotate_modules(&mut allocations, &self.module_info);

        Ok(allocations)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModuleRecord {
    pub base_of_image: u64,

    #[serde(default)]
    pub size_of_image: Option<u64>,

    #[serde(default)]
    pub module_name: Option<String>,
}

/// The memory map, in either of the two shapes analyzers emit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MemoryInfoList {
    /// Regions already grouped by the allocation they belong to.
    Allocations(Vec<AllocationRecord>),

    /// One record per region, as they appear in the memory info stream.
    Regions(Vec<MemoryInfoRecord>),
}

impl Default for MemoryInfoList {
    fn default() -> Self {
        MemoryInfoList::Allocations(Vec::new())
    }
}

impl MemoryInfoList {
    pub fn to_allocations(&self) -> regions::Result<Vec<Allocation>> {
        match self {
            MemoryInfoList::Allocations(records) => {
                Ok(records.iter().map(Allocation::from).collect())
            }
            MemoryInfoList::Regions(records) => regions::group_regions(records),
        }
    }
}

/// One allocation and the protection regions that partition it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AllocationRecord {
    pub allocation_base: u64,
    pub allocation_size: u64,

    #[serde(default)]
    pub allocation_protect: u32,

    #[serde(default)]
    pub module_name: Option<String>,

    pub regions: Vec<RegionRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegionRecord {
    pub base_address: u64,
    pub region_size: u64,
    pub state: u32,
    pub protect: u32,

    #[serde(rename = "Type")]
    pub kind: u32,
}

/// A region as listed in the minidump memory info stream.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoryInfoRecord {
    pub base_address: u64,
    pub allocation_base: u64,

    #[serde(default)]
    pub allocation_protect: u32,

    pub region_size: u64,
    pub state: u32,
    pub protect: u32,

    #[serde(rename = "Type")]
    pub kind: u32,
}

impl From<&MemoryInfoRecord> for RegionRecord {
    fn from(info: &MemoryInfoRecord) -> Self {
        RegionRecord {
            base_address: info.base_address,
            region_size: info.region_size,
            state: info.state,
            protect: info.protect,
            kind: info.kind,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MemoryRangeRecord {
    pub address: u64,
    pub location: LocationRecord,
}

/// Where a captured range lives inside the dump file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LocationRecord {
    pub offset: u64,
    pub length: u64,
}

impl From<&MemoryRangeRecord> for MemoryExtent {
    fn from(range: &MemoryRangeRecord) -> Self {
        MemoryExtent::new(range.address, range.location.length, range.location.offset)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThreadRecord {
    pub thread_id: u32,
    pub context: ThreadContext,
}

impl ThreadRecord {
    /// The thread's program counter at the time of the dump.
    pub fn instruction_pointer(&self) -> Option<u64> {
        match self.context.kind {
            ContextKind::X86 => self.context.eip,
            ContextKind::X64 | ContextKind::Other => self.context.rip,
            ContextKind::Missing => None,
        }
    }
}

/// The slice of a thread's register context the viewer cares about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ThreadContext {
    #[serde(rename = "type")]
    pub kind: ContextKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rip: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContextKind {
    #[serde(rename = "X86")]
    X86,

    #[serde(rename = "X64", alias = "AMD64")]
    X64,

    /// The thread's context could not be read from the dump.
    #[serde(rename = "None")]
    Missing,

    #[serde(other)]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionRecord {
    pub thread_id: u32,
    pub exception: ExceptionDetail,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExceptionDetail {
    #[serde(default, alias = "ExceptionCode")]
    pub code: Option<u32>,

    pub address: u64,
}
