//! Everything known about one analyzed dump

use crate::analyzer::{AnalysisReport, ExceptionRecord, ModuleRecord, ThreadRecord};
use crate::memory::RangeIndex;
use crate::regions::{self, classify, Allocation, MemoryMap};
use std::sync::Arc;

/// The result of analyzing one dump, combined with the dump's bytes.
///
/// Snapshots are built in one step and never modified afterwards; a newer
/// dump replaces the whole snapshot.
#[derive(Debug)]
pub struct DumpSnapshot {
    /// The load this snapshot answers.
    pub generation: u64,

    pub magic: String,
    pub bytelen: u64,
    pub modules: Vec<ModuleRecord>,
    pub threads: Vec<ThreadRecord>,
    pub exception: Option<ExceptionRecord>,

    /// Captured bytes, addressable by virtual address.
    pub ranges: RangeIndex,

    pub allocations: Vec<Allocation>,
    pub map: MemoryMap,
}

impl DumpSnapshot {
    pub fn from_report(
        generation: u64,
        report: AnalysisReport,
        dump: Arc<[u8]>,
    ) -> regions::Result<Self> {
        let allocations = report.allocations()?;
        let map = classify(&allocations);
        let ranges = RangeIndex::new(report.extents(), dump);

        Ok(DumpSnapshot {
            generation,
            magic: report.magic,
            bytelen: report.bytelen,
            modules: report.module_info,
            threads: report.thread_list,
            exception: report.exception_record,
            ranges,
            allocations,
            map,
        })
    }

    /// Address of the faulting instruction, if the dump recorded a crash.
    pub fn fault_address(&self) -> Option<u64> {
        self.exception
            .as_ref()
            .map(|record| record.exception.address)
    }
}
