//! Plain-text overview of an analysis report

use crate::analyzer::AnalysisReport;
use std::fmt;

/// Displays the header, exception, threads, and captured ranges of a report.
pub struct AnalysisSummary<'a> {
    report: &'a AnalysisReport,
}

impl<'a> AnalysisSummary<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        AnalysisSummary { report }
    }
}

impl<'a> fmt::Display for AnalysisSummary<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.report;

        writeln!(f, "Minidump")?;
        writeln!(f, "  Header Signature: {}", report.magic)?;
        writeln!(f, "  Data Size: {}", report.bytelen)?;

        if let Some(record) = &report.exception_record {
            writeln!(f, "  Exception Record:")?;
            writeln!(f, "    Thread[{}]", record.thread_id)?;
            if let Some(code) = record.exception.code {
                writeln!(f, "    Code[{:08x}]", code)?;
            }
            writeln!(f, "    FaultAddress[{:012x}]", record.exception.address)?;
        }

        writeln!(f, "Thread List")?;
        for thread in report.thread_list.iter() {
            write!(f, "  Thread[{:>5}]", thread.thread_id)?;
            match thread.instruction_pointer() {
                Some(ip) => writeln!(f, " IP[{:012x}]", ip)?,
                None => writeln!(f, " IP[????????????]")?,
            }
        }

        let mut extents = report.extents();
        extents.sort_by_key(|e| e.start_address);

        writeln!(f, "Memory Dump Ranges")?;
        for extent in extents.iter() {
            if let Some(last) = extent.last_address() {
                writeln!(f, "  {:012x} - {:012x}", extent.start_address, last)?;
            }
        }

        Ok(())
    }
}
