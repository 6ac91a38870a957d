//! Dump analyzers, their reports, and the queue they run on

mod command;
mod error;
mod external;
mod file;
mod process;
mod report;
mod response;
mod summary;
mod traits;

pub use command::Command;
pub use error::{Error as AnalyzerError, Result};
pub use external::CommandAnalyzer;
pub use file::ReportFileAnalyzer;
pub use process::start_analysis_queue;
pub use report::{
    AllocationRecord, AnalysisReport, ExceptionRecord, MemoryInfoRecord, ModuleRecord,
    RegionRecord, ThreadRecord,
};
pub use response::Response;
pub use summary::AnalysisSummary;
pub use traits::DumpAnalyzer;
