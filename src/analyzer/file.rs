//! Analysis results read from a saved report

use crate::analyzer::{AnalysisReport, DumpAnalyzer, Result};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Serves a previously saved analysis report instead of analyzing the dump.
///
/// Useful for dumps the analyzer has already been run over, and for
/// exercising a session without an analyzer program installed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportFileAnalyzer {
    path: PathBuf,
}

impl ReportFileAnalyzer {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ReportFileAnalyzer { path: path.into() }
    }
}

impl DumpAnalyzer for ReportFileAnalyzer {
    fn analyze(&self, dump: &[u8]) -> Result<AnalysisReport> {
        let report_file = fs::File::open(&self.path)?;
        let report: AnalysisReport = serde_json::from_reader(report_file)?;

        if report.bytelen != dump.len() as u64 {
            warn!(
                report = %self.path.display(),
                reported = report.bytelen,
                actual = dump.len(),
                "saved report was made for a dump of a different size"
            );
        }

        Ok(report)
    }
}
