//! Analyzer traits

use crate::analyzer::{AnalysisReport, Result};

/// Anything that can turn the raw bytes of a dump into a structured report.
///
/// Analyzers run on the analysis queue's worker thread, so they must be
/// `Send`. A single analyzer instance serves every dump a session loads.
pub trait DumpAnalyzer: Send {
    fn analyze(&self, dump: &[u8]) -> Result<AnalysisReport>;
}

impl<F> DumpAnalyzer for F
where
    F: Fn(&[u8]) -> Result<AnalysisReport> + Send,
{
    fn analyze(&self, dump: &[u8]) -> Result<AnalysisReport> {
        self(dump)
    }
}
