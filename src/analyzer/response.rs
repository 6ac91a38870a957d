//! Analysis queue response type

use crate::analyzer::{AnalysisReport, Result};
use std::sync::Arc;

/// A response to a queue command.
pub enum Response {
    /// Result of analyzing a dump.
    Analyzed {
        /// The generation given in the `Analyze` command.
        generation: u64,

        /// The bytes that were analyzed.
        dump: Arc<[u8]>,

        /// The analyzer's report, or why there is none.
        result: Result<AnalysisReport>,
    },

    /// Acknowledges an issued `Fence` command.
    ///
    /// All responses before the `Fence` response originate from commands
    /// before the acknowledged `Fence` command, and all responses after it
    /// from commands after it.
    Fence,
}
