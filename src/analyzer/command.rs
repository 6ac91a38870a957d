//! Analysis queue command type

use std::sync::Arc;

/// A request to the analysis queue.
pub enum Command {
    /// Analyze a dump.
    ///
    /// The generation is handed back with the result, so that the requester
    /// can tell which of several outstanding loads a response belongs to.
    Analyze { generation: u64, dump: Arc<[u8]> },

    /// Request a `Fence` response once every earlier command has answered.
    Fence,
}
