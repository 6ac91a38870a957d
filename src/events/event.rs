//! Event payloads

use crate::session::DumpSnapshot;
use std::fmt;
use std::sync::Arc;

/// The set of things a session can announce.
///
/// Each variant carries its own payload; subscribers register against the
/// payload-free `Topic` of the variant they care about.
#[derive(Clone, Debug)]
pub enum Event {
    /// The address space cursor was set.
    ///
    /// Sent after every cursor update, including ones that leave the cursor
    /// where it was, so that views can refresh unconditionally.
    AddressChanged { cursor: u64 },

    /// A dump finished analysis and its snapshot is now current.
    AnalysisCompleted(Arc<DumpSnapshot>),

    /// The analyzer rejected the most recently loaded dump.
    AnalysisFailed { generation: u64, message: String },
}

/// Discriminant of an `Event`, used as the subscription key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Topic {
    AddressChanged,
    AnalysisCompleted,
    AnalysisFailed,
}

impl Topic {
    /// Enumerate every topic the bus knows about.
    pub fn enumerate() -> [Topic; 3] {
        [
            Topic::AddressChanged,
            Topic::AnalysisCompleted,
            Topic::AnalysisFailed,
        ]
    }
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::AddressChanged { .. } => Topic::AddressChanged,
            Event::AnalysisCompleted(_) => Topic::AnalysisCompleted,
            Event::AnalysisFailed { .. } => Topic::AnalysisFailed,
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Topic::AddressChanged => write!(f, "address-changed"),
            Topic::AnalysisCompleted => write!(f, "analysis-completed"),
            Topic::AnalysisFailed => write!(f, "analysis-failed"),
        }
    }
}
