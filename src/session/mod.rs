//! Viewing sessions over analyzed dumps

mod context;
mod error;
mod snapshot;

pub use context::Session;
pub use error::{Error as SessionError, Result};
pub use snapshot::DumpSnapshot;
