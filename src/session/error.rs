//! Error type for viewing sessions

use crate::analyzer::AnalyzerError;
use crate::memory::MemoryError;
use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A navigation request could not be carried out
    #[error(transparent)]
    Memory(#[from] MemoryError),

    /// The analyzer could not be reached or started
    #[error(transparent)]
    Analyzer(#[from] AnalyzerError),

    /// The analysis queue stopped answering
    #[error("analysis queue has shut down")]
    QueueClosed,
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Memory(e) => e.into(),
            Error::Analyzer(e) => e.into(),
            Error::QueueClosed => {
                io::Error::new(io::ErrorKind::BrokenPipe, format!("{}", err))
            }
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
