//! Error type for dump analysis

use crate::regions::RegionError;
use std::process::ExitStatus;
use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The analyzer's output was not a valid report
    #[error("malformed analysis report: {0}")]
    Json(#[from] serde_json::Error),

    /// The analyzer process ran but reported failure
    #[error("analyzer exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    /// The report's memory map could not be assembled
    #[error("inconsistent memory map: {0}")]
    Regions(#[from] RegionError),
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::Regions(e) => e.into(),
            Error::Json(e) => io::Error::new(io::ErrorKind::InvalidData, e),
            _ => io::Error::new(io::ErrorKind::Other, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
