//! Error type for configuration loading

use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Underlying cause of error is I/O related
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configuration file is not valid JSON, or has unknown values
    #[error("invalid configuration file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0:?} is not a valid window height")]
    InvalidWindow(String),

    #[error("{0:?} is not a log format; expected \"text\" or \"json\"")]
    UnknownLogFormat(String),

    /// Neither an analyzer program nor a saved report was configured
    #[error("no analyzer configured; pass --analyzer or --report")]
    NoAnalyzer,
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        match err {
            Error::Io(e) => e,
            Error::NoAnalyzer => io::Error::new(io::ErrorKind::NotFound, format!("{}", err)),
            _ => io::Error::new(io::ErrorKind::InvalidInput, format!("{}", err)),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
