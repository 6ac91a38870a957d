//! Error type for the address space model

use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Navigation input was blank.
    #[error("no address given")]
    EmptyAddress,

    /// Navigation input contained something other than hexadecimal digits.
    #[error("`{0}` is not a hexadecimal address")]
    InvalidAddress(String),

    /// Navigation input parsed, but lies outside the addressable space.
    #[error("address {0:#x} is beyond the end of the address space")]
    AddressOutOfRange(u64),

    /// A window must show at least one row.
    #[error("the view window must contain at least one row")]
    EmptyWindow,

    /// The window does not fit inside the address space.
    #[error("a window of {rows} rows does not fit in the address space")]
    WindowTooLarge { rows: usize },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidInput, err)
    }
}

pub type Result<T> = result::Result<T, Error>;
