//! Error type for memory map construction

use std::{io, result};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// A region started before the end of the region listed ahead of it.
    #[error("region at {address:#x} overlaps the previous region ending at {previous_end:#x}")]
    OutOfOrder { address: u64, previous_end: u64 },

    /// A region claims an allocation but does not continue where the
    /// allocation's previous region ended.
    #[error("region at {found:#x} should be at {expected:#x} in allocation {allocation_base:#x}")]
    Discontiguous {
        allocation_base: u64,
        expected: u64,
        found: u64,
    },
}

impl From<Error> for io::Error {
    fn from(err: Error) -> io::Error {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}

pub type Result<T> = result::Result<T, Error>;
