//! A sparse model of a crashed process's virtual address space.
//!
//! Only a small fraction of the address space is ever backed by captured
//! bytes, so everything here resolves bytes one address at a time and treats
//! "not captured" as an ordinary answer rather than an error.

mod address;
mod error;
mod extent;
mod index;
mod space;

pub use address::{parse_address, ADDRESS_LIMIT, DEFAULT_WINDOW, ROW_STRIDE};
pub use error::{Error as MemoryError, Result};
pub use extent::{CapturedByte, MemoryExtent};
pub use index::RangeIndex;
pub use space::{AddressSpace, Row};

#[cfg(test)]
mod tests;
