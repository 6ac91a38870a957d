//! The navigable window over the address space

use crate::events::{Event, EventBus};
use crate::memory::{CapturedByte, MemoryError, RangeIndex, Result, ADDRESS_LIMIT, ROW_STRIDE};
use std::fmt;
use tracing::debug;

/// One displayed row of the view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub address: u64,
    pub bytes: Vec<CapturedByte>,
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:012X} ", self.address)?;

        for byte in self.bytes.iter() {
            write!(f, " {}", byte)?;
        }

        Ok(())
    }
}

/// A cursor and a fixed-height window of rows over the address space.
///
/// The window always lies entirely inside `[0, limit)`: every cursor update
/// is clamped so that `cursor + window * stride <= limit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressSpace {
    /// Address shown on the first row.
    cursor: u64,

    /// Bytes per row.
    stride: u64,

    /// Number of rows in the window.
    window: usize,

    /// One past the highest addressable byte.
    limit: u64,
}

impl AddressSpace {
    /// Create a view of `window` rows with the cursor at address zero.
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(MemoryError::EmptyWindow);
        }

        let span = (window as u64)
            .checked_mul(ROW_STRIDE)
            .filter(|span| *span <= ADDRESS_LIMIT)
            .ok_or(MemoryError::WindowTooLarge { rows: window })?;

        debug!(window, span, "created address space view");

        Ok(AddressSpace {
            cursor: 0,
            stride: ROW_STRIDE,
            window,
            limit: ADDRESS_LIMIT,
        })
    }

    pub fn cursor(&self) -> u64 {
        self.cursor
    }

    pub fn stride(&self) -> u64 {
        self.stride
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of bytes covered by the whole window.
    fn span(&self) -> u64 {
        self.window as u64 * self.stride
    }

    /// Move the view so that row `anchor_row` shows `target`.
    ///
    /// The resulting cursor is clamped into the address space, and an
    /// `AddressChanged` event is published whether or not it moved. Returns
    /// the new cursor.
    pub fn set_cursor(&mut self, target: u64, anchor_row: usize, bus: &mut EventBus) -> u64 {
        let anchor = (anchor_row as u64).saturating_mul(self.stride);
        let mut cursor = target.saturating_sub(anchor);

        if cursor > self.limit - self.span() {
            cursor = self.limit - self.span();
        }

        debug!(target, anchor_row, cursor, "set cursor");

        self.cursor = cursor;
        bus.publish(&Event::AddressChanged { cursor });

        cursor
    }

    /// Adopt a cursor another view has already published, without
    /// publishing it again.
    pub fn follow(&mut self, cursor: u64) {
        self.cursor = cursor.min(self.limit - self.span());
    }

    /// Put `fault` in the middle of the window.
    pub fn recenter(&mut self, fault: u64, bus: &mut EventBus) -> u64 {
        self.set_cursor(fault, self.window / 2, bus)
    }

    /// Address shown on row `index`.
    pub fn row_address(&self, index: usize) -> u64 {
        self.cursor
            .saturating_add((index as u64).saturating_mul(self.stride))
    }

    /// Read row `index` of the window out of `ranges`.
    pub fn get_row(&self, index: usize, ranges: &RangeIndex) -> Row {
        let address = self.row_address(index);

        Row {
            address,
            bytes: ranges.read(address, self.stride as usize),
        }
    }

    /// Read every row of the window.
    pub fn rows(&self, ranges: &RangeIndex) -> Vec<Row> {
        (0..self.window).map(|i| self.get_row(i, ranges)).collect()
    }
}
