//! Address space constants and user address input

use crate::memory::{MemoryError, Result};

/// One past the highest addressable byte (48-bit user address space).
pub const ADDRESS_LIMIT: u64 = 0x1_0000_0000_0000;

/// Bytes shown per row of the view.
pub const ROW_STRIDE: u64 = 16;

/// Rows shown by a view unless configured otherwise.
pub const DEFAULT_WINDOW: usize = 20;

/// Parse a user-entered navigation address.
///
/// Addresses are hexadecimal, with or without a `0x` prefix, and may use `_`
/// or `` ` `` to separate digit groups (`7ff6_1234_0000`, `00007ff6`12340000`).
/// Anything that does not name a byte inside the address space is rejected so
/// that it never reaches the cursor.
pub fn parse_address(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = digits.chars().filter(|c| *c != '_' && *c != '`').collect();

    if digits.is_empty() {
        return Err(MemoryError::EmptyAddress);
    }

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(MemoryError::InvalidAddress(trimmed.to_string()));
    }

    // Leading zeroes are common in pasted addresses, only the value matters.
    let significant = digits.trim_start_matches('0');
    if significant.len() > 16 {
        return Err(MemoryError::InvalidAddress(trimmed.to_string()));
    }

    let value = if significant.is_empty() {
        0
    } else {
        u64::from_str_radix(significant, 16)
            .map_err(|_| MemoryError::InvalidAddress(trimmed.to_string()))?
    };

    if value >= ADDRESS_LIMIT {
        return Err(MemoryError::AddressOutOfRange(value));
    }

    Ok(value)
}
