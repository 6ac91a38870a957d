//! Human-readable region sizes

const UNITS: [&str; 5] = ["kB", "MB", "GB", "TB", "EB"];

/// Largest scaled value printed before moving on to the next unit.
const UNIT_CEILING: f64 = 10000.0;

/// Format a region size the way the memory map prints it.
///
/// Region sizes are whole pages. Anything else is shown as
/// `BAD_SIZE[<bytes>]` so that the bogus record is still visible. Page-aligned
/// sizes are scaled by 1024 until they drop below 10000, and printed with no
/// decimals.
pub fn format_size(size: u64) -> String {
    if size & 0xFFF != 0 {
        return format!("BAD_SIZE[{}]", size);
    }

    let mut scaled = size as f64 / 1024.0;
    let mut unit = 0;

    while scaled >= UNIT_CEILING && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    format!("{}{}", scaled.round() as u64, UNITS[unit])
}
