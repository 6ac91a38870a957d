use crate::events::{Event, EventBus, Topic};
use crate::memory::{
    parse_address, AddressSpace, CapturedByte, MemoryError, MemoryExtent, RangeIndex,
    ADDRESS_LIMIT, DEFAULT_WINDOW, ROW_STRIDE,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

fn image(len: usize) -> Arc<[u8]> {
    (0..len).map(|i| i as u8).collect::<Vec<u8>>().into()
}

#[test]
fn single_extent_lookup() {
    let ranges = RangeIndex::new(vec![MemoryExtent::new(0x1000, 16, 0)], image(16));

    assert_eq!(ranges.read_byte(0x1000), CapturedByte::Known(0));
    assert_eq!(ranges.read_byte(0x100F), CapturedByte::Known(15));
    assert_eq!(ranges.read_byte(0x1010), CapturedByte::Unknown);
    assert_eq!(ranges.read_byte(0xFFF), CapturedByte::Unknown);
}

#[test]
fn empty_index_is_unknown() {
    let ranges = RangeIndex::empty();

    assert_eq!(ranges.read_byte(0), CapturedByte::Unknown);
    assert!(ranges.find_extent(0x1000).is_none());
}

#[test]
fn find_extent_is_predecessor() {
    let ranges = RangeIndex::new(
        vec![
            MemoryExtent::new(0x1000, 0x10, 0),
            MemoryExtent::new(0x3000, 0x10, 0x10),
            MemoryExtent::new(0x2000, 0x10, 0x20),
        ],
        image(0x30),
    );

    let starts: Vec<u64> = ranges.extents().iter().map(|e| e.start_address).collect();
    assert_eq!(starts, vec![0x3000, 0x2000, 0x1000]);

    assert!(ranges.find_extent(0xFFF).is_none());
    assert_eq!(ranges.find_extent(0x1000).unwrap().start_address, 0x1000);
    assert_eq!(ranges.find_extent(0x1FFF).unwrap().start_address, 0x1000);
    assert_eq!(ranges.find_extent(0x2008).unwrap().start_address, 0x2000);
    assert_eq!(
        ranges.find_extent(0xFFFF_FFFF).unwrap().start_address,
        0x3000
    );
}

#[test]
fn hole_after_extent_is_unknown() {
    let ranges = RangeIndex::new(
        vec![
            MemoryExtent::new(0x1000, 4, 0),
            MemoryExtent::new(0x2000, 4, 4),
        ],
        image(8),
    );

    assert_eq!(ranges.read_byte(0x1003), CapturedByte::Known(3));
    assert_eq!(ranges.read_byte(0x1004), CapturedByte::Unknown);
    assert_eq!(ranges.read_byte(0x1FFF), CapturedByte::Unknown);
    assert_eq!(ranges.read_byte(0x2000), CapturedByte::Known(4));
}

#[test]
fn equal_starts_keep_producer_order() {
    let ranges = RangeIndex::new(
        vec![
            MemoryExtent::new(0x1000, 4, 8),
            MemoryExtent::new(0x1000, 16, 0),
        ],
        image(16),
    );

    let found = ranges.find_extent(0x1000).unwrap();
    assert_eq!(found.source_offset, 8);

    // The winning extent is shorter, so its hole hides the longer one.
    assert_eq!(ranges.read_byte(0x1000), CapturedByte::Known(8));
    assert_eq!(ranges.read_byte(0x1004), CapturedByte::Unknown);
}

#[test]
fn overlapping_extents_resolve_to_highest_start() {
    let ranges = RangeIndex::new(
        vec![
            MemoryExtent::new(0x1000, 0x20, 0),
            MemoryExtent::new(0x1010, 0x4, 0x40),
        ],
        image(0x50),
    );

    assert_eq!(ranges.read_byte(0x100F), CapturedByte::Known(0x0F));
    assert_eq!(ranges.read_byte(0x1010), CapturedByte::Known(0x40));
    assert_eq!(ranges.read_byte(0x1014), CapturedByte::Unknown);
}

#[test]
fn extent_pointing_past_image_is_unknown() {
    let ranges = RangeIndex::new(vec![MemoryExtent::new(0x1000, 16, 12)], image(16));

    assert_eq!(ranges.read_byte(0x1003), CapturedByte::Known(15));
    assert_eq!(ranges.read_byte(0x1004), CapturedByte::Unknown);
}

#[test]
fn read_straddles_extents() {
    let ranges = RangeIndex::new(
        vec![
            MemoryExtent::new(0x1000, 2, 0),
            MemoryExtent::new(0x1003, 1, 5),
        ],
        image(8),
    );

    assert_eq!(
        ranges.read(0xFFF, 6),
        vec![
            CapturedByte::Unknown,
            CapturedByte::Known(0),
            CapturedByte::Known(1),
            CapturedByte::Unknown,
            CapturedByte::Known(5),
            CapturedByte::Unknown,
        ]
    );
}

#[test]
fn read_at_top_of_u64() {
    let ranges = RangeIndex::new(vec![MemoryExtent::new(u64::MAX, 1, 0)], image(1));

    assert_eq!(
        ranges.read(u64::MAX, 2),
        vec![CapturedByte::Known(0), CapturedByte::Unknown]
    );
}

#[test]
fn byte_display() {
    assert_eq!(CapturedByte::Known(0x0A).to_string(), "0A");
    assert_eq!(CapturedByte::Unknown.to_string(), "??");
    assert_eq!(CapturedByte::from(Some(7)), CapturedByte::Known(7));
    assert_eq!(CapturedByte::from(None), CapturedByte::Unknown);
}

#[test]
fn extent_bounds() {
    let extent = MemoryExtent::new(0x1000, 0x10, 0);

    assert!(extent.contains(0x1000));
    assert!(extent.contains(0x100F));
    assert!(!extent.contains(0x1010));
    assert!(!extent.contains(0xFFF));
    assert_eq!(extent.last_address(), Some(0x100F));
    assert_eq!(MemoryExtent::new(0x1000, 0, 0).last_address(), None);
}

#[test]
fn follow_clamps_without_publishing() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();
    let count = Rc::new(RefCell::new(0));

    let c = count.clone();
    bus.subscribe(Topic::AddressChanged, move |_| {
        *c.borrow_mut() += 1;
        Ok(())
    });

    let mut mirror = space.clone();
    let cursor = space.set_cursor(0x4000, 2, &mut bus);
    mirror.follow(cursor);

    assert_eq!(mirror, space);
    assert_eq!(*count.borrow(), 1);

    mirror.follow(u64::MAX);
    assert_eq!(
        mirror.cursor(),
        ADDRESS_LIMIT - DEFAULT_WINDOW as u64 * ROW_STRIDE
    );
}

#[test]
fn anchored_cursor() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();

    assert_eq!(space.cursor(), 0);
    assert_eq!(space.stride(), ROW_STRIDE);

    assert_eq!(space.set_cursor(0x1000, 10, &mut bus), 0xF60);
    assert_eq!(space.cursor(), 0xF60);
}

#[test]
fn cursor_clamps_low() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();

    assert_eq!(space.set_cursor(0x20, 10, &mut bus), 0);
    assert_eq!(space.set_cursor(0, usize::MAX, &mut bus), 0);
}

#[test]
fn cursor_clamps_high() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();
    let highest = ADDRESS_LIMIT - DEFAULT_WINDOW as u64 * ROW_STRIDE;

    assert_eq!(space.set_cursor(ADDRESS_LIMIT - 1, 0, &mut bus), highest);
    assert_eq!(space.set_cursor(u64::MAX, 0, &mut bus), highest);
    assert_eq!(space.set_cursor(highest, 0, &mut bus), highest);
}

#[test]
fn clamping_invariant_holds() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(7).unwrap();
    let targets = [
        0,
        1,
        0xF,
        0x10,
        0x7FFF_FFFF,
        ADDRESS_LIMIT - 0x30,
        ADDRESS_LIMIT,
        u64::MAX,
    ];

    for target in targets.iter() {
        for anchor in [0usize, 1, 3, 6, 100].iter() {
            let cursor = space.set_cursor(*target, *anchor, &mut bus);
            assert!(cursor + space.window() as u64 * space.stride() <= ADDRESS_LIMIT);
        }
    }
}

#[test]
fn set_cursor_always_publishes() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));

    let s = seen.clone();
    bus.subscribe(Topic::AddressChanged, move |event| {
        if let Event::AddressChanged { cursor } = event {
            s.borrow_mut().push(*cursor);
        }
        Ok(())
    });

    space.set_cursor(0x1000, 0, &mut bus);
    space.set_cursor(0x1000, 0, &mut bus);
    space.set_cursor(0x10, 4, &mut bus);

    assert_eq!(*seen.borrow(), vec![0x1000, 0x1000, 0]);
}

#[test]
fn recenter_puts_fault_mid_window() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();

    let cursor = space.recenter(0x7FF6_1234_5678, &mut bus);

    assert_eq!(cursor, 0x7FF6_1234_5678 - 10 * ROW_STRIDE);
    assert_eq!(space.row_address(10), 0x7FF6_1234_5678);
}

#[test]
fn rows_follow_cursor() {
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(DEFAULT_WINDOW).unwrap();
    let ranges = RangeIndex::new(vec![MemoryExtent::new(0x1000, 16, 0)], image(16));

    space.set_cursor(0x1000, 1, &mut bus);

    for i in 0..space.window() {
        let expected = space.cursor() + i as u64 * 16;
        assert_eq!(space.get_row(i, &ranges).address, expected);
    }

    let rows = space.rows(&ranges);
    assert_eq!(rows.len(), DEFAULT_WINDOW);
    assert!(rows[0].bytes.iter().all(|b| *b == CapturedByte::Unknown));
    assert_eq!(rows[1].bytes[15], CapturedByte::Known(15));
    assert_eq!(space.cursor(), 0xFF0);
}

#[test]
fn row_display() {
    let ranges = RangeIndex::new(vec![MemoryExtent::new(0x1000, 2, 0)], image(2));
    let space = AddressSpace::new(1).unwrap();
    let mut row = space.get_row(0, &ranges);
    row.address = 0x1000;
    row.bytes = ranges.read(0x1000, 4);

    assert_eq!(row.to_string(), "000000001000  00 01 ?? ??");
}

#[test]
fn window_validation() {
    assert_eq!(AddressSpace::new(0), Err(MemoryError::EmptyWindow));
    assert_eq!(
        AddressSpace::new(usize::MAX),
        Err(MemoryError::WindowTooLarge { rows: usize::MAX })
    );

    let whole = (ADDRESS_LIMIT / ROW_STRIDE) as usize;
    let mut bus = EventBus::new();
    let mut space = AddressSpace::new(whole).unwrap();
    assert_eq!(space.set_cursor(0x1234, 0, &mut bus), 0);
}

#[test]
fn parse_hex_addresses() {
    assert_eq!(parse_address("1000"), Ok(0x1000));
    assert_eq!(parse_address("0x7ff61234"), Ok(0x7FF6_1234));
    assert_eq!(
        parse_address("  0X00007FF6`12340000 "),
        Ok(0x7FF6_1234_0000)
    );
    assert_eq!(parse_address("7ff6_1234_0000"), Ok(0x7FF6_1234_0000));
    assert_eq!(parse_address("000000000000000000000001"), Ok(1));
    assert_eq!(parse_address("0"), Ok(0));
}

#[test]
fn parse_rejects_bad_input() {
    assert_eq!(parse_address(""), Err(MemoryError::EmptyAddress));
    assert_eq!(parse_address("0x"), Err(MemoryError::EmptyAddress));
    assert_eq!(
        parse_address("kernel32"),
        Err(MemoryError::InvalidAddress("kernel32".to_string()))
    );
    assert_eq!(
        parse_address("-10"),
        Err(MemoryError::InvalidAddress("-10".to_string()))
    );
    assert_eq!(
        parse_address("1000000000000"),
        Err(MemoryError::AddressOutOfRange(ADDRESS_LIMIT))
    );
    assert!(matches!(
        parse_address("1_0000_0000_0000_0000"),
        Err(MemoryError::InvalidAddress(_))
    ));
}
