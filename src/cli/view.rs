//! Hex view of a window of captured memory

use crate::cli::common::open_session;
use crate::config::Config;
use crate::events::{Event, Topic};
use crate::memory::{AddressSpace, RangeIndex};
use crate::regions::MapEntry;
use crate::session::{DumpSnapshot, Session};
use clap::ArgMatches;
use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;

/// The lines of the hex view, redrawn every time the session's cursor is
/// set.
///
/// A screen keeps its own copy of the address space, which follows the
/// cursor published on the session's bus, and reads rows out of whichever
/// snapshot was most recently announced.
pub struct Screen {
    space: AddressSpace,
    snapshot: Option<Arc<DumpSnapshot>>,
    lines: Vec<String>,
}

impl Screen {
    /// Create a screen and subscribe it to `session`.
    pub fn attach(session: &mut Session) -> Rc<RefCell<Screen>> {
        let screen = Rc::new(RefCell::new(Screen {
            space: session.space().clone(),
            snapshot: None,
            lines: Vec::new(),
        }));

        let target = screen.clone();
        session.subscribe(Topic::AnalysisCompleted, move |event| {
            if let Event::AnalysisCompleted(snapshot) = event {
                target.borrow_mut().snapshot = Some(snapshot.clone());
            }

            Ok(())
        });

        let target = screen.clone();
        session.subscribe(Topic::AddressChanged, move |event| {
            if let Event::AddressChanged { cursor } = event {
                target.borrow_mut().redraw(*cursor);
            }

            Ok(())
        });

        screen
    }

    /// The most recent drawing; empty until the cursor is first set.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn redraw(&mut self, cursor: u64) {
        self.space.follow(cursor);
        self.lines.clear();

        let cursor = self.space.cursor();
        let empty = RangeIndex::empty();
        let (ranges, fault) = match &self.snapshot {
            Some(snapshot) => {
                self.lines.push(header(snapshot, cursor));
                (&snapshot.ranges, snapshot.fault_address())
            }
            None => {
                self.lines.push(format!("{:012x}", cursor));
                (&empty, None)
            }
        };

        for row in self.space.rows(ranges) {
            let marker = match fault {
                Some(fault) if fault.wrapping_sub(row.address) < self.space.stride() => '>',
                _ => ' ',
            };

            self.lines.push(format!("{} {}", marker, row));
        }
    }
}

fn header(snapshot: &DumpSnapshot, cursor: u64) -> String {
    match snapshot.map.entry_at(cursor) {
        Some(MapEntry::Allocation(alloc)) => match &alloc.module_name {
            Some(name) => format!("{:012x} in allocation {:012x} {}", cursor, alloc.base, name),
            None => format!("{:012x} in allocation {:012x}", cursor, alloc.base),
        },
        Some(MapEntry::Gap(gap)) => format!("{:012x} in free space at {:012x}", cursor, gap.base),
        None => format!("{:012x}", cursor),
    }
}

pub fn view(config: &Config, argv: &ArgMatches<'_>) -> io::Result<()> {
    let filename = argv
        .value_of("dump")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No dump file given"))?;

    let anchor_row = match argv.value_of("row") {
        Some(row) => usize::from_str(row).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{:?} is not a row number", row),
            )
        })?,
        None => 0,
    };

    let (mut session, _snapshot, screen) = open_session(config, filename, Screen::attach)?;

    let window = session.space().window();
    if anchor_row >= window {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Row {} is outside the {}-row window", anchor_row, window),
        ));
    }

    if let Some(address) = argv.value_of("address") {
        session.navigate_str(address, anchor_row)?;
    } else if screen.borrow().lines().is_empty() {
        // Healthy dumps never move the cursor on their own.
        let cursor = session.cursor();
        session.navigate(cursor, 0);
    }

    for line in screen.borrow().lines() {
        println!("{}", line);
    }

    Ok(())
}
