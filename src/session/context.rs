//! The viewing session that ties the model together

use crate::analyzer::{start_analysis_queue, Command, DumpAnalyzer, Response};
use crate::config::Config;
use crate::events::{Event, EventBus, HandlerResult, SubscriptionId, Topic};
use crate::memory::{parse_address, AddressSpace};
use crate::session::{DumpSnapshot, Result, SessionError};
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One viewer's state: the event bus, the address space window, and the
/// snapshot of the most recently analyzed dump.
///
/// Dumps are analyzed on a background queue. Each `load_dump` starts a new
/// generation, and only the response for the newest generation is ever
/// applied; anything older that comes back late is dropped. Responses are
/// picked up by `wait_for_analysis`, on the session's own thread, so event
/// handlers always run there too.
pub struct Session {
    bus: EventBus,
    space: AddressSpace,
    snapshot: Option<Arc<DumpSnapshot>>,

    /// The most recently requested generation.
    generation: u64,

    /// The most recent generation whose response was applied.
    applied: u64,

    commands: Sender<Command>,
    responses: Receiver<Response>,
}

impl Session {
    /// Start a session that analyzes dumps with `analyzer`.
    pub fn new(config: &Config, analyzer: Box<dyn DumpAnalyzer>) -> Result<Self> {
        let space = AddressSpace::new(config.window)?;
        let (commands, responses) = start_analysis_queue(analyzer);

        Ok(Session {
            bus: EventBus::new(),
            space,
            snapshot: None,
            generation: 0,
            applied: 0,
            commands,
            responses,
        })
    }

    /// Queue a dump for analysis, returning its generation.
    pub fn load_dump<D: Into<Arc<[u8]>>>(&mut self, dump: D) -> Result<u64> {
        let dump = dump.into();
        let generation = self.generation + 1;

        info!(generation, bytes = dump.len(), "loading dump");

        self.commands
            .send(Command::Analyze { generation, dump })
            .map_err(|_| SessionError::QueueClosed)?;
        self.generation = generation;

        Ok(generation)
    }

    /// Block until every load made so far has been answered.
    ///
    /// Returns the current snapshot, which is still the previous one if the
    /// newest analysis failed.
    pub fn wait_for_analysis(&mut self) -> Result<Option<Arc<DumpSnapshot>>> {
        self.commands
            .send(Command::Fence)
            .map_err(|_| SessionError::QueueClosed)?;

        loop {
            match self.responses.recv() {
                Ok(Response::Fence) => break,
                Ok(response) => self.apply(response),
                Err(_) => return Err(SessionError::QueueClosed),
            }
        }

        Ok(self.snapshot.clone())
    }

    fn apply(&mut self, response: Response) {
        let (generation, dump, result) = match response {
            Response::Analyzed {
                generation,
                dump,
                result,
            } => (generation, dump, result),
            Response::Fence => return,
        };

        if generation != self.generation || self.applied == generation {
            debug!(
                generation,
                current = self.generation,
                "ignoring stale analysis response"
            );
            return;
        }

        self.applied = generation;

        let snapshot = result.and_then(|report| {
            DumpSnapshot::from_report(generation, report, dump).map_err(Into::into)
        });

        match snapshot {
            Ok(snapshot) => {
                let snapshot = Arc::new(snapshot);

                info!(
                    generation = snapshot.generation,
                    magic = %snapshot.magic,
                    bytes = snapshot.bytelen,
                    modules = snapshot.modules.len(),
                    threads = snapshot.threads.len(),
                    allocations = snapshot.allocations.len(),
                    extents = snapshot.ranges.extents().len(),
                    entries = snapshot.map.entries().len(),
                    "analysis completed"
                );

                let event = Event::AnalysisCompleted(snapshot.clone());
                self.snapshot = Some(snapshot.clone());
                self.bus.publish(&event);

                if let Some(fault) = snapshot.fault_address() {
                    self.space.recenter(fault, &mut self.bus);
                }
            }
            Err(e) => {
                warn!(generation, error = %e, "analysis failed");

                self.bus.publish(&Event::AnalysisFailed {
                    generation,
                    message: e.to_string(),
                });
            }
        }
    }

    /// Show `address` on row `anchor_row` of the window. Returns the new
    /// cursor.
    pub fn navigate(&mut self, address: u64, anchor_row: usize) -> u64 {
        self.space.set_cursor(address, anchor_row, &mut self.bus)
    }

    /// Like `navigate`, for an address typed in by the user.
    ///
    /// Text that is not an address is rejected; the cursor stays put and no
    /// event is published.
    pub fn navigate_str(&mut self, text: &str, anchor_row: usize) -> Result<u64> {
        let address = parse_address(text)?;

        Ok(self.navigate(address, anchor_row))
    }

    pub fn cursor(&self) -> u64 {
        self.space.cursor()
    }

    pub fn space(&self) -> &AddressSpace {
        &self.space
    }

    pub fn subscribe<F>(&mut self, topic: Topic, handler: F) -> SubscriptionId
    where
        F: FnMut(&Event) -> HandlerResult + 'static,
    {
        self.bus.subscribe(topic, handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }
}
