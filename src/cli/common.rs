//! Common utilities for command implementations

use crate::analyzer::{CommandAnalyzer, DumpAnalyzer, ReportFileAnalyzer};
use crate::config::{AnalyzerSource, Config};
use crate::events::{Event, Topic};
use crate::session::{DumpSnapshot, Session};
use clap::{App, Arg, SubCommand};
use std::cell::RefCell;
use std::fs;
use std::io;
use std::rc::Rc;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// Enumeration of all CLI commands
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Info,
    Map,
    View,
}

impl Command {
    /// Enumerate all commands that dumpview recognizes.
    pub fn enumerate() -> Vec<Self> {
        use Command::*;

        vec![Info, Map, View]
    }

    /// Construct the subcommand object for this particular `Command`.
    pub fn into_clap_subcommand<'a, 'b>(self) -> App<'a, 'b> {
        let dump_arg = Arg::with_name("dump")
            .value_name("crash.dmp")
            .index(1)
            .required(true)
            .help("The dump file to open");

        match self {
            Command::Info => SubCommand::with_name("info")
                .about("Summarize a dump's header, exception, threads, and captured ranges")
                .arg(dump_arg),
            Command::Map => SubCommand::with_name("map")
                .about("List a dump's allocations, regions, and the gaps between them")
                .arg(dump_arg),
            Command::View => SubCommand::with_name("view")
                .about("Show a window of captured memory")
                .arg(dump_arg)
                .arg(
                    Arg::with_name("address")
                        .value_name("0x7ff6_1000")
                        .index(2)
                        .help("The address to show; defaults to the fault address"),
                )
                .arg(
                    Arg::with_name("row")
                        .long("row")
                        .value_name("N")
                        .takes_value(true)
                        .help("Which row of the window the address appears on"),
                ),
        }
    }
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "info" => Ok(Command::Info),
            "map" => Ok(Command::Map),
            "view" => Ok(Command::View),
            "hex" => Ok(Command::View),
            _ => Err(()),
        }
    }
}

/// Construct the analyzer the configuration asks for.
pub fn resolve_analyzer(config: &Config) -> io::Result<Box<dyn DumpAnalyzer>> {
    Ok(match config.analyzer_source()? {
        AnalyzerSource::Program { program, args } => {
            debug!(program = %program.display(), "using analyzer program");
            Box::new(CommandAnalyzer::new(program, args))
        }
        AnalyzerSource::Report(path) => {
            debug!(report = %path.display(), "using saved report");
            Box::new(ReportFileAnalyzer::new(path))
        }
    })
}

/// Read a dump file, naming it in any error.
pub fn read_dump(filename: &str) -> io::Result<Vec<u8>> {
    fs::read(filename)
        .map_err(|e| io::Error::new(e.kind(), format!("Could not read dump {}: {}", filename, e)))
}

/// What became of the analysis `open_session` waited for. Failures carry the
/// generation they were reported for.
type Outcome = Option<Result<Arc<DumpSnapshot>, (u64, String)>>;

/// Load a dump into a fresh session and wait for its analysis.
///
/// `attach` runs against the new session before the dump is loaded, so that
/// views it subscribes see the snapshot arrive and the cursor settle. If
/// analysis fails, the analyzer's complaint becomes the error.
pub fn open_session<F, T>(
    config: &Config,
    filename: &str,
    attach: F,
) -> io::Result<(Session, Arc<DumpSnapshot>, T)>
where
    F: FnOnce(&mut Session) -> T,
{
    let dump = read_dump(filename)?;
    let mut session = Session::new(config, resolve_analyzer(config)?)?;
    let attached = attach(&mut session);

    let outcome: Rc<RefCell<Outcome>> = Rc::new(RefCell::new(None));

    let sink = outcome.clone();
    let on_completed = session.subscribe(Topic::AnalysisCompleted, move |event| {
        if let Event::AnalysisCompleted(snapshot) = event {
            *sink.borrow_mut() = Some(Ok(snapshot.clone()));
        }

        Ok(())
    });

    let sink = outcome.clone();
    let on_failed = session.subscribe(Topic::AnalysisFailed, move |event| {
        if let Event::AnalysisFailed {
            generation,
            message,
        } = event
        {
            *sink.borrow_mut() = Some(Err((*generation, message.clone())));
        }

        Ok(())
    });

    let generation = session.load_dump(dump)?;
    session.wait_for_analysis()?;
    session.unsubscribe(on_completed);
    session.unsubscribe(on_failed);

    let outcome = outcome.borrow_mut().take();
    let message = match outcome {
        Some(Ok(snapshot)) => return Ok((session, snapshot, attached)),
        Some(Err((failed, message))) if failed == generation => message,
        _ => "analysis produced no result".to_string(),
    };

    Err(io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Could not analyze {}: {}", filename, message),
    ))
}
