//! Thread loop for processing the analysis queue

use crate::analyzer::{Command, DumpAnalyzer, Response};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread;
use tracing::{debug, info_span};

/// Carry out one command, returning its response.
pub fn process_command(analyzer: &dyn DumpAnalyzer, cmd: Command) -> Response {
    match cmd {
        Command::Analyze { generation, dump } => {
            let span = info_span!("analyze", generation, bytes = dump.len());
            let _entered = span.enter();

            let result = analyzer.analyze(&dump);
            debug!(ok = result.is_ok(), "analysis finished");

            Response::Analyzed {
                generation,
                dump,
                result,
            }
        }
        Command::Fence => Response::Fence,
    }
}

/// Start a separate analysis thread that runs the analyzer and returns
/// results of those analyses.
///
/// This function returns an MPSC channel sender that can be used for queueing
/// dumps for analysis, and a response receiver that responses will come back
/// from. Commands are processed one at a time, in the order they were sent.
/// The thread exits once the command sender is dropped or the response
/// receiver goes away.
pub fn start_analysis_queue(
    analyzer: Box<dyn DumpAnalyzer>,
) -> (Sender<Command>, Receiver<Response>) {
    let (cmd_sender, cmd_recv) = channel::<Command>();
    let (resp_sender, resp_recv) = channel();

    thread::spawn(move || {
        while let Ok(cmd) = cmd_recv.recv() {
            if resp_sender
                .send(process_command(analyzer.as_ref(), cmd))
                .is_err()
            {
                break;
            }
        }

        debug!("analysis queue shut down");
    });

    (cmd_sender, resp_recv)
}
