//! Analysis by an external analyzer program

use crate::analyzer::{AnalysisReport, AnalyzerError, DumpAnalyzer, Result};
use std::io::{self, Write};
use std::panic;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;
use tracing::{debug, info};

/// Runs an analyzer program once per dump.
///
/// The dump is written to the program's standard input and the report is
/// read back as JSON from its standard output. A non-zero exit status fails
/// the analysis with whatever the program wrote to standard error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandAnalyzer {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandAnalyzer {
    pub fn new<P: Into<PathBuf>>(program: P, args: Vec<String>) -> Self {
        CommandAnalyzer {
            program: program.into(),
            args,
        }
    }
}

impl DumpAnalyzer for CommandAnalyzer {
    fn analyze(&self, dump: &[u8]) -> Result<AnalysisReport> {
        info!(program = %self.program.display(), bytes = dump.len(), "running analyzer");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()?;

        let stdin = child.stdin.take();

        // The child may block on a full stdout pipe before it has drained
        // stdin, so the dump is written from a second thread.
        let (output, written) = thread::scope(|s| {
            let writer = s.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    stdin.write_all(dump)?;
                }

                Ok(())
            });

            let output = child.wait_with_output();
            let written = writer
                .join()
                .unwrap_or_else(|payload| panic::resume_unwind(payload));

            (output, written)
        });

        let output = output?;

        if !output.status.success() {
            return Err(AnalyzerError::Failed {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match written {
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => {
                debug!("analyzer closed its input before reading the whole dump")
            }
            other => other?,
        }

        let report: AnalysisReport = serde_json::from_slice(&output.stdout)?;

        debug!(
            magic = %report.magic,
            ranges = report.memory_range.len(),
            threads = report.thread_list.len(),
            "analyzer report parsed"
        );

        Ok(report)
    }
}
