//! Viewer settings, from the configuration file and the command line

use crate::config::{ConfigError, Result};
use crate::memory::DEFAULT_WINDOW;
use clap::{App, Arg, ArgMatches, ArgSettings};
use relative_path::RelativePathBuf;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::{fs, io, str};

/// Configuration file read when none is named on the command line.
pub const DEFAULT_CONFIG_FILE: &str = "dumpview.json";

/// How log output is formatted.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Text
    }
}

impl str::FromStr for LogFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_ref() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(()),
        }
    }
}

derive_deserialize_from_str!(LogFormat, "valid log format");

/// An analyzer program as written in the configuration file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerConfig {
    /// Program to run. Paths with more than one component are taken relative
    /// to the configuration file; bare names are looked up on `PATH`.
    pub program: RelativePathBuf,

    #[serde(default)]
    pub args: Vec<String>,
}

/// Where analysis reports come from, with every path resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyzerSource {
    /// Run a program over each dump.
    Program { program: PathBuf, args: Vec<String> },

    /// Read a saved report.
    Report(PathBuf),
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Number of rows in the hex view.
    pub window: usize,

    pub analyzer: Option<AnalyzerConfig>,

    /// A saved report to use instead of running an analyzer.
    pub report: Option<RelativePathBuf>,

    pub log_format: LogFormat,

    /// Directory that relative paths in the file are resolved against.
    #[serde(skip)]
    base_dir: PathBuf,

    /// Analyzer named on the command line, overriding the file.
    #[serde(skip)]
    override_source: Option<AnalyzerSource>,

    /// The file these settings were read from, if there was one.
    #[serde(skip)]
    source: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            window: DEFAULT_WINDOW,
            analyzer: None,
            report: None,
            log_format: LogFormat::default(),
            base_dir: PathBuf::from("."),
            override_source: None,
            source: None,
        }
    }
}

impl Config {
    /// Read a configuration file.
    ///
    /// A missing file is not an error; it yields the default configuration.
    /// Nothing is logged here, since logging is configured from the result.
    pub fn read<P: AsRef<Path>>(filename: P) -> Result<Self> {
        let filename = filename.as_ref();
        let base_dir = filename
            .parent()
            .filter(|dir| !dir.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let config_file = match fs::File::open(filename) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Ok(Config {
                    base_dir,
                    ..Config::default()
                });
            }
            Err(e) => return Err(e.into()),
        };

        let mut config: Self = serde_json::from_reader(config_file)?;
        config.base_dir = base_dir;
        config.source = Some(filename.to_path_buf());

        Ok(config)
    }

    /// Add the arguments that override configuration file settings.
    pub fn configure_app<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
        app.arg(
            Arg::with_name("analyzer")
                .long("analyzer")
                .value_name("PROGRAM")
                .help("Analyzer program that turns a dump into a JSON report.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("report")
                .long("report")
                .value_name("report.json")
                .help("Saved analysis report to use instead of an analyzer.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("window")
                .long("window")
                .value_name("ROWS")
                .help("Number of rows in the hex view.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
        .arg(
            Arg::with_name("log_format")
                .long("log-format")
                .value_name("text|json")
                .help("How log output is formatted.")
                .takes_value(true)
                .set(ArgSettings::Global),
        )
    }

    /// Override settings with any that were given on the command line.
    pub fn apply_arg_matches(&mut self, args: &ArgMatches) -> Result<()> {
        if let Some(window) = args.value_of("window") {
            self.window = usize::from_str(window)
                .map_err(|_| ConfigError::InvalidWindow(window.to_string()))?;
        }

        if let Some(format) = args.value_of("log_format") {
            self.log_format = LogFormat::from_str(format)
                .map_err(|_| ConfigError::UnknownLogFormat(format.to_string()))?;
        }

        if let Some(report) = args.value_of("report") {
            self.override_source = Some(AnalyzerSource::Report(PathBuf::from(report)));
        } else if let Some(program) = args.value_of("analyzer") {
            self.override_source = Some(AnalyzerSource::Program {
                program: PathBuf::from(program),
                args: Vec::new(),
            });
        }

        Ok(())
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Decide where reports come from.
    ///
    /// The command line wins over the file, and within either a saved report
    /// wins over an analyzer program.
    pub fn analyzer_source(&self) -> Result<AnalyzerSource> {
        if let Some(source) = &self.override_source {
            return Ok(source.clone());
        }

        if let Some(report) = &self.report {
            return Ok(AnalyzerSource::Report(report.to_path(&self.base_dir)));
        }

        if let Some(analyzer) = &self.analyzer {
            let program = if analyzer.program.components().count() > 1 {
                analyzer.program.to_path(&self.base_dir)
            } else {
                PathBuf::from(analyzer.program.as_str())
            };

            return Ok(AnalyzerSource::Program {
                program,
                args: analyzer.args.clone(),
            });
        }

        Err(ConfigError::NoAnalyzer)
    }
}
