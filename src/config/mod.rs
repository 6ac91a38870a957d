//! Configuration file and command line settings

mod error;
mod settings;

pub use error::{Error as ConfigError, Result};
pub use settings::{AnalyzerSource, Config, LogFormat, DEFAULT_CONFIG_FILE};

#[cfg(test)]
mod tests;
