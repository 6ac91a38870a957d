//! CLI support for non-command bits

use crate::cli::common::Command;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::{cli, logging};
use clap::{Arg, ArgSettings};
use std::io;
use std::str::FromStr;
use tracing::debug;

pub fn main() -> io::Result<()> {
    let mut app = app_from_crate!();
    app = app.arg(
        Arg::with_name("config")
            .long("config")
            .value_name("dumpview.json")
            .takes_value(true)
            .help("The configuration file to load")
            .set(ArgSettings::Global),
    );
    app = Config::configure_app(app);

    for cmd in Command::enumerate().iter() {
        app = app.subcommand(cmd.into_clap_subcommand());
    }

    let matches = app.get_matches();

    let (command, submatches) = matches.subcommand();
    let submatches = submatches.unwrap_or(&matches);

    let config_filename = submatches
        .value_of("config")
        .or_else(|| matches.value_of("config"))
        .unwrap_or(DEFAULT_CONFIG_FILE);

    let mut config = Config::read(config_filename)?;
    config.apply_arg_matches(&matches)?;
    config.apply_arg_matches(submatches)?;

    logging::init(config.log_format);

    match config.source() {
        Some(path) => debug!(config = %path.display(), "read configuration file"),
        None => debug!(config = config_filename, "no configuration file, using defaults"),
    }

    let command = Command::from_str(command).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "No command given; try `dumpview help`",
        )
    })?;

    match command {
        Command::Info => cli::info(&config, submatches)?,
        Command::Map => cli::map(&config, submatches)?,
        Command::View => cli::view(&config, submatches)?,
    };

    Ok(())
}
