use crate::cli::common::open_session;
use crate::config::Config;
use clap::ArgMatches;
use std::io;

pub fn map(config: &Config, argv: &ArgMatches<'_>) -> io::Result<()> {
    let filename = argv
        .value_of("dump")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No dump file given"))?;

    let (_session, snapshot, ()) = open_session(config, filename, |_| ())?;

    print!("{}", snapshot.map);

    Ok(())
}
