use crate::analyzer::AnalysisSummary;
use crate::cli::common::{read_dump, resolve_analyzer};
use crate::config::Config;
use clap::ArgMatches;
use std::io;

pub fn info(config: &Config, argv: &ArgMatches<'_>) -> io::Result<()> {
    let filename = argv
        .value_of("dump")
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "No dump file given"))?;

    let dump = read_dump(filename)?;
    let report = resolve_analyzer(config)?.analyze(&dump)?;

    print!("{}", AnalysisSummary::new(&report));

    Ok(())
}
