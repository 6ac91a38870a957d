#[macro_use]
extern crate clap;

#[macro_use]
extern crate serde_plain;

mod analyzer;
mod cli;
mod config;
mod events;
mod logging;
mod memory;
mod regions;
mod session;

use std::io;

fn main() -> io::Result<()> {
    cli::main()
}
