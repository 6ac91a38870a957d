//! CLI commands

mod common;
mod info;
mod main;
mod map;
mod view;

pub use info::info;
pub use main::main;
pub use map::map;
pub use view::view;
