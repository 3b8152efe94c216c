use clap::{ArgMatches, Command};

pub trait Cmd {
    const NAME: &'static str;

    fn cmd() -> Command;

    fn run(&self, m: &ArgMatches);
}

pub mod args;

pub mod mac;
pub use mac::MacCmd;
