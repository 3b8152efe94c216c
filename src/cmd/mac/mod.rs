use crate::cmd::{args::read_key, Cmd};
use clap::{value_parser, Arg, ArgAction, ArgGroup, ArgMatches, Command};
use mac_engine::{MacEngine, Mode};
use std::path::PathBuf;

#[derive(Clone)]
pub struct MacCmd;

#[derive(Clone)]
pub struct OmacCmd;

#[derive(Clone)]
pub struct TmacCmd;

#[derive(Clone)]
pub struct HmacCmd;

fn mode_cmd(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(
            Arg::new("msg")
                .value_name("MESSAGE")
                .action(ArgAction::Set)
                .required(false)
                .value_parser(value_parser!(String))
                .help("the message that need to authentication"),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .required(false)
                .value_parser(value_parser!(PathBuf))
                .help("the file that need to authentication"),
        )
        .arg(
            Arg::new("kfile")
                .long("kfile")
                .value_parser(value_parser!(PathBuf))
                .help("the key file path"),
        )
        .arg(
            Arg::new("kstr")
                .long("kstr")
                .value_parser(value_parser!(String))
                .help("the key hex string"),
        )
        .group(ArgGroup::new("key").args(["kfile", "kstr"]).required(true))
        .arg(
            Arg::new("verify")
                .short('v')
                .long("verify")
                .value_parser(value_parser!(String))
                .help("verify against the expected tag hex string instead of printing"),
        )
}

fn run_mode(mode: Mode, m: &ArgMatches) -> anyhow::Result<()> {
    let key = read_key(m)?;

    let mut data = m
        .get_one::<String>("msg")
        .map(|x| x.as_bytes().to_vec())
        .unwrap_or_default();
    if let Some(p) = m.get_one::<PathBuf>("file") {
        data.extend(std::fs::read(p)?);
    }

    let mut engine = MacEngine::new();
    engine.set_key(key.as_bytes())?;
    engine.set_mode(mode)?;

    if let Some(tag) = m.get_one::<String>("verify") {
        let tag = hex::decode(tag.trim())?;
        if engine.verify_mac(&data, &tag)? {
            println!("ok");
        } else {
            println!("mismatch");
            std::process::exit(1);
        }
    } else {
        println!("{}", hex::encode(engine.compute_mac(&data)?));
    }

    Ok(())
}

fn run_or_exit(mode: Mode, m: &ArgMatches) {
    if crate::log_error(run_mode(mode, m)).is_none() {
        std::process::exit(1);
    }
}

impl Cmd for MacCmd {
    const NAME: &'static str = "mac";

    fn cmd() -> Command {
        Command::new(Self::NAME)
            .subcommand_required(true)
            .subcommand(OmacCmd::cmd())
            .subcommand(TmacCmd::cmd())
            .subcommand(HmacCmd::cmd())
            .about("Message Authentication Code")
    }

    fn run(&self, m: &ArgMatches) {
        match m.subcommand() {
            Some((OmacCmd::NAME, m)) => OmacCmd.run(m),
            Some((TmacCmd::NAME, m)) => TmacCmd.run(m),
            Some((HmacCmd::NAME, m)) => HmacCmd.run(m),
            Some((name, _m)) => panic!("not support the MAC of {name}"),
            None => unreachable!(),
        }
    }
}

impl Cmd for OmacCmd {
    const NAME: &'static str = "omac";

    fn cmd() -> Command {
        mode_cmd(Self::NAME, "OMAC1 (CMAC-AES), 16 byte tag")
    }

    fn run(&self, m: &ArgMatches) {
        run_or_exit(Mode::Omac, m)
    }
}

impl Cmd for TmacCmd {
    const NAME: &'static str = "tmac";

    fn cmd() -> Command {
        mode_cmd(Self::NAME, "truncated CMAC-AES, 8 byte tag")
    }

    fn run(&self, m: &ArgMatches) {
        run_or_exit(Mode::Tmac, m)
    }
}

impl Cmd for HmacCmd {
    const NAME: &'static str = "hmac";

    fn cmd() -> Command {
        mode_cmd(Self::NAME, "HMAC-SHA-256, 32 byte tag")
    }

    fn run(&self, m: &ArgMatches) {
        run_or_exit(Mode::Hmac, m)
    }
}
