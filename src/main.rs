use clap::Command;
use log::LevelFilter;
use mackit::cmd::{Cmd, MacCmd};

fn main() {
    env_logger::builder()
        .filter_level(LevelFilter::Info)
        .parse_default_env()
        .init();

    let version = env!("MACKIT_VERSION_INFO");
    let app = Command::new("mackit")
        .version(version)
        .about("message authentication code toolkit")
        .subcommand(MacCmd::cmd())
        .get_matches();

    if let Some((s, m)) = app.subcommand() {
        match s {
            MacCmd::NAME => MacCmd.run(m),
            name => {
                panic!("unsupport for {}", name)
            }
        }
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), version);
    }
}
