mod cli;
mod commands;
mod logging;

use cli::{DumpParams, LookupParams, build_cli};

fn main() {
    logging::init();
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("lookup", m)) => {
            let params = LookupParams::from_matches(m);
            commands::lookup::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
