//! Extract params from `ArgMatches` and convert them to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::dump::DumpArgs;
use crate::commands::lookup::LookupArgs;

pub struct DumpParams {
    pub container: PathBuf,
    pub color: ColorChoice,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            container: container_path(m),
            color: parse_color(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            container: p.container,
            color: !p.json && p.color.should_colorize(),
            json: p.json,
        }
    }
}

pub struct LookupParams {
    pub container: PathBuf,
    pub key: String,
    pub receiver: Option<String>,
}

impl LookupParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            container: container_path(m),
            key: m.get_one::<String>("key").cloned().unwrap_or_default(),
            receiver: m.get_one::<String>("receiver").cloned(),
        }
    }
}

impl From<LookupParams> for LookupArgs {
    fn from(p: LookupParams) -> Self {
        Self {
            container: p.container,
            key: p.key,
            receiver: p.receiver,
        }
    }
}

fn container_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("container")
        .cloned()
        .unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
