//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that commands compose.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Container file (positional).
pub fn container_path_arg() -> Arg {
    Arg::new("container")
        .value_name("CONTAINER")
        .value_parser(value_parser!(PathBuf))
        .required(true)
        .help("Encoded snippets container file")
}

/// Canonical method key (positional).
pub fn key_arg() -> Arg {
    Arg::new("key")
        .value_name("KEY")
        .required(true)
        .help("Canonical method key, e.g. 'Foo.bar(I)I'")
}

/// Receiver type for virtual snippets (-r/--receiver).
pub fn receiver_arg() -> Arg {
    Arg::new("receiver")
        .short('r')
        .long("receiver")
        .value_name("TYPE")
        .help("Receiver type selecting a virtual graph variant")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Machine-readable output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .help("Print a JSON summary instead of the text dump")
}
