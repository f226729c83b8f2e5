//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("snipgraph")
        .about("Inspect encoded snippet containers")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(dump_command())
        .subcommand(lookup_command())
}

/// Print every section of a container.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show objects, snippet types and graphs of a container")
        .after_help(
            r#"EXAMPLES:
  snipgraph dump snippets.snpg
  snipgraph dump snippets.snpg --color never
  snipgraph dump snippets.snpg --json"#,
        )
        .arg(container_path_arg())
        .arg(color_arg())
        .arg(json_arg())
}

/// Resolve one method key to its graph offset.
pub fn lookup_command() -> Command {
    Command::new("lookup")
        .about("Find the graph registered for a method key")
        .after_help(
            r#"EXAMPLES:
  snipgraph lookup snippets.snpg 'Foo.bar(I)I'
  snipgraph lookup snippets.snpg 'Foo.baz()V' -r Bar"#,
        )
        .arg(container_path_arg())
        .arg(key_arg())
        .arg(receiver_arg())
}
