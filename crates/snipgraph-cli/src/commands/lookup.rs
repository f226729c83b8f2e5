use std::fmt::{self, Write as _};
use std::path::PathBuf;

use snipgraph_bytecode::{Container, Lookup};
use snipgraph_core::MethodKey;

use super::{CliError, finish};

pub struct LookupArgs {
    pub container: PathBuf,
    pub key: String,
    pub receiver: Option<String>,
}

pub fn run(args: LookupArgs) {
    finish(render(&args));
}

pub(crate) fn render(args: &LookupArgs) -> Result<String, CliError> {
    let key = MethodKey::parse(&args.key)?;
    let container = Container::from_path(&args.container)?;

    // Static graphs ignore the receiver.
    let receiver = container
        .graphs()
        .get(&key)
        .filter(|data| !data.is_static())
        .and(args.receiver.as_deref());
    let lookup = container.graphs().lookup(&key, receiver)?;
    tracing::debug!(%key, offset = lookup.offset, "lookup");

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = describe(&mut out, &key, receiver, &lookup);
    Ok(out)
}

fn describe(
    out: &mut String,
    key: &MethodKey,
    receiver: Option<&str>,
    lookup: &Lookup<'_>,
) -> fmt::Result {
    writeln!(out, "{key}")?;
    match receiver {
        Some(r) => writeln!(out, "  receiver  {r}")?,
        None => writeln!(out, "  static")?,
    }
    writeln!(out, "  offset    {}", lookup.offset)?;
    if let Some(original) = &lookup.data.original {
        writeln!(out, "  original  {original}")?;
    }
    for (i, p) in lookup.data.parameters.params().iter().enumerate() {
        let mut flags = Vec::new();
        if p.constant {
            flags.push("constant");
        }
        if p.varargs {
            flags.push("varargs");
        }
        if p.non_null {
            flags.push("non-null");
        }
        let name = p.name.as_deref().unwrap_or("_");
        let line = format!("  param {i}   {name} {}", flags.join(" "));
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}
