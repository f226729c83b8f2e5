//! Human-readable container dump for debugging.

use std::fmt::{self, Write as _};

use snipgraph_core::Colors;

use crate::container::Container;
use crate::entry::TableEntry;
use crate::registry::{GraphData, GraphVariants};

/// Generate a human-readable dump of a container.
pub fn dump(container: &Container, colors: Colors) -> String {
    let mut out = String::new();
    let ctx = DumpContext::new(container, colors);
    // Writing into a String cannot fail.
    let _ = write_sections(&mut out, container, &ctx);
    out
}

fn write_sections(out: &mut String, container: &Container, ctx: &DumpContext) -> fmt::Result {
    dump_objects(out, container, ctx)?;
    dump_snippet_types(out, container, ctx)?;
    dump_graphs(out, container, ctx)?;
    dump_blob(out, container, ctx)
}

/// Minimum digits needed to print every index below `count`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        ((count - 1) as f64).log10().floor() as usize + 1
    }
}

struct DumpContext {
    /// Width for object indices (O#).
    obj_width: usize,
    /// Width for snippet type indices (T#).
    type_width: usize,
    /// Width of the longest method key, for aligning offsets.
    key_width: usize,
    /// Width of blob offsets.
    offset_width: usize,
    colors: Colors,
}

impl DumpContext {
    fn new(container: &Container, colors: Colors) -> Self {
        let key_width = container
            .graphs()
            .iter()
            .map(|(k, _)| k.as_str().len())
            .max()
            .unwrap_or(0);

        Self {
            obj_width: width_for_count(container.objects().len()),
            type_width: width_for_count(container.snippet_types().len()),
            key_width,
            offset_width: width_for_count(container.blob().len()).max(4),
            colors,
        }
    }
}

fn dump_objects(out: &mut String, container: &Container, ctx: &DumpContext) -> fmt::Result {
    let c = &ctx.colors;
    let w = ctx.obj_width;

    writeln!(out, "{}[objects]{}", c.heading, c.reset)?;
    for (idx, slot) in container.objects().iter() {
        let color = match slot.entry() {
            TableEntry::Symbolic(_) | TableEntry::Wrapped(_) => c.symbolic,
            TableEntry::Plain(_) => c.literal,
            TableEntry::Null => c.muted,
        };
        let cached = if slot.is_resolved() { " *" } else { "" };
        writeln!(
            out,
            "{}O{:0w$}{} {color}{}{}{cached}",
            c.muted,
            idx.0,
            c.reset,
            slot.entry(),
            c.reset
        )?;
    }
    out.push('\n');
    Ok(())
}

fn dump_snippet_types(out: &mut String, container: &Container, ctx: &DumpContext) -> fmt::Result {
    let c = &ctx.colors;
    let w = ctx.type_width;

    writeln!(out, "{}[snippet_types]{}", c.heading, c.reset)?;
    for (i, ty) in container.snippet_types().iter().enumerate() {
        write!(out, "{}T{i:0w$}{} {}", c.muted, c.reset, ty.name)?;
        if let Some(component) = &ty.component {
            write!(out, "{}  ; component {component}{}", c.muted, c.reset)?;
        }
        out.push('\n');
        for m in &ty.methods {
            let stat = if m.is_static { " static" } else { "" };
            writeln!(out, "  {}{}{stat}", m.name, m.descriptor)?;
        }
    }
    out.push('\n');
    Ok(())
}

fn dump_graphs(out: &mut String, container: &Container, ctx: &DumpContext) -> fmt::Result {
    let c = &ctx.colors;
    let kw = ctx.key_width;
    let ow = ctx.offset_width;

    writeln!(out, "{}[graphs]{}", c.heading, c.reset)?;
    for (key, data) in container.graphs().iter() {
        let key = key.as_str();
        match &data.variants {
            GraphVariants::Static { offset } => {
                writeln!(
                    out,
                    "{}{key:kw$}{}  static {}@{offset:0ow$}{}{}",
                    c.key,
                    c.reset,
                    c.muted,
                    c.reset,
                    graph_comment(data, ctx)
                )?;
            }
            GraphVariants::Virtual(entries) => {
                for (i, entry) in entries.iter().enumerate() {
                    let label = if i == 0 { key } else { "" };
                    let comment = if i == 0 {
                        graph_comment(data, ctx)
                    } else {
                        String::new()
                    };
                    writeln!(
                        out,
                        "{}{label:kw$}{}  {} {}@{:0ow$}{}{comment}",
                        c.key, c.reset, entry.receiver, c.muted, entry.offset, c.reset
                    )?;
                }
            }
        }
    }
    out.push('\n');
    Ok(())
}

fn graph_comment(data: &GraphData, ctx: &DumpContext) -> String {
    let c = &ctx.colors;
    let mut notes = Vec::new();
    if let Some(original) = &data.original {
        notes.push(format!("substitutes {original}"));
    }
    let constants: Vec<_> = (0..data.parameters.len())
        .filter(|&i| data.parameters.is_constant(i))
        .map(|i| i.to_string())
        .collect();
    if !constants.is_empty() {
        notes.push(format!("const params {}", constants.join(",")));
    }
    if notes.is_empty() {
        return String::new();
    }
    format!("{}  ; {}{}", c.muted, notes.join("; "), c.reset)
}

fn dump_blob(out: &mut String, container: &Container, ctx: &DumpContext) -> fmt::Result {
    let c = &ctx.colors;

    writeln!(out, "{}[blob]{}", c.heading, c.reset)?;
    writeln!(out, "size = {}", container.blob().len())?;
    let classes: Vec<_> = container.node_classes().iter().map(|k| k.name()).collect();
    writeln!(out, "node_classes = [{}]", classes.join(", "))
}
