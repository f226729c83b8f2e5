//! Canonical graph rendering and comparison.
//!
//! Two graphs that mean the same thing render to the same string regardless
//! of which process's handles they hold: only node kinds, field names and
//! block structure are printed.

use std::fmt::{self, Write as _};

use similar::TextDiff;
use snipgraph_core::{Graph, Node, NodeKind, Object};

/// Node kinds that carry no observable behavior of their own.
fn is_excluded(kind: NodeKind) -> bool {
    matches!(
        kind,
        NodeKind::Proxy | NodeKind::VirtualObject | NodeKind::FullInfopoint | NodeKind::Parameter
    )
}

/// Render `graph` block by block.
///
/// Partial intrinsic call targets print as `MethodCallTarget`, the form they
/// take after decoding. With `check_constants`, every constant node is listed
/// in a sorted header.
pub fn canonical_graph_string(graph: &Graph, check_constants: bool) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = render_blocks(&mut out, graph);

    if !check_constants {
        return out;
    }
    let mut constants: Vec<_> = graph
        .nodes()
        .filter(|(_, n)| n.kind == NodeKind::Constant)
        .map(|(_, n)| render_constant(n))
        .collect();
    constants.sort();

    let mut header = format!("{} constants:\n", constants.len());
    for c in constants {
        header.push_str(&c);
        header.push('\n');
    }
    header + &out
}

fn render_blocks(out: &mut String, graph: &Graph) -> fmt::Result {
    let mut canon_id = 0usize;
    for (id, block) in graph.blocks() {
        write!(out, "Block B{}", id.as_u32())?;
        if id.index() == 0 {
            out.push_str(" *");
        }
        out.push_str(" ->");
        for succ in &block.successors {
            write!(out, " B{}", succ.as_u32())?;
        }
        out.push('\n');

        for node_id in &block.nodes {
            let Some(node) = graph.node(*node_id) else {
                continue;
            };
            if node.kind == NodeKind::Constant || is_excluded(node.kind) {
                continue;
            }
            writeln!(out, "  {canon_id}|{}", render_node(node))?;
            canon_id += 1;
        }
    }
    Ok(())
}

fn render_node(node: &Node) -> String {
    let name = match node.kind {
        NodeKind::PartialIntrinsicCallTarget => NodeKind::MethodCallTarget.name(),
        kind => kind.name(),
    };
    match node.field() {
        Some(field) if node.kind.is_field_access() => format!("{name}#{}", field.name()),
        _ => name.to_string(),
    }
}

fn render_constant(node: &Node) -> String {
    let values: Vec<_> = node.objects.iter().map(render_object).collect();
    values.join(" ")
}

fn render_object(object: &Object) -> String {
    match object {
        Object::Null => "null".to_string(),
        Object::Int(v) => v.to_string(),
        Object::Bool(v) => v.to_string(),
        Object::Str(s) => format!("{s:?}"),
        Object::NamedLocation(name) => name.clone(),
        Object::Type(t) => t.name().to_string(),
        Object::Method(m) => m.key().to_string(),
        Object::Field(f) | Object::FieldLocation(f) => {
            format!("{}.{}", f.declaring().name(), f.name())
        }
        Object::Stamp(s) => s.to_string(),
        Object::StampPair(p) => format!("{} / {}", p.trusted, p.unchecked),
        Object::Constant(c) => c.to_string(),
        other => other.kind_name().to_string(),
    }
}

/// Describe where two canonical renderings diverge, or `None` if they match.
///
/// The first differing line of each side is marked with `<<<`, and a unified
/// diff follows the two listings.
pub fn compare_graph_strings(
    what: &str,
    expected_label: &str,
    expected: &str,
    actual_label: &str,
    actual: &str,
) -> Option<String> {
    if expected == actual {
        return None;
    }
    let mut expected_lines: Vec<String> = expected.lines().map(str::to_string).collect();
    let mut actual_lines: Vec<String> = actual.lines().map(str::to_string).collect();

    let common = expected_lines.len().min(actual_lines.len());
    let first = (0..common)
        .find(|&i| expected_lines[i] != actual_lines[i])
        .unwrap_or(common);
    for lines in [&mut expected_lines, &mut actual_lines] {
        if lines.len() <= first {
            lines.resize(first + 1, String::new());
        }
        lines[first].push_str(" <<<");
    }

    let diff = TextDiff::from_lines(expected, actual)
        .unified_diff()
        .header(expected_label, actual_label)
        .to_string();

    Some(format!(
        "mismatch in {what}:\n========= expected ({expected_label}) =========\n{}\n\n========= actual ({actual_label}) =========\n{}\n\n========= diff =========\n{diff}",
        expected_lines.join("\n"),
        actual_lines.join("\n"),
    ))
}
