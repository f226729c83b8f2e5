//! Structural checks run on every graph before it is encoded.

use snipgraph_core::{Graph, MethodKey, NodeKind};

use crate::{EncodeError, EncoderConfig};

/// Reject graphs that could not be decoded safely in another process.
///
/// Every call target must be the snippet itself, the method it substitutes,
/// or a call the configuration allows to stay out of line.
pub(crate) fn check_graph(
    config: &EncoderConfig,
    key: &MethodKey,
    original: Option<&MethodKey>,
    graph: &Graph,
) -> Result<(), EncodeError> {
    let invalid = |reason: String| EncodeError::InvalidGraph {
        key: key.clone(),
        reason,
    };

    if !graph.assumptions().is_empty() {
        return Err(invalid(format!(
            "{} assumptions recorded",
            graph.assumptions().len()
        )));
    }

    for (id, node) in graph.nodes() {
        let at = id.as_u32();
        if node.kind == NodeKind::Compression {
            return Err(invalid(format!("node {at}: compression node")));
        }
        if node.stamps().any(|s| s.is_narrow()) {
            return Err(invalid(format!("node {at}: narrow oop stamp")));
        }
        if node.kind == NodeKind::Read && node.stamps().any(|s| s.is_object()) {
            return Err(invalid(format!("node {at}: lowered read with an object stamp")));
        }
        if let Some(target) = node.call_target() {
            let callee = target.key();
            let inlined_away =
                &callee == key || original == Some(&callee) || config.is_deferred(&callee);
            if !inlined_away {
                return Err(EncodeError::NotInlined {
                    method: callee,
                    snippet: key.clone(),
                });
            }
        }
    }
    Ok(())
}
