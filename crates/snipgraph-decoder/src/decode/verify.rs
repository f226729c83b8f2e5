//! Structural checks on decoded graphs.
//!
//! Runs in debug builds, or whenever [`DecodeOptions::verify`] forces it.
//!
//! [`DecodeOptions::verify`]: super::DecodeOptions::verify

use snipgraph_core::{Graph, MethodKey, NodeKind, Object};

use super::DecodeError;

/// Reject node kinds and objects that must never survive decoding.
pub fn verify_graph(graph: &Graph, key: &MethodKey) -> Result<(), DecodeError> {
    for (id, node) in graph.nodes() {
        let at = id.as_u32();
        match node.kind {
            NodeKind::PartialIntrinsicCallTarget => {
                return Err(DecodeError::structural(
                    key,
                    format!("node {at}: partial intrinsic call was not lowered"),
                ));
            }
            NodeKind::Compression => {
                return Err(DecodeError::structural(
                    key,
                    format!("node {at}: compression node in snippet"),
                ));
            }
            NodeKind::Read if node.stamps().any(|s| s.is_object()) => {
                return Err(DecodeError::structural(
                    key,
                    format!("node {at}: lowered read with an object stamp"),
                ));
            }
            _ => {}
        }
        if let Some(stamp) = node.stamps().find(|s| s.is_narrow()) {
            return Err(DecodeError::structural(
                key,
                format!("node {at}: narrow oop stamp {stamp}"),
            ));
        }
        if let Some(leftover) = node.objects.iter().find(|o| is_producer_only(o)) {
            return Err(DecodeError::structural(
                key,
                format!("node {at}: leftover {} object", leftover.kind_name()),
            ));
        }
    }
    if let Some(leftover) = graph.assumptions().iter().find(|o| is_producer_only(o)) {
        return Err(DecodeError::structural(
            key,
            format!("leftover {} assumption", leftover.kind_name()),
        ));
    }
    Ok(())
}

fn is_producer_only(object: &Object) -> bool {
    matches!(object, Object::Internal(_) | Object::SourcePosition(_))
}
