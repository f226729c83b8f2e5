//! Rewrites applied to a freshly decoded graph.

use std::collections::BTreeMap;

use snipgraph_bytecode::ParameterInfo;
use snipgraph_core::{Graph, MethodHandle, MethodKey, Node, NodeId, NodeKind, Object};

use super::DecodeError;

/// Bind constant arguments, lower partial intrinsic calls and collect
/// self-recursive call sites.
pub(super) fn run(
    graph: &mut Graph,
    key: &MethodKey,
    original: Option<&MethodHandle>,
    arguments: &BTreeMap<usize, Object>,
    parameters: &ParameterInfo,
) -> Result<Vec<NodeId>, DecodeError> {
    bind_constant_parameters(graph, arguments, parameters);
    lower_partial_intrinsics(graph, key, original)?;
    Ok(self_calls(graph, original))
}

fn bind_constant_parameters(
    graph: &mut Graph,
    arguments: &BTreeMap<usize, Object>,
    parameters: &ParameterInfo,
) {
    if arguments.is_empty() {
        return;
    }
    let bound: Vec<_> = graph
        .nodes()
        .filter_map(|(id, node)| {
            let index = node.parameter_index()?;
            if !(parameters.is_constant(index) || parameters.is_varargs(index)) {
                return None;
            }
            arguments.get(&index).map(|value| (id, value.clone()))
        })
        .collect();

    for (id, value) in bound {
        tracing::trace!(node = id.as_u32(), "binding constant parameter");
        graph.replace_node(id, Node::new(NodeKind::Constant).with_object(value));
    }
}

fn lower_partial_intrinsics(
    graph: &mut Graph,
    key: &MethodKey,
    original: Option<&MethodHandle>,
) -> Result<(), DecodeError> {
    let partial: Vec<_> = graph
        .nodes()
        .filter(|(_, n)| n.kind == NodeKind::PartialIntrinsicCallTarget)
        .map(|(id, _)| id)
        .collect();
    if partial.is_empty() {
        return Ok(());
    }
    let Some(original) = original else {
        return Err(DecodeError::structural(
            key,
            "partial intrinsic call without an original method",
        ));
    };

    for id in partial {
        let Some(node) = graph.node(id) else {
            continue;
        };
        let mut objects: Vec<_> = node
            .objects
            .iter()
            .filter(|o| o.as_method().is_none())
            .cloned()
            .collect();
        objects.insert(0, Object::Method(original.clone()));
        let lowered = Node {
            kind: NodeKind::MethodCallTarget,
            inputs: node.inputs.clone(),
            objects,
        };
        graph.replace_node(id, lowered);
    }
    Ok(())
}

fn self_calls(graph: &Graph, original: Option<&MethodHandle>) -> Vec<NodeId> {
    let Some(original) = original else {
        return Vec::new();
    };
    let key = original.key();
    graph
        .nodes()
        .filter(|(_, n)| n.kind == NodeKind::MethodCallTarget)
        .filter(|(_, n)| n.call_target().is_some_and(|m| m.key() == key))
        .map(|(id, _)| id)
        .collect()
}
