//! Decode state machine.
//!
//! Lookup → resolve receiver → bind context → pull objects lazily →
//! post-process → verify → return.

mod context;
mod error;
mod options;
mod postprocess;
mod resolver;
mod verify;

#[cfg(test)]
mod decode_tests;
#[cfg(test)]
mod test_fixtures;

use snipgraph_bytecode::{Container, SymbolicMethod};
use snipgraph_core::{Graph, MethodHandle, MethodKey, NodeId};

pub use error::DecodeError;
pub use options::{DecodeOptions, DecodeRequest};
pub use resolver::{NotDefined, Resolver, TableResolver};
pub use verify::verify_graph;

use context::{DecodeContext, PullError};

/// A graph reconstituted in the consuming process.
#[derive(Clone, Debug)]
pub struct DecodedGraph {
    pub graph: Graph,
    pub method: MethodKey,
    /// Blob offset of the variant that was decoded.
    pub offset: u32,
    /// Method the graph substitutes, bound to a live handle.
    pub original: Option<MethodHandle>,
    /// Call targets that call back into the original method.
    pub self_calls: Vec<NodeId>,
}

/// Decoding entry point on a frozen container.
pub trait ContainerDecode {
    fn decode(
        &self,
        request: &DecodeRequest,
        resolver: &dyn Resolver,
    ) -> Result<DecodedGraph, DecodeError>;
}

impl ContainerDecode for Container {
    fn decode(
        &self,
        request: &DecodeRequest,
        resolver: &dyn Resolver,
    ) -> Result<DecodedGraph, DecodeError> {
        let method = request.method();
        let key = method.key();

        // Only virtual entries select by receiver; a static entry serves every receiver.
        let receiver = self
            .graphs()
            .get(&key)
            .filter(|data| !method.is_static() && !data.is_static())
            .and(request.receiver_type())
            .map(|t| t.name());
        let lookup = self.graphs().lookup(&key, receiver)?;
        tracing::debug!(%key, offset = lookup.offset, ?receiver, "decoding snippet graph");

        let options = request.decode_options();
        let accessing = request.accessing_types();
        let mut ctx = DecodeContext::new(self, resolver, &accessing, options);

        let mut graph = self
            .graph_decoder()
            .decode(lookup.offset, |idx| ctx.pull(idx))
            .map_err(|e| match e {
                PullError::Codec(cause) => DecodeError::Corrupt {
                    key: key.clone(),
                    cause,
                },
                PullError::Decode(e) => e,
            })?;

        let original = match (request.original_method(), &lookup.data.original) {
            (Some(m), _) => Some(m.clone()),
            (None, Some(original_key)) => Some(resolve_original(&ctx, original_key)?),
            (None, None) => None,
        };

        let self_calls = postprocess::run(
            &mut graph,
            &key,
            original.as_ref(),
            request.bound_arguments(),
            &lookup.data.parameters,
        )?;

        if options.verifies() {
            verify_graph(&graph, &key)?;
        }

        tracing::trace!(
            %key,
            nodes = graph.node_count(),
            resolved = ctx.resolved_count(),
            "decoded snippet graph"
        );
        Ok(DecodedGraph {
            graph,
            method: key,
            offset: lookup.offset,
            original,
            self_calls,
        })
    }
}

fn resolve_original(ctx: &DecodeContext<'_>, key: &MethodKey) -> Result<MethodHandle, DecodeError> {
    let parts = key.parts();
    let symbolic = SymbolicMethod {
        declaring: parts.declaring.to_string(),
        name: parts.name.to_string(),
        descriptor: parts.descriptor.to_string(),
    };
    ctx.resolve_method(&symbolic)
}
