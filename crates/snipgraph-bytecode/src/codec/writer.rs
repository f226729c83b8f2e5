//! Graph encoding.

use snipgraph_core::{Graph, NodeKind, Object};

use super::table_builder::{NodeClassRegistry, ObjectTableBuilder};
use super::varint;

/// Everything produced by a [`GraphEncoder`] session.
#[derive(Debug)]
pub struct EncodedParts {
    pub blob: Vec<u8>,
    /// Raw objects in table order; callers filter these before persisting.
    pub objects: Vec<Object>,
    pub node_classes: Vec<NodeKind>,
}

/// Writes graphs into one shared blob.
#[derive(Debug, Default)]
pub struct GraphEncoder {
    blob: Vec<u8>,
    objects: ObjectTableBuilder,
    classes: NodeClassRegistry,
    graphs: usize,
}

impl GraphEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `graph` to the blob and return its start offset.
    pub fn encode(&mut self, graph: &Graph) -> u32 {
        let offset = self.blob.len() as u32;
        let buf = &mut self.blob;

        varint::write_usize(buf, graph.node_count());
        for (_, node) in graph.nodes() {
            let class = self.classes.intern(node.kind);
            varint::write(buf, u32::from(class.0));
            varint::write_usize(buf, node.inputs.len());
            for input in &node.inputs {
                varint::write(buf, input.as_u32());
            }
            varint::write_usize(buf, node.objects.len());
            for object in &node.objects {
                varint::write(buf, self.objects.intern(object).0);
            }
        }

        varint::write_usize(buf, graph.assumptions().len());
        for assumption in graph.assumptions() {
            varint::write(buf, self.objects.intern(assumption).0);
        }

        varint::write_usize(buf, graph.block_count());
        for (_, block) in graph.blocks() {
            varint::write_usize(buf, block.nodes.len());
            for id in &block.nodes {
                varint::write(buf, id.as_u32());
            }
            varint::write_usize(buf, block.successors.len());
            for succ in &block.successors {
                varint::write(buf, succ.as_u32());
            }
        }

        self.graphs += 1;
        offset
    }

    /// Number of graphs written so far.
    pub fn graph_count(&self) -> usize {
        self.graphs
    }

    pub fn blob_len(&self) -> usize {
        self.blob.len()
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    pub fn into_parts(self) -> EncodedParts {
        EncodedParts {
            blob: self.blob,
            objects: self.objects.into_objects(),
            node_classes: self.classes.into_classes(),
        }
    }

    /// Encode one graph with a fresh encoder.
    pub fn encode_single(graph: &Graph) -> (u32, EncodedParts) {
        let mut encoder = Self::new();
        let offset = encoder.encode(graph);
        (offset, encoder.into_parts())
    }
}
