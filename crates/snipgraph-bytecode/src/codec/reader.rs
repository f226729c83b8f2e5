//! Graph decoding.

use snipgraph_core::{Block, BlockId, Graph, Node, NodeId, NodeKind, Object};

use super::CodecError;
use super::varint::Cursor;
use crate::ids::ObjectIndex;

/// Reads graphs back out of a shared blob.
///
/// Objects are not materialized by the decoder itself: every object index
/// is handed to the caller's `pull` function, which decides how to turn the
/// table slot into a live object.
#[derive(Clone, Copy, Debug)]
pub struct GraphDecoder<'a> {
    blob: &'a [u8],
    node_classes: &'a [NodeKind],
}

impl<'a> GraphDecoder<'a> {
    pub fn new(blob: &'a [u8], node_classes: &'a [NodeKind]) -> Self {
        Self { blob, node_classes }
    }

    pub fn decode<E, F>(&self, offset: u32, mut pull: F) -> Result<Graph, E>
    where
        E: From<CodecError>,
        F: FnMut(ObjectIndex) -> Result<Object, E>,
    {
        if offset as usize >= self.blob.len() {
            return Err(CodecError::OffsetOutOfRange {
                offset,
                len: self.blob.len(),
            }
            .into());
        }
        let mut cur = Cursor::new(self.blob, offset as usize);

        let node_count = cur.read_len()?;
        let mut nodes = Vec::with_capacity(node_count);
        for _ in 0..node_count {
            let class = cur.read()?;
            let kind = *self
                .node_classes
                .get(class as usize)
                .ok_or(CodecError::UnknownNodeClass(class))?;

            let input_count = cur.read_len()?;
            let mut inputs = Vec::with_capacity(input_count);
            for _ in 0..input_count {
                inputs.push(NodeId::new(cur.read()?));
            }

            let object_count = cur.read_len()?;
            let mut objects = Vec::with_capacity(object_count);
            for _ in 0..object_count {
                objects.push(pull(ObjectIndex(cur.read()?))?);
            }

            nodes.push(Node {
                kind,
                inputs,
                objects,
            });
        }

        for (idx, node) in nodes.iter().enumerate() {
            if let Some(bad) = node.inputs.iter().find(|i| i.index() >= node_count) {
                return Err(CodecError::DanglingNode {
                    node: idx as u32,
                    target: bad.as_u32(),
                }
                .into());
            }
        }

        let assumption_count = cur.read_len()?;
        let mut assumptions = Vec::with_capacity(assumption_count);
        for _ in 0..assumption_count {
            assumptions.push(pull(ObjectIndex(cur.read()?))?);
        }

        let block_count = cur.read_len()?;
        let mut blocks = Vec::with_capacity(block_count);
        for b in 0..block_count {
            let mut block = Block::default();
            for _ in 0..cur.read_len()? {
                let id = cur.read()?;
                if id as usize >= node_count {
                    return Err(dangling_block(b, "node", id).into());
                }
                block.nodes.push(NodeId::new(id));
            }
            for _ in 0..cur.read_len()? {
                let id = cur.read()?;
                if id as usize >= block_count {
                    return Err(dangling_block(b, "block", id).into());
                }
                block.successors.push(BlockId::new(id));
            }
            blocks.push(block);
        }

        Ok(Graph::from_parts(nodes, blocks, assumptions))
    }
}

fn dangling_block(block: usize, what: &'static str, target: u32) -> CodecError {
    CodecError::DanglingBlock {
        block: block as u32,
        what,
        target,
    }
}
