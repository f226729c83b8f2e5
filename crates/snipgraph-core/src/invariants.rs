//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::{Block, BlockId, Graph, Node, NodeId};

impl Graph {
    pub(crate) fn ensure_node(&self, id: NodeId) -> &Node {
        self.node(id).unwrap_or_else(|| {
            panic!(
                "Graph: node {} referenced before it was added ({} nodes)",
                id.as_u32(),
                self.node_count()
            )
        })
    }

    pub(crate) fn ensure_node_mut(&mut self, id: NodeId) -> &mut Node {
        let count = self.node_count();
        self.nodes_mut()
            .nth(id.index())
            .unwrap_or_else(|| panic!("Graph: node {} out of range ({count} nodes)", id.as_u32()))
    }

    pub(crate) fn ensure_block(&self, id: BlockId) -> &Block {
        self.raw_blocks().get(id.index()).unwrap_or_else(|| {
            panic!(
                "Graph: block {} out of range ({} blocks)",
                id.as_u32(),
                self.block_count()
            )
        })
    }

    pub(crate) fn ensure_block_mut(&mut self, id: BlockId) -> &mut Block {
        let count = self.block_count();
        self.blocks_mut()
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("Graph: block {} out of range ({count} blocks)", id.as_u32()))
    }
}
