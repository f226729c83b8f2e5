//! Minimal block-structured IR.
//!
//! A [`Graph`] owns a flat node arena and an ordered list of basic blocks.
//! Block 0 is the start block. Nodes listed in a block are fixed; nodes in no
//! block float (constants, parameters). Every non-edge payload of a node lives
//! in its `objects` vector.

use serde::{Deserialize, Serialize};

use crate::{FieldHandle, MethodHandle, Object, Stamp};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(u32);

impl BlockId {
    pub const START: BlockId = BlockId(0);

    pub fn new(index: u32) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// Node classes understood by the codec.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Start,
    Parameter,
    Constant,
    LoadField,
    StoreField,
    /// Lowered memory read.
    Read,
    /// Lowered memory write.
    Write,
    New,
    InstanceOf,
    Add,
    Sub,
    Compare,
    If,
    Merge,
    Phi,
    Proxy,
    VirtualObject,
    FullInfopoint,
    MethodCallTarget,
    /// Call back into the method a substitution replaces.
    PartialIntrinsicCallTarget,
    Invoke,
    ForeignCall,
    Return,
    Deoptimize,
    /// Pointer compression; never valid inside a snippet.
    Compression,
}

impl NodeKind {
    pub const ALL: [NodeKind; 25] = [
        NodeKind::Start,
        NodeKind::Parameter,
        NodeKind::Constant,
        NodeKind::LoadField,
        NodeKind::StoreField,
        NodeKind::Read,
        NodeKind::Write,
        NodeKind::New,
        NodeKind::InstanceOf,
        NodeKind::Add,
        NodeKind::Sub,
        NodeKind::Compare,
        NodeKind::If,
        NodeKind::Merge,
        NodeKind::Phi,
        NodeKind::Proxy,
        NodeKind::VirtualObject,
        NodeKind::FullInfopoint,
        NodeKind::MethodCallTarget,
        NodeKind::PartialIntrinsicCallTarget,
        NodeKind::Invoke,
        NodeKind::ForeignCall,
        NodeKind::Return,
        NodeKind::Deoptimize,
        NodeKind::Compression,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Start => "Start",
            NodeKind::Parameter => "Parameter",
            NodeKind::Constant => "Constant",
            NodeKind::LoadField => "LoadField",
            NodeKind::StoreField => "StoreField",
            NodeKind::Read => "Read",
            NodeKind::Write => "Write",
            NodeKind::New => "New",
            NodeKind::InstanceOf => "InstanceOf",
            NodeKind::Add => "Add",
            NodeKind::Sub => "Sub",
            NodeKind::Compare => "Compare",
            NodeKind::If => "If",
            NodeKind::Merge => "Merge",
            NodeKind::Phi => "Phi",
            NodeKind::Proxy => "Proxy",
            NodeKind::VirtualObject => "VirtualObject",
            NodeKind::FullInfopoint => "FullInfopoint",
            NodeKind::MethodCallTarget => "MethodCallTarget",
            NodeKind::PartialIntrinsicCallTarget => "PartialIntrinsicCallTarget",
            NodeKind::Invoke => "Invoke",
            NodeKind::ForeignCall => "ForeignCall",
            NodeKind::Return => "Return",
            NodeKind::Deoptimize => "Deoptimize",
            NodeKind::Compression => "Compression",
        }
    }

    pub fn from_name(name: &str) -> Option<NodeKind> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn is_call_target(self) -> bool {
        matches!(
            self,
            NodeKind::MethodCallTarget | NodeKind::PartialIntrinsicCallTarget
        )
    }

    pub fn is_field_access(self) -> bool {
        matches!(self, NodeKind::LoadField | NodeKind::StoreField)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub inputs: Vec<NodeId>,
    pub objects: Vec<Object>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            inputs: Vec::new(),
            objects: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: impl IntoIterator<Item = NodeId>) -> Self {
        self.inputs.extend(inputs);
        self
    }

    pub fn with_object(mut self, object: Object) -> Self {
        self.objects.push(object);
        self
    }

    /// Field accessed by a field load/store.
    pub fn field(&self) -> Option<&FieldHandle> {
        self.objects.iter().find_map(Object::as_field)
    }

    /// Target of a call target node.
    pub fn call_target(&self) -> Option<&MethodHandle> {
        if !self.kind.is_call_target() {
            return None;
        }
        self.objects.iter().find_map(Object::as_method)
    }

    /// Index of a parameter node, carried as its first integer object.
    pub fn parameter_index(&self) -> Option<usize> {
        if self.kind != NodeKind::Parameter {
            return None;
        }
        self.objects.iter().find_map(|o| match o {
            Object::Int(i) => usize::try_from(*i).ok(),
            _ => None,
        })
    }

    pub fn stamp(&self) -> Option<&Stamp> {
        self.objects.iter().find_map(Object::as_stamp)
    }

    /// Every stamp the node carries, including both halves of stamp pairs.
    pub fn stamps(&self) -> impl Iterator<Item = &Stamp> {
        self.objects.iter().flat_map(|o| match o {
            Object::Stamp(s) => vec![s],
            Object::StampPair(p) => vec![&p.trusted, &p.unchecked],
            _ => Vec::new(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Block {
    pub nodes: Vec<NodeId>,
    pub successors: Vec<BlockId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    nodes: Vec<Node>,
    blocks: Vec<Block>,
    assumptions: Vec<Object>,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    /// Empty graph with a start block.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            blocks: vec![Block::default()],
            assumptions: Vec::new(),
        }
    }

    /// Rebuild a graph from its raw parts, as the codec does.
    pub fn from_parts(nodes: Vec<Node>, blocks: Vec<Block>, assumptions: Vec<Object>) -> Self {
        Self {
            nodes,
            blocks,
            assumptions,
        }
    }

    pub fn add_block(&mut self) -> BlockId {
        let id = BlockId(self.blocks.len() as u32);
        self.blocks.push(Block::default());
        id
    }

    /// Append a fixed node to `block`.
    pub fn add_node(&mut self, block: BlockId, node: Node) -> NodeId {
        let id = self.push(node);
        self.ensure_block_mut(block).nodes.push(id);
        id
    }

    /// Add a node that belongs to no block.
    pub fn add_floating(&mut self, node: Node) -> NodeId {
        self.push(node)
    }

    fn push(&mut self, node: Node) -> NodeId {
        for &input in &node.inputs {
            self.ensure_node(input);
        }
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    pub fn connect(&mut self, from: BlockId, to: BlockId) {
        self.ensure_block(to);
        self.ensure_block_mut(from).successors.push(to);
    }

    pub fn add_assumption(&mut self, assumption: Object) {
        self.assumptions.push(assumption);
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Replace a node in place; edges to it stay valid.
    pub fn replace_node(&mut self, id: NodeId, node: Node) -> Node {
        std::mem::replace(self.ensure_node_mut(id), node)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (NodeId(i as u32), n))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.nodes.iter_mut()
    }

    pub fn blocks(&self) -> impl Iterator<Item = (BlockId, &Block)> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(i, b)| (BlockId(i as u32), b))
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Nodes that belong to no block, in id order.
    pub fn floating_nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        let mut fixed = vec![false; self.nodes.len()];
        for block in &self.blocks {
            for id in &block.nodes {
                if let Some(slot) = fixed.get_mut(id.index()) {
                    *slot = true;
                }
            }
        }
        self.nodes().filter(move |(id, _)| !fixed[id.index()])
    }

    pub fn assumptions(&self) -> &[Object] {
        &self.assumptions
    }

    /// Every object embedded in the graph, assumptions first.
    pub fn objects(&self) -> impl Iterator<Item = &Object> {
        self.assumptions
            .iter()
            .chain(self.nodes.iter().flat_map(|n| n.objects.iter()))
    }

    pub fn raw_blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn raw_nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub(crate) fn blocks_mut(&mut self) -> &mut [Block] {
        &mut self.blocks
    }
}
