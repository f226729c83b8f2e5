//! Byte-level graph codec.
//!
//! Graphs are written one after another into a single shared blob. Each
//! graph is addressed by the byte offset where its encoding starts. Objects
//! and node classes are not written inline; the blob stores indices into the
//! shared object table and the node-class registry instead.
//!
//! Wire layout of one graph (all integers are unsigned LEB128):
//!
//! ```text
//! node_count
//!   { class  input_count input*  object_count object_index* } × node_count
//! assumption_count  object_index*
//! block_count
//!   { node_count node_id*  successor_count block_id* } × block_count
//! ```

mod reader;
mod table_builder;
mod varint;
mod writer;

pub use reader::GraphDecoder;
pub use table_builder::{NodeClassRegistry, ObjectTableBuilder};
pub use writer::{EncodedParts, GraphEncoder};

/// Malformed blob contents.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    #[error("unexpected end of blob at byte {0}")]
    UnexpectedEnd(usize),
    #[error("varint overflow at byte {0}")]
    VarintOverflow(usize),
    #[error("graph offset {offset} is outside the blob ({len} bytes)")]
    OffsetOutOfRange { offset: u32, len: usize },
    #[error("unknown node class {0}")]
    UnknownNodeClass(u32),
    #[error("object index {index} out of range ({len} entries)")]
    ObjectIndexOutOfRange { index: u32, len: usize },
    #[error("node {node} references missing node {target}")]
    DanglingNode { node: u32, target: u32 },
    #[error("block {block} references missing {what} {target}")]
    DanglingBlock {
        block: u32,
        what: &'static str,
        target: u32,
    },
}
