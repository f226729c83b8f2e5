#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures for snipgraph.
//!
//! Three layers:
//! - **Identity**: canonical method keys and process-bound handles
//!   (`TypeHandle`, `MethodHandle`, `FieldHandle`)
//! - **Objects**: everything a graph node may embed (`Object`, `Stamp`, constants)
//! - **Graphs**: a small block-structured IR that the codec serializes

mod colors;
mod descriptor;
pub mod graph;
mod handles;
mod interner;
mod invariants;
mod object;

#[cfg(test)]
mod descriptor_tests;
#[cfg(test)]
mod graph_tests;
#[cfg(test)]
mod interner_tests;

pub use colors::Colors;
pub use descriptor::{KeyError, KeyParts, MethodDescriptor, MethodKey, descriptor_to_type_name};
pub use graph::{Block, BlockId, Graph, Node, NodeId, NodeKind};
pub use handles::{FieldHandle, MethodHandle, TypeHandle, TypeOrigin, is_primitive_name};
pub use interner::{Interner, Symbol};
pub use object::{
    AuxiliaryKind, InternalKind, InternalObject, Object, ObjectConstant, ObjectStamp,
    SourcePosition, Stamp, StampPair,
};
