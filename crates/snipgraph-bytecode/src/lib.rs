#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Container format for snipgraph.
//!
//! This crate contains:
//! - The byte-level graph codec (shared blob + object indices)
//! - Object table entries, including symbolic placeholders and the
//!   per-slot resolution cache
//! - The graph metadata registry and the snippet type registry
//! - The [`Container`] itself, its on-disk format and a debug dump

pub mod codec;
mod constants;
mod container;
mod dump;
mod entry;
mod header;
mod ids;
mod registry;
mod snippet_types;
mod table;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod snippet_types_tests;

pub use codec::{CodecError, EncodedParts, GraphDecoder, GraphEncoder, ObjectTableBuilder};
pub use constants::{HEADER_SIZE, MAGIC, SNIPPET_ID_BASE, VERSION};
pub use container::{Container, ContainerError, ContainerParts};
pub use dump::dump;
pub use entry::{
    StampRef, SymbolicField, SymbolicMethod, SymbolicRef, SymbolicStamp, SymbolicType, TableEntry,
};
pub use header::Header;
pub use ids::{NodeClassId, ObjectIndex};
pub use registry::{
    GraphData, GraphRegistry, GraphVariants, Lookup, LookupError, Parameter, ParameterInfo,
    ReceiverVariant, RegistryError,
};
pub use snippet_types::{SnippetMethod, SnippetType, SnippetTypeRegistry};
pub use table::{ObjectSlot, ObjectTable};
