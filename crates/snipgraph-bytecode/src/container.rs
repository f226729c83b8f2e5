//! The encoded snippets container.
//!
//! A [`Container`] is the frozen output of an encoding session: the graph
//! blob, the shared object table, the node-class registry, the metadata
//! registry and the snippet type registry. Apart from the per-slot resolution
//! cache it is immutable.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use snipgraph_core::NodeKind;

use crate::codec::GraphDecoder;
use crate::constants::{HEADER_SIZE, VERSION};
use crate::header::Header;
use crate::registry::GraphRegistry;
use crate::snippet_types::SnippetTypeRegistry;
use crate::table::ObjectTable;

/// Container load/store error.
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("invalid magic: expected SNPG")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u32),
    #[error("file too small: {0} bytes (minimum {HEADER_SIZE})")]
    FileTooSmall(usize),
    #[error("size mismatch: header says {header} bytes, got {actual}")]
    SizeMismatch { header: u32, actual: usize },
    #[error("checksum mismatch: header says {expected:#010x}, payload hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
    #[error("payload error: {0}")]
    Payload(#[from] postcard::Error),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Inputs to [`Container::new`].
#[derive(Debug, Default)]
pub struct ContainerParts {
    pub blob: Vec<u8>,
    pub objects: ObjectTable,
    pub node_classes: Vec<NodeKind>,
    pub graphs: GraphRegistry,
    pub snippet_types: SnippetTypeRegistry,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Container {
    blob: Vec<u8>,
    objects: ObjectTable,
    node_classes: Vec<NodeKind>,
    graphs: GraphRegistry,
    snippet_types: SnippetTypeRegistry,
}

impl Container {
    pub fn new(parts: ContainerParts) -> Self {
        Self {
            blob: parts.blob,
            objects: parts.objects,
            node_classes: parts.node_classes,
            graphs: parts.graphs,
            snippet_types: parts.snippet_types,
        }
    }

    pub fn blob(&self) -> &[u8] {
        &self.blob
    }

    pub fn objects(&self) -> &ObjectTable {
        &self.objects
    }

    pub fn node_classes(&self) -> &[NodeKind] {
        &self.node_classes
    }

    pub fn graphs(&self) -> &GraphRegistry {
        &self.graphs
    }

    pub fn snippet_types(&self) -> &SnippetTypeRegistry {
        &self.snippet_types
    }

    /// Codec reader bound to this container's blob and node classes.
    pub fn graph_decoder(&self) -> GraphDecoder<'_> {
        GraphDecoder::new(&self.blob, &self.node_classes)
    }

    /// Serialize to the on-disk format. The resolution cache is not persisted.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ContainerError> {
        let payload = postcard::to_allocvec(self)?;
        let header = Header::for_payload(&payload);

        let mut out = Vec::with_capacity(HEADER_SIZE + payload.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&payload);
        Ok(out)
    }

    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), ContainerError> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ContainerError> {
        let Some((head, payload)) = bytes.split_first_chunk::<HEADER_SIZE>() else {
            return Err(ContainerError::FileTooSmall(bytes.len()));
        };
        let header = Header::from_bytes(head);

        if !header.validate_magic() {
            return Err(ContainerError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(ContainerError::UnsupportedVersion(header.version));
        }
        if header.total_size as usize != bytes.len()
            || header.payload_size as usize != payload.len()
        {
            return Err(ContainerError::SizeMismatch {
                header: header.total_size,
                actual: bytes.len(),
            });
        }
        if !header.validate_checksum(payload) {
            return Err(ContainerError::ChecksumMismatch {
                expected: header.checksum,
                actual: crc32fast::hash(payload),
            });
        }

        Ok(postcard::from_bytes(payload)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContainerError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }
}
