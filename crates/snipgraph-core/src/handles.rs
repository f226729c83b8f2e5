//! Process-bound handles.
//!
//! A handle names a type, method or field *and* carries an opaque identity
//! that only means something inside the process that created it. Handles are
//! what graphs hold while they live in a compiler; they never cross the
//! container boundary as-is.

use serde::{Deserialize, Serialize};

use crate::MethodKey;

const PRIMITIVES: &[&str] = &[
    "boolean", "byte", "char", "short", "int", "long", "float", "double", "void",
];

/// Where a type handle came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeOrigin {
    /// Loaded by the running process.
    Runtime,
    /// Synthesized from the container's snippet type registry.
    Snippet,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeHandle {
    name: String,
    id: u64,
    origin: TypeOrigin,
}

impl TypeHandle {
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
            origin: TypeOrigin::Runtime,
        }
    }

    pub fn snippet(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
            origin: TypeOrigin::Snippet,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn origin(&self) -> TypeOrigin {
        self.origin
    }

    pub fn is_array(&self) -> bool {
        self.name.ends_with("[]")
    }

    pub fn is_primitive(&self) -> bool {
        is_primitive_name(&self.name)
    }

    /// Name of the array component, one dimension down.
    pub fn component_name(&self) -> Option<&str> {
        self.name.strip_suffix("[]")
    }

    /// Name with every array dimension stripped.
    pub fn elemental_name(&self) -> &str {
        self.name.trim_end_matches("[]")
    }
}

pub fn is_primitive_name(name: &str) -> bool {
    PRIMITIVES.contains(&name)
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodHandle {
    declaring: TypeHandle,
    name: String,
    descriptor: String,
    is_static: bool,
    id: u64,
}

impl MethodHandle {
    pub fn new(
        declaring: TypeHandle,
        name: impl Into<String>,
        descriptor: impl Into<String>,
        is_static: bool,
        id: u64,
    ) -> Self {
        Self {
            declaring,
            name: name.into(),
            descriptor: descriptor.into(),
            is_static,
            id,
        }
    }

    pub fn declaring(&self) -> &TypeHandle {
        &self.declaring
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Canonical key; equal for any two handles naming the same method.
    pub fn key(&self) -> MethodKey {
        MethodKey::new(self.declaring.name(), &self.name, &self.descriptor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldHandle {
    declaring: TypeHandle,
    name: String,
    field_type: TypeHandle,
    is_static: bool,
    id: u64,
}

impl FieldHandle {
    pub fn new(
        declaring: TypeHandle,
        name: impl Into<String>,
        field_type: TypeHandle,
        is_static: bool,
        id: u64,
    ) -> Self {
        Self {
            declaring,
            name: name.into(),
            field_type,
            is_static,
            id,
        }
    }

    pub fn declaring(&self) -> &TypeHandle {
        &self.declaring
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> &TypeHandle {
        &self.field_type
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn id(&self) -> u64 {
        self.id
    }
}
