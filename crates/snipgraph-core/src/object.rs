//! Objects embedded in graph nodes.
//!
//! Nodes reference everything beyond their edges (constants, handles, stamps,
//! debug info) through [`Object`]. Some objects are plain data that mean the
//! same thing in any process; others are handles bound to the producer and
//! must be turned into symbolic references before they are persisted.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{FieldHandle, MethodHandle, MethodKey, TypeHandle};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Object {
    Null,
    Int(i64),
    Bool(bool),
    Str(String),
    /// Memory location identity that is a plain name (e.g. `ANY_LOCATION`).
    NamedLocation(String),
    Type(TypeHandle),
    Method(MethodHandle),
    Field(FieldHandle),
    /// Memory location identity of a field.
    FieldLocation(FieldHandle),
    Stamp(Stamp),
    StampPair(StampPair),
    /// Heap object constant embedded in the graph.
    Constant(ObjectConstant),
    SourcePosition(SourcePosition),
    /// Compiler-internal object that cannot leave the producer process.
    Internal(InternalObject),
}

impl Object {
    /// Short tag for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Object::Null => "null",
            Object::Int(_) => "int",
            Object::Bool(_) => "bool",
            Object::Str(_) => "string",
            Object::NamedLocation(_) => "named-location",
            Object::Type(_) => "type",
            Object::Method(_) => "method",
            Object::Field(_) => "field",
            Object::FieldLocation(_) => "field-location",
            Object::Stamp(_) => "stamp",
            Object::StampPair(_) => "stamp-pair",
            Object::Constant(_) => "constant",
            Object::SourcePosition(_) => "source-position",
            Object::Internal(_) => "internal",
        }
    }

    pub fn as_method(&self) -> Option<&MethodHandle> {
        match self {
            Object::Method(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_field(&self) -> Option<&FieldHandle> {
        match self {
            Object::Field(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_stamp(&self) -> Option<&Stamp> {
        match self {
            Object::Stamp(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_constant(&self) -> Option<&ObjectConstant> {
        match self {
            Object::Constant(c) => Some(c),
            _ => None,
        }
    }
}

/// Value-range description attached to a node.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stamp {
    Void,
    Int { bits: u8 },
    Float { bits: u8 },
    Object(ObjectStamp),
    /// Compressed reference; never valid inside a snippet.
    NarrowOop(ObjectStamp),
}

impl Stamp {
    pub fn object(stamp: ObjectStamp) -> Self {
        Stamp::Object(stamp)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Stamp::Object(_))
    }

    pub fn is_narrow(&self) -> bool {
        matches!(self, Stamp::NarrowOop(_))
    }

    /// Declared type of an object stamp, if any.
    pub fn object_type(&self) -> Option<&TypeHandle> {
        match self {
            Stamp::Object(s) | Stamp::NarrowOop(s) => s.type_.as_ref(),
            _ => None,
        }
    }
}

impl fmt::Display for Stamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stamp::Void => f.write_str("void"),
            Stamp::Int { bits } => write!(f, "i{bits}"),
            Stamp::Float { bits } => write!(f, "f{bits}"),
            Stamp::Object(s) => write!(f, "{s}"),
            Stamp::NarrowOop(s) => write!(f, "narrow {s}"),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectStamp {
    pub type_: Option<TypeHandle>,
    pub exact: bool,
    pub non_null: bool,
    pub always_null: bool,
}

impl ObjectStamp {
    pub fn of(type_: TypeHandle) -> Self {
        Self {
            type_: Some(type_),
            ..Self::default()
        }
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn non_null(mut self) -> Self {
        self.non_null = true;
        self
    }
}

impl fmt::Display for ObjectStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.type_.as_ref().map_or("-", |t| t.name());
        write!(f, "a{}{}", if self.exact { "#" } else { "" }, name)?;
        if self.non_null {
            f.write_str(" !")?;
        }
        if self.always_null {
            f.write_str(" null")?;
        }
        Ok(())
    }
}

/// Stamp as declared (`trusted`) and as observed without checks (`unchecked`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StampPair {
    pub trusted: Stamp,
    pub unchecked: Stamp,
}

impl StampPair {
    pub fn new(trusted: Stamp, unchecked: Stamp) -> Self {
        Self { trusted, unchecked }
    }
}

/// Opaque heap constant: the producer knows its type and a stable rendering.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectConstant {
    pub type_name: String,
    pub value: String,
}

impl ObjectConstant {
    pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            value: value.into(),
        }
    }

    /// Whether this constant is a snippet counter or histogram.
    pub fn auxiliary_kind(&self) -> Option<AuxiliaryKind> {
        AuxiliaryKind::ALL
            .into_iter()
            .find(|k| k.type_name() == self.type_name)
    }
}

impl fmt::Display for ObjectConstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.type_name, self.value)
    }
}

/// Instrumentation objects that fold away when counters are unavailable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AuxiliaryKind {
    Counter,
    Histogram,
}

impl AuxiliaryKind {
    pub const ALL: [AuxiliaryKind; 2] = [AuxiliaryKind::Counter, AuxiliaryKind::Histogram];

    pub fn type_name(self) -> &'static str {
        match self {
            AuxiliaryKind::Counter => "SnippetCounter",
            AuxiliaryKind::Histogram => "SnippetIntegerHistogram",
        }
    }

    /// The no-op instance that replaces live instrumentation.
    pub fn disabled(self) -> ObjectConstant {
        ObjectConstant::new(self.type_name(), "DISABLED")
    }
}

/// Bytecode position inside a method; only meaningful to the producer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourcePosition {
    pub method: MethodKey,
    pub bci: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InternalKind {
    Signature,
    Bytecode,
    VmConfig,
    ForeignCalls,
    WordTypes,
    TargetDescription,
    EnumMap,
    IdentityHashMap,
}

impl InternalKind {
    pub fn name(self) -> &'static str {
        match self {
            InternalKind::Signature => "signature",
            InternalKind::Bytecode => "bytecode",
            InternalKind::VmConfig => "vm config",
            InternalKind::ForeignCalls => "foreign calls provider",
            InternalKind::WordTypes => "word types",
            InternalKind::TargetDescription => "target description",
            InternalKind::EnumMap => "enum map",
            InternalKind::IdentityHashMap => "identity hash map",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternalObject {
    pub kind: InternalKind,
    pub description: String,
}

impl InternalObject {
    pub fn new(kind: InternalKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }
}
