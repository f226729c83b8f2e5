//! Object table entries.
//!
//! Handles cannot cross processes, so the table stores them as symbolic
//! references: plain names that the consumer re-binds to its own handles.

use std::fmt;

use serde::{Deserialize, Serialize};

use snipgraph_core::{MethodKey, Object, ObjectConstant, Stamp};

/// One slot's persisted content.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TableEntry {
    /// Source position or other producer-only data that was dropped.
    #[default]
    Null,
    /// Process-agnostic data, used as is.
    Plain(Object),
    /// Placeholder awaiting resolution.
    Symbolic(SymbolicRef),
    /// Heap constant the consumer must re-materialize.
    Wrapped(ObjectConstant),
}

impl TableEntry {
    pub fn is_symbolic(&self) -> bool {
        matches!(self, TableEntry::Symbolic(_) | TableEntry::Wrapped(_))
    }
}

impl fmt::Display for TableEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableEntry::Null => f.write_str("null"),
            TableEntry::Plain(obj) => write!(f, "{}", describe_plain(obj)),
            TableEntry::Symbolic(r) => write!(f, "{r}"),
            TableEntry::Wrapped(c) => write!(f, "wrapped {c}"),
        }
    }
}

fn describe_plain(obj: &Object) -> String {
    match obj {
        Object::Null => "null".to_string(),
        Object::Int(v) => format!("int {v}"),
        Object::Bool(v) => format!("bool {v}"),
        Object::Str(s) => format!("str {s:?}"),
        Object::NamedLocation(name) => format!("location {name}"),
        Object::Stamp(s) => format!("stamp {s}"),
        other => other.kind_name().to_string(),
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolicType {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolicMethod {
    pub declaring: String,
    pub name: String,
    pub descriptor: String,
}

impl SymbolicMethod {
    pub fn key(&self) -> MethodKey {
        MethodKey::new(&self.declaring, &self.name, &self.descriptor)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolicField {
    pub declaring: String,
    pub name: String,
    pub field_type: String,
    pub is_static: bool,
}

/// Object stamp with its type replaced by a name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SymbolicStamp {
    pub type_name: String,
    pub exact: bool,
    pub non_null: bool,
    pub always_null: bool,
}

/// One half of a stamp pair.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StampRef {
    Plain(Stamp),
    Symbolic(SymbolicStamp),
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymbolicRef {
    Type(SymbolicType),
    Method(SymbolicMethod),
    Field(SymbolicField),
    FieldLocation(SymbolicField),
    Stamp(SymbolicStamp),
    StampPair { trusted: StampRef, unchecked: StampRef },
}

impl SymbolicRef {
    /// Type name the placeholder is anchored on.
    pub fn primary_type(&self) -> &str {
        match self {
            SymbolicRef::Type(t) => &t.name,
            SymbolicRef::Method(m) => &m.declaring,
            SymbolicRef::Field(f) | SymbolicRef::FieldLocation(f) => &f.declaring,
            SymbolicRef::Stamp(s) => &s.type_name,
            SymbolicRef::StampPair { trusted, unchecked } => match (trusted, unchecked) {
                (StampRef::Symbolic(s), _) | (_, StampRef::Symbolic(s)) => &s.type_name,
                _ => "",
            },
        }
    }
}

impl fmt::Display for SymbolicRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SymbolicRef::Type(t) => write!(f, "type {}", t.name),
            SymbolicRef::Method(m) => write!(f, "method {}", m.key()),
            SymbolicRef::Field(fl) => write_field(f, "field", fl),
            SymbolicRef::FieldLocation(fl) => write_field(f, "location", fl),
            SymbolicRef::Stamp(s) => write!(f, "stamp {s}"),
            SymbolicRef::StampPair { trusted, unchecked } => {
                write!(f, "stamp-pair {trusted} / {unchecked}")
            }
        }
    }
}

fn write_field(f: &mut fmt::Formatter<'_>, tag: &str, field: &SymbolicField) -> fmt::Result {
    let stat = if field.is_static { "static " } else { "" };
    write!(
        f,
        "{tag} {stat}{}.{}: {}",
        field.declaring, field.name, field.field_type
    )
}

impl fmt::Display for SymbolicStamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a{}{}", if self.exact { "#" } else { "" }, self.type_name)?;
        if self.non_null {
            f.write_str(" !")?;
        }
        if self.always_null {
            f.write_str(" null")?;
        }
        Ok(())
    }
}

impl fmt::Display for StampRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StampRef::Plain(s) => write!(f, "{s}"),
            StampRef::Symbolic(s) => write!(f, "{s}"),
        }
    }
}
