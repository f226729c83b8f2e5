//! Symbolic object filter.
//!
//! Rewrites every object headed for the shared table into a form that means
//! the same thing in any process. Handles become symbolic placeholders,
//! producer-only debug data is dropped, and compiler-internal objects that
//! cannot cross processes are rejected.
//!
//! Placeholders are interned by structure, so two handles naming the same
//! entity always map to one placeholder.

use snipgraph_bytecode::{
    SnippetTypeRegistry, StampRef, SymbolicField, SymbolicMethod, SymbolicRef, SymbolicStamp,
    SymbolicType, TableEntry,
};
use snipgraph_core::{
    FieldHandle, Interner, MethodHandle, Object, ObjectStamp, Stamp, StampPair, Symbol, TypeHandle,
};

use crate::{EncoderConfig, FilterError};

#[derive(Debug)]
pub struct SymbolicObjectFilter<'c> {
    config: &'c EncoderConfig,
    placeholders: Interner<SymbolicRef>,
    snippet_types: SnippetTypeRegistry,
}

impl<'c> SymbolicObjectFilter<'c> {
    pub fn new(config: &'c EncoderConfig) -> Self {
        let mut snippet_types = SnippetTypeRegistry::new();
        for name in &config.always_available {
            snippet_types.lookup_or_create(name);
        }
        Self {
            config,
            placeholders: Interner::new(),
            snippet_types,
        }
    }

    /// Map one object to its table entry.
    pub fn filter(&mut self, object: &Object) -> Result<TableEntry, FilterError> {
        let symbolic = match object {
            Object::Type(t) => self.symbolic_type(t),
            Object::Method(m) => self.symbolic_method(m),
            Object::Field(f) => SymbolicRef::Field(self.symbolic_field(f)),
            Object::FieldLocation(f) => SymbolicRef::FieldLocation(self.symbolic_field(f)),
            Object::Stamp(Stamp::Object(s)) if s.type_.is_some() => {
                match self.symbolic_stamp(s) {
                    Some(stamp) => SymbolicRef::Stamp(stamp),
                    None => return Ok(TableEntry::Plain(object.clone())),
                }
            }
            Object::StampPair(pair) if pair.trusted.is_object() => self.symbolic_pair(pair),
            Object::Constant(c) => return Ok(TableEntry::Wrapped(c.clone())),
            Object::SourcePosition(_) => return Ok(TableEntry::Null),
            Object::Internal(internal) => {
                return Err(FilterError {
                    kind: internal.kind,
                    description: internal.description.clone(),
                });
            }
            _ => return Ok(TableEntry::Plain(object.clone())),
        };
        let sym = self.placeholders.intern(symbolic);
        tracing::trace!(symbol = sym.as_u32(), "placeholder");
        Ok(TableEntry::Symbolic(self.placeholders.resolve(sym).clone()))
    }

    /// Symbol of an interned placeholder, if one was produced.
    pub fn placeholder(&self, symbolic: &SymbolicRef) -> Option<Symbol> {
        self.placeholders.get(symbolic)
    }

    pub fn placeholder_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Record a compiler-internal type in the snippet type registry.
    pub fn record_type(&mut self, name: &str) {
        if self.config.is_compiler_type(name) {
            self.snippet_types.lookup_or_create(name);
        }
    }

    pub fn snippet_types(&self) -> &SnippetTypeRegistry {
        &self.snippet_types
    }

    pub fn into_snippet_types(self) -> SnippetTypeRegistry {
        self.snippet_types
    }

    fn symbolic_type(&mut self, t: &TypeHandle) -> SymbolicRef {
        self.record_type(t.name());
        SymbolicRef::Type(SymbolicType {
            name: t.name().to_string(),
        })
    }

    fn symbolic_method(&mut self, m: &MethodHandle) -> SymbolicRef {
        let declaring = m.declaring().name();
        if self.config.is_compiler_type(declaring) {
            self.snippet_types
                .add_method(declaring, m.name(), m.descriptor(), m.is_static());
        }
        SymbolicRef::Method(SymbolicMethod {
            declaring: declaring.to_string(),
            name: m.name().to_string(),
            descriptor: m.descriptor().to_string(),
        })
    }

    fn symbolic_field(&mut self, f: &FieldHandle) -> SymbolicField {
        self.record_type(f.declaring().name());
        self.record_type(f.field_type().name());
        SymbolicField {
            declaring: f.declaring().name().to_string(),
            name: f.name().to_string(),
            field_type: f.field_type().name().to_string(),
            is_static: f.is_static(),
        }
    }

    fn symbolic_stamp(&mut self, s: &ObjectStamp) -> Option<SymbolicStamp> {
        let t = s.type_.as_ref()?;
        self.record_type(t.name());
        Some(SymbolicStamp {
            type_name: t.name().to_string(),
            exact: s.exact,
            non_null: s.non_null,
            always_null: s.always_null,
        })
    }

    fn stamp_ref(&mut self, stamp: &Stamp) -> StampRef {
        if let Stamp::Object(s) = stamp
            && let Some(symbolic) = self.symbolic_stamp(s)
        {
            return StampRef::Symbolic(symbolic);
        }
        StampRef::Plain(stamp.clone())
    }

    fn symbolic_pair(&mut self, pair: &StampPair) -> SymbolicRef {
        SymbolicRef::StampPair {
            trusted: self.stamp_ref(&pair.trusted),
            unchecked: self.stamp_ref(&pair.unchecked),
        }
    }
}
