//! Per-decode state: lazy object pulls and symbolic resolution.

use std::collections::HashMap;
use std::fmt::Display;

use snipgraph_bytecode::{
    CodecError, Container, ObjectIndex, StampRef, SymbolicField, SymbolicMethod, SymbolicRef,
    SymbolicStamp, TableEntry,
};
use snipgraph_core::{
    FieldHandle, MethodHandle, Object, ObjectConstant, ObjectStamp, Stamp, StampPair, TypeHandle,
};

use super::{DecodeError, DecodeOptions, NotDefined, Resolver};

/// Failure raised from inside the codec's pull callback.
#[derive(Debug)]
pub(super) enum PullError {
    Codec(CodecError),
    Decode(DecodeError),
}

impl From<CodecError> for PullError {
    fn from(err: CodecError) -> Self {
        PullError::Codec(err)
    }
}

impl From<DecodeError> for PullError {
    fn from(err: DecodeError) -> Self {
        PullError::Decode(err)
    }
}

/// Owned by the decoding thread. The only shared state it touches is the
/// per-slot cache, and only when cache replacement is allowed.
pub(super) struct DecodeContext<'a> {
    container: &'a Container,
    resolver: &'a dyn Resolver,
    accessing: &'a [TypeHandle],
    options: DecodeOptions,
    /// Slots resolved by this decode but not published.
    memo: HashMap<ObjectIndex, Object>,
    resolved: usize,
}

impl<'a> DecodeContext<'a> {
    pub(super) fn new(
        container: &'a Container,
        resolver: &'a dyn Resolver,
        accessing: &'a [TypeHandle],
        options: DecodeOptions,
    ) -> Self {
        Self {
            container,
            resolver,
            accessing,
            options,
            memo: HashMap::new(),
            resolved: 0,
        }
    }

    /// Placeholders resolved (not served from cache) during this decode.
    pub(super) fn resolved_count(&self) -> usize {
        self.resolved
    }

    pub(super) fn pull(&mut self, index: ObjectIndex) -> Result<Object, PullError> {
        let table = self.container.objects();
        let slot = table
            .get(index)
            .ok_or(CodecError::ObjectIndexOutOfRange {
                index: index.0,
                len: table.len(),
            })?;

        if let Some(cached) = slot.cached() {
            return Ok(cached.clone());
        }
        if let Some(memo) = self.memo.get(&index) {
            return Ok(memo.clone());
        }

        match slot.entry() {
            TableEntry::Null => Ok(Object::Null),
            TableEntry::Plain(object) => Ok(object.clone()),
            TableEntry::Symbolic(symbolic) => {
                let object = self.resolve_symbolic(symbolic)?;
                self.resolved += 1;
                if self.options.cache_replacement_allowed() {
                    return Ok(slot.publish(object).clone());
                }
                self.memo.insert(index, object.clone());
                Ok(object)
            }
            TableEntry::Wrapped(constant) => {
                let object = Object::Constant(self.resolve_wrapped(constant)?);
                self.memo.insert(index, object.clone());
                Ok(object)
            }
        }
    }

    fn resolve_symbolic(&self, symbolic: &SymbolicRef) -> Result<Object, DecodeError> {
        tracing::trace!(%symbolic, "resolving placeholder");
        Ok(match symbolic {
            SymbolicRef::Type(t) => Object::Type(self.resolve_type(&t.name)?),
            SymbolicRef::Method(m) => Object::Method(self.resolve_method(m)?),
            SymbolicRef::Field(f) => Object::Field(self.resolve_field(f)?),
            SymbolicRef::FieldLocation(f) => Object::FieldLocation(self.resolve_field(f)?),
            SymbolicRef::Stamp(s) => Object::Stamp(Stamp::Object(self.resolve_stamp(s)?)),
            SymbolicRef::StampPair { trusted, unchecked } => Object::StampPair(StampPair::new(
                self.resolve_stamp_ref(trusted)?,
                self.resolve_stamp_ref(unchecked)?,
            )),
        })
    }

    fn resolve_wrapped(&self, constant: &ObjectConstant) -> Result<ObjectConstant, DecodeError> {
        if let Some(kind) = constant.auxiliary_kind()
            && !self.options.counters_are_enabled()
        {
            return Ok(kind.disabled());
        }
        self.resolver
            .resolve_constant(constant)
            .map_err(|cause| DecodeError::UnresolvableSymbol {
                symbol: format!("constant {constant}"),
                tried: Vec::new(),
                cause,
            })
    }

    pub(super) fn resolve_type(&self, name: &str) -> Result<TypeHandle, DecodeError> {
        if let Some(handle) = self.container.snippet_types().type_handle(name) {
            return Ok(handle);
        }
        self.first_success(format_args!("type {name}"), |accessing| {
            self.resolver.resolve_type(name, accessing)
        })
    }

    pub(super) fn resolve_method(&self, m: &SymbolicMethod) -> Result<MethodHandle, DecodeError> {
        let snippet_types = self.container.snippet_types();
        if let Some(handle) = snippet_types.method_handle(&m.declaring, &m.name, &m.descriptor) {
            return Ok(handle);
        }
        let declaring = self.resolve_type(&m.declaring)?;
        self.first_success(format_args!("method {}", m.key()), |accessing| {
            self.resolver
                .resolve_method(&declaring, &m.name, &m.descriptor, accessing)
        })
    }

    fn resolve_field(&self, f: &SymbolicField) -> Result<FieldHandle, DecodeError> {
        let declaring = self.resolve_type(&f.declaring)?;
        let field_type = self.resolve_type(&f.field_type)?;
        self.first_success(
            format_args!("field {}.{}", f.declaring, f.name),
            |accessing| {
                self.resolver
                    .resolve_field(&declaring, &f.name, &field_type, f.is_static, accessing)
            },
        )
    }

    fn resolve_stamp(&self, s: &SymbolicStamp) -> Result<ObjectStamp, DecodeError> {
        Ok(ObjectStamp {
            type_: Some(self.resolve_type(&s.type_name)?),
            exact: s.exact,
            non_null: s.non_null,
            always_null: s.always_null,
        })
    }

    fn resolve_stamp_ref(&self, stamp: &StampRef) -> Result<Stamp, DecodeError> {
        match stamp {
            StampRef::Plain(s) => Ok(s.clone()),
            StampRef::Symbolic(s) => Ok(Stamp::Object(self.resolve_stamp(s)?)),
        }
    }

    /// Try each accessing type in order; the first success wins.
    fn first_success<T>(
        &self,
        symbol: impl Display,
        resolve: impl Fn(&TypeHandle) -> Result<T, NotDefined>,
    ) -> Result<T, DecodeError> {
        let mut last = None;
        for accessing in self.accessing {
            match resolve(accessing) {
                Ok(value) => return Ok(value),
                Err(cause) => {
                    tracing::trace!(%symbol, accessing = accessing.name(), %cause, "not visible");
                    last = Some(cause);
                }
            }
        }
        let symbol = symbol.to_string();
        Err(DecodeError::UnresolvableSymbol {
            tried: self.accessing.iter().map(|t| t.name().to_string()).collect(),
            cause: last.unwrap_or_else(|| NotDefined(symbol.clone())),
            symbol,
        })
    }
}
