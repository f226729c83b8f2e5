//! Build-time round-trip verification.
//!
//! Each graph is encoded alone, decoded back through a restricted view of the
//! producer, and compared to the original through canonical renderings.

use std::collections::HashSet;

use parking_lot::Mutex;
use snipgraph_bytecode::{Container, ContainerParts, GraphEncoder, GraphRegistry, ObjectTable};
use snipgraph_core::{FieldHandle, MethodHandle, MethodKey, ObjectConstant, TypeHandle};
use snipgraph_decoder::{ContainerDecode, DecodeOptions, DecodeRequest, NotDefined, Resolver};

use crate::canonical::{canonical_graph_string, compare_graph_strings};
use crate::{EncodeError, EncoderConfig, SnippetRegistration, SymbolicObjectFilter};

/// Type name of enum-keyed maps; their iteration order is identity-bound.
const ENUM_MAP: &str = "java.util.EnumMap";

/// Outcome of one round trip. Mismatches are soft failures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoundTrip {
    Identical,
    Mismatch { method: MethodKey, report: String },
}

impl RoundTrip {
    pub fn is_mismatch(&self) -> bool {
        matches!(self, RoundTrip::Mismatch { .. })
    }
}

/// Producer resolver that only re-materializes constants known to be safe.
///
/// A constant is safe when its type is compiler-internal, on the safe-class
/// list, or when it was already approved earlier.
pub struct RestrictedReflection<'a> {
    inner: &'a dyn Resolver,
    config: &'a EncoderConfig,
    safe: Mutex<HashSet<ObjectConstant>>,
}

impl<'a> RestrictedReflection<'a> {
    pub fn new(inner: &'a dyn Resolver, config: &'a EncoderConfig) -> Self {
        Self {
            inner,
            config,
            safe: Mutex::new(HashSet::new()),
        }
    }

    /// Approve a constant ahead of time.
    pub fn trust(&self, constant: ObjectConstant) {
        self.safe.lock().insert(constant);
    }

    pub fn safe_count(&self) -> usize {
        self.safe.lock().len()
    }
}

impl Resolver for RestrictedReflection<'_> {
    fn resolve_type(&self, name: &str, accessing: &TypeHandle) -> Result<TypeHandle, NotDefined> {
        self.inner.resolve_type(name, accessing)
    }

    fn resolve_method(
        &self,
        declaring: &TypeHandle,
        name: &str,
        descriptor: &str,
        accessing: &TypeHandle,
    ) -> Result<MethodHandle, NotDefined> {
        self.inner
            .resolve_method(declaring, name, descriptor, accessing)
    }

    fn resolve_field(
        &self,
        declaring: &TypeHandle,
        name: &str,
        field_type: &TypeHandle,
        is_static: bool,
        accessing: &TypeHandle,
    ) -> Result<FieldHandle, NotDefined> {
        self.inner
            .resolve_field(declaring, name, field_type, is_static, accessing)
    }

    fn resolve_constant(&self, constant: &ObjectConstant) -> Result<ObjectConstant, NotDefined> {
        if constant.type_name == ENUM_MAP {
            return Err(NotDefined(format!(
                "{constant} (enum-keyed maps cannot be re-materialized)"
            )));
        }
        let mut safe = self.safe.lock();
        let allowed = self.config.is_compiler_type(&constant.type_name)
            || self.config.is_safe_class(&constant.type_name)
            || safe.contains(constant);
        if !allowed {
            return Err(NotDefined(constant.to_string()));
        }
        let resolved = self.inner.resolve_constant(constant)?;
        safe.insert(resolved.clone());
        Ok(resolved)
    }
}

/// Encode `registration` in isolation, decode it back and compare.
pub fn verify_round_trip(
    config: &EncoderConfig,
    registration: &SnippetRegistration,
    producer: &dyn Resolver,
) -> Result<RoundTrip, EncodeError> {
    let key = registration.key();

    let (offset, parts) = GraphEncoder::encode_single(&registration.graph);
    let mut filter = SymbolicObjectFilter::new(config);
    let mut entries = Vec::with_capacity(parts.objects.len());
    for object in &parts.objects {
        let entry = filter.filter(object).map_err(|cause| EncodeError::Filter {
            key: key.clone(),
            cause,
        })?;
        entries.push(entry);
    }
    let mut graphs = GraphRegistry::new();
    graphs.register(
        key.clone(),
        offset,
        registration.original.as_ref().map(MethodHandle::key),
        registration.parameters.clone(),
        registration.receiver.as_ref().map(TypeHandle::name),
    )?;
    let container = Container::new(ContainerParts {
        blob: parts.blob,
        objects: ObjectTable::new(entries),
        node_classes: parts.node_classes,
        graphs,
        snippet_types: filter.into_snippet_types(),
    });

    let reflection = RestrictedReflection::new(producer, config);
    let mut request = DecodeRequest::new(registration.method.clone())
        .options(DecodeOptions::new().counters_enabled(true).verify(false));
    if let Some(receiver) = &registration.receiver {
        request = request.receiver(receiver.clone());
    }
    if let Some(original) = &registration.original {
        request = request.original(original.clone());
    }
    let decoded = container
        .decode(&request, &reflection)
        .map_err(|cause| EncodeError::RoundTrip {
            key: key.clone(),
            cause,
        })?;

    let expected = canonical_graph_string(&registration.graph, config.check_constants);
    let actual = canonical_graph_string(&decoded.graph, config.check_constants);
    let Some(report) = compare_graph_strings(
        &format!("round trip of {key}"),
        "encoded",
        &expected,
        "decoded",
        &actual,
    ) else {
        tracing::trace!(%key, "round trip identical");
        return Ok(RoundTrip::Identical);
    };

    tracing::warn!(%key, "{report}");
    Ok(RoundTrip::Mismatch {
        method: key,
        report,
    })
}
