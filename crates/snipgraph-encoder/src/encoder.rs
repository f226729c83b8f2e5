//! Snippet encoder: collects graphs and freezes them into a container.

use indexmap::IndexMap;

use snipgraph_bytecode::{
    Container, ContainerParts, GraphEncoder, GraphRegistry, ObjectTable, ParameterInfo,
};
use snipgraph_core::{Graph, MethodDescriptor, MethodHandle, MethodKey, TypeHandle, is_primitive_name};
use snipgraph_decoder::Resolver;

use crate::checks::check_graph;
use crate::invariants::ensure_owner;
use crate::verify::{RoundTrip, verify_round_trip};
use crate::{EncodeError, EncoderConfig, SymbolicObjectFilter};

/// One graph offered to [`SnippetEncoder::register_snippet`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnippetRegistration {
    pub method: MethodHandle,
    /// Method this graph substitutes.
    pub original: Option<MethodHandle>,
    /// Receiver type for non-static snippets.
    pub receiver: Option<TypeHandle>,
    pub graph: Graph,
    pub parameters: ParameterInfo,
}

impl SnippetRegistration {
    pub fn new(method: MethodHandle, graph: Graph) -> Self {
        Self {
            method,
            original: None,
            receiver: None,
            graph,
            parameters: ParameterInfo::default(),
        }
    }

    pub fn original(mut self, original: MethodHandle) -> Self {
        self.original = Some(original);
        self
    }

    pub fn receiver(mut self, receiver: TypeHandle) -> Self {
        self.receiver = Some(receiver);
        self
    }

    pub fn parameters(mut self, parameters: ParameterInfo) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn key(&self) -> MethodKey {
        self.method.key()
    }

    fn receiver_name(&self) -> Option<&str> {
        self.receiver.as_ref().map(TypeHandle::name)
    }
}

/// Build-time owner of every snippet graph and of the snippet type registry.
///
/// Single-threaded. [`SnippetEncoder::freeze`] consumes the encoder.
#[derive(Debug)]
pub struct SnippetEncoder {
    config: EncoderConfig,
    /// Method that owns each key; a key never names two methods.
    owners: IndexMap<MethodKey, MethodHandle>,
    pending: Vec<SnippetRegistration>,
}

impl SnippetEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            owners: IndexMap::new(),
            pending: Vec::new(),
        }
    }

    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Number of distinct graphs registered.
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn register_snippet(&mut self, registration: SnippetRegistration) -> Result<(), EncodeError> {
        let key = registration.key();
        let method = &registration.method;

        // A non-static method without a receiver gets a static entry.
        if method.is_static() && registration.receiver.is_some() {
            return Err(EncodeError::StaticWithReceiver { key });
        }
        if let Some(owner) = self.owners.get(&key)
            && owner != method
        {
            return Err(EncodeError::DuplicateKey { key });
        }

        let receiver = registration.receiver_name();
        if let Some(existing) = self
            .pending
            .iter()
            .find(|p| p.key() == key && p.receiver_name() == receiver)
        {
            if *existing == registration {
                tracing::trace!(%key, "already registered");
                return Ok(());
            }
            return Err(EncodeError::ConflictingVariant {
                receiver: receiver.map(str::to_string),
                key,
            });
        }

        let original = registration.original.as_ref().map(MethodHandle::key);
        check_graph(&self.config, &key, original.as_ref(), &registration.graph)?;
        self.check_constant_parameters(&key, &registration)?;

        tracing::debug!(%key, ?receiver, nodes = registration.graph.node_count(), "registered snippet");
        self.owners.insert(key, registration.method.clone());
        self.pending.push(registration);
        Ok(())
    }

    /// Constant and varargs parameters must have primitive or compiler-internal
    /// types; varargs are judged by their elemental type.
    fn check_constant_parameters(
        &self,
        key: &MethodKey,
        registration: &SnippetRegistration,
    ) -> Result<(), EncodeError> {
        let method = &registration.method;
        let descriptor = MethodDescriptor::parse(method.descriptor())?;
        let receiver_slots = usize::from(!method.is_static());
        let params = &registration.parameters;

        for index in 0..params.len() {
            if !(params.is_constant(index) || params.is_varargs(index)) {
                continue;
            }
            let type_name = if index < receiver_slots {
                Some(method.declaring().name().to_string())
            } else {
                descriptor.param_type_name(index - receiver_slots)
            };
            let Some(type_name) = type_name else {
                continue;
            };
            let judged = if params.is_varargs(index) {
                type_name.trim_end_matches("[]")
            } else {
                type_name.as_str()
            };
            if !is_primitive_name(judged) && !self.config.is_compiler_type(judged) {
                return Err(EncodeError::NonConstantType {
                    key: key.clone(),
                    index,
                    type_name,
                });
            }
        }
        Ok(())
    }

    /// Encode every registered graph and freeze the result.
    pub fn freeze(self) -> Result<Container, EncodeError> {
        let mut filter = SymbolicObjectFilter::new(&self.config);
        let mut encoder = GraphEncoder::new();
        let mut graphs = GraphRegistry::new();

        for registration in &self.pending {
            let method = &registration.method;
            filter.record_type(method.declaring().name());
            record_parameter_types(&mut filter, registration)?;

            let offset = encoder.encode(&registration.graph);
            let mut parameters = registration.parameters.clone();
            if !self.config.keep_parameter_names {
                parameters.clear_names();
            }
            graphs.register(
                registration.key(),
                offset,
                registration.original.as_ref().map(MethodHandle::key),
                parameters,
                registration.receiver_name(),
            )?;
        }

        let parts = encoder.into_parts();
        let mut entries = Vec::with_capacity(parts.objects.len());
        for object in &parts.objects {
            let entry = filter.filter(object).map_err(|cause| EncodeError::Filter {
                key: ensure_owner(&self.pending, object),
                cause,
            })?;
            entries.push(entry);
        }

        tracing::info!(
            "Encoded {} snippet graphs using {} bytes with {} objects",
            self.pending.len(),
            parts.blob.len(),
            entries.len()
        );

        Ok(Container::new(ContainerParts {
            blob: parts.blob,
            objects: ObjectTable::new(entries),
            node_classes: parts.node_classes,
            graphs,
            snippet_types: filter.into_snippet_types(),
        }))
    }

    /// Run the round-trip verifier over every graph, then freeze.
    ///
    /// Mismatches are soft and returned alongside the container; resolution
    /// failures abort the build.
    pub fn freeze_verified(
        self,
        producer: &dyn Resolver,
    ) -> Result<(Container, Vec<RoundTrip>), EncodeError> {
        let mut mismatches = Vec::new();
        if self.config.verify_round_trip {
            for registration in &self.pending {
                let outcome = verify_round_trip(&self.config, registration, producer)?;
                if outcome.is_mismatch() {
                    mismatches.push(outcome);
                }
            }
        }
        Ok((self.freeze()?, mismatches))
    }
}

/// Record the types of constant and varargs parameters as snippet types.
fn record_parameter_types(
    filter: &mut SymbolicObjectFilter<'_>,
    registration: &SnippetRegistration,
) -> Result<(), EncodeError> {
    let method = &registration.method;
    let descriptor = MethodDescriptor::parse(method.descriptor())?;
    let receiver_slots = usize::from(!method.is_static());
    let params = &registration.parameters;
    for index in receiver_slots..params.len() {
        if !(params.is_constant(index) || params.is_varargs(index)) {
            continue;
        }
        if let Some(name) = descriptor.param_type_name(index - receiver_slots) {
            filter.record_type(name.trim_end_matches("[]"));
        }
    }
    Ok(())
}
