//! Decode request and options.

use std::collections::BTreeMap;

use snipgraph_core::{MethodHandle, Object, TypeHandle};

/// Per-decode switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    allow_cache_replacement: bool,
    counters_enabled: bool,
    verify: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            allow_cache_replacement: false,
            counters_enabled: false,
            verify: cfg!(debug_assertions),
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish resolved placeholders into the container's shared cache.
    pub fn allow_cache_replacement(mut self, value: bool) -> Self {
        self.allow_cache_replacement = value;
        self
    }

    /// Keep snippet counters and histograms live instead of folding them.
    pub fn counters_enabled(mut self, value: bool) -> Self {
        self.counters_enabled = value;
        self
    }

    /// Run structural verification regardless of build profile.
    pub fn verify(mut self, value: bool) -> Self {
        self.verify = value;
        self
    }

    pub fn cache_replacement_allowed(&self) -> bool {
        self.allow_cache_replacement
    }

    pub fn counters_are_enabled(&self) -> bool {
        self.counters_enabled
    }

    pub fn verifies(&self) -> bool {
        self.verify
    }
}

/// What to decode and in which context.
#[derive(Clone, Debug)]
pub struct DecodeRequest {
    method: MethodHandle,
    receiver: Option<TypeHandle>,
    constant_arguments: BTreeMap<usize, Object>,
    accessing: Vec<TypeHandle>,
    original: Option<MethodHandle>,
    options: DecodeOptions,
}

impl DecodeRequest {
    pub fn new(method: MethodHandle) -> Self {
        Self {
            method,
            receiver: None,
            constant_arguments: BTreeMap::new(),
            accessing: Vec::new(),
            original: None,
            options: DecodeOptions::default(),
        }
    }

    /// Runtime type of the receiver; selects the variant of a virtual snippet.
    pub fn receiver(mut self, receiver: TypeHandle) -> Self {
        self.receiver = Some(receiver);
        self
    }

    /// Value for a constant or varargs parameter.
    pub fn constant_argument(mut self, index: usize, value: Object) -> Self {
        self.constant_arguments.insert(index, value);
        self
    }

    /// Values for leading parameters; `None` leaves a parameter unbound.
    pub fn constant_arguments(mut self, values: impl IntoIterator<Item = Option<Object>>) -> Self {
        for (index, value) in values.into_iter().enumerate() {
            if let Some(value) = value {
                self.constant_arguments.insert(index, value);
            }
        }
        self
    }

    /// Add an accessing type. Types are tried in the order they are added.
    pub fn accessing_type(mut self, accessing: TypeHandle) -> Self {
        self.accessing.push(accessing);
        self
    }

    /// Bind the substituted method directly instead of resolving it.
    pub fn original(mut self, original: MethodHandle) -> Self {
        self.original = Some(original);
        self
    }

    pub fn options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn method(&self) -> &MethodHandle {
        &self.method
    }

    pub fn receiver_type(&self) -> Option<&TypeHandle> {
        self.receiver.as_ref()
    }

    pub fn bound_arguments(&self) -> &BTreeMap<usize, Object> {
        &self.constant_arguments
    }

    pub fn original_method(&self) -> Option<&MethodHandle> {
        self.original.as_ref()
    }

    pub fn decode_options(&self) -> DecodeOptions {
        self.options
    }

    /// Accessing types to try, defaulting to the method's declaring type.
    pub fn accessing_types(&self) -> Vec<TypeHandle> {
        if self.accessing.is_empty() {
            vec![self.method.declaring().clone()]
        } else {
            self.accessing.clone()
        }
    }
}
