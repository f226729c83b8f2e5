//! Encoder configuration.

use snipgraph_core::{AuxiliaryKind, MethodKey};

/// Build-time encoder settings.
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// Re-decode every graph and diff canonical renderings.
    pub(crate) verify_round_trip: bool,
    /// Include embedded constants in canonical renderings.
    pub(crate) check_constants: bool,
    /// Keep parameter names in the persisted metadata.
    pub(crate) keep_parameter_names: bool,
    /// Types whose constants the round-trip reflection may read.
    pub(crate) safe_classes: Vec<String>,
    /// Name prefixes marking compiler-internal types.
    pub(crate) compiler_prefixes: Vec<String>,
    /// Compiler-internal types named exactly.
    pub(crate) compiler_types: Vec<String>,
    /// Calls a snippet may leave in place instead of inlining.
    pub(crate) deferred_calls: Vec<MethodKey>,
    /// Types recorded in the snippet type registry up front.
    pub(crate) always_available: Vec<String>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            verify_round_trip: true,
            check_constants: false,
            keep_parameter_names: false,
            safe_classes: vec!["java.lang.String".to_string()],
            compiler_prefixes: Vec::new(),
            compiler_types: AuxiliaryKind::ALL
                .iter()
                .map(|k| k.type_name().to_string())
                .collect(),
            deferred_calls: Vec::new(),
            always_available: Vec::new(),
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verify_round_trip(mut self, value: bool) -> Self {
        self.verify_round_trip = value;
        self
    }

    pub fn check_constants(mut self, value: bool) -> Self {
        self.check_constants = value;
        self
    }

    pub fn keep_parameter_names(mut self, value: bool) -> Self {
        self.keep_parameter_names = value;
        self
    }

    pub fn safe_class(mut self, name: impl Into<String>) -> Self {
        self.safe_classes.push(name.into());
        self
    }

    pub fn compiler_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.compiler_prefixes.push(prefix.into());
        self
    }

    pub fn compiler_type(mut self, name: impl Into<String>) -> Self {
        self.compiler_types.push(name.into());
        self
    }

    pub fn deferred_call(mut self, key: MethodKey) -> Self {
        self.deferred_calls.push(key);
        self
    }

    pub fn always_available(mut self, name: impl Into<String>) -> Self {
        self.always_available.push(name.into());
        self
    }

    pub fn verifies_round_trip(&self) -> bool {
        self.verify_round_trip
    }

    pub fn checks_constants(&self) -> bool {
        self.check_constants
    }

    /// Whether `name` (or its elemental type, for arrays) is compiler-internal.
    pub fn is_compiler_type(&self, name: &str) -> bool {
        let elemental = name.trim_end_matches("[]");
        self.compiler_types.iter().any(|t| t == elemental)
            || self
                .compiler_prefixes
                .iter()
                .any(|p| elemental.starts_with(p.as_str()))
    }

    pub fn is_safe_class(&self, name: &str) -> bool {
        self.safe_classes.iter().any(|c| c == name)
    }

    pub fn is_deferred(&self, key: &MethodKey) -> bool {
        self.deferred_calls.contains(key)
    }
}
