//! Graph metadata registry.
//!
//! Maps each canonical method key to where its graph lives in the blob.
//! Static methods have exactly one graph. Virtual methods may have one graph
//! per receiver type, kept in an index-addressable vector.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use snipgraph_core::MethodKey;

/// Per-parameter flags of a snippet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Option<String>,
    pub constant: bool,
    pub varargs: bool,
    pub non_null: bool,
}

impl Parameter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn constant(mut self) -> Self {
        self.constant = true;
        self
    }

    pub fn varargs(mut self) -> Self {
        self.varargs = true;
        self
    }

    pub fn non_null(mut self) -> Self {
        self.non_null = true;
        self
    }
}

/// Parameter info for one snippet. For instance methods, index 0 is the receiver.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterInfo {
    params: Vec<Parameter>,
}

impl ParameterInfo {
    pub fn new(params: impl IntoIterator<Item = Parameter>) -> Self {
        Self {
            params: params.into_iter().collect(),
        }
    }

    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn is_constant(&self, idx: usize) -> bool {
        self.params.get(idx).is_some_and(|p| p.constant)
    }

    pub fn is_varargs(&self, idx: usize) -> bool {
        self.params.get(idx).is_some_and(|p| p.varargs)
    }

    pub fn is_non_null(&self, idx: usize) -> bool {
        self.params.get(idx).is_some_and(|p| p.non_null)
    }

    pub fn name(&self, idx: usize) -> Option<&str> {
        self.params.get(idx).and_then(|p| p.name.as_deref())
    }

    /// Drop parameter names; they are only kept for debugging.
    pub fn clear_names(&mut self) {
        for p in &mut self.params {
            p.name = None;
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverVariant {
    pub receiver: String,
    pub offset: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GraphVariants {
    Static { offset: u32 },
    Virtual(Vec<ReceiverVariant>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphData {
    /// Method this graph substitutes, if any.
    pub original: Option<MethodKey>,
    pub parameters: ParameterInfo,
    pub variants: GraphVariants,
}

impl GraphData {
    pub fn is_static(&self) -> bool {
        matches!(self.variants, GraphVariants::Static { .. })
    }

    /// Select the graph offset for a receiver type.
    fn offset_for(&self, key: &MethodKey, receiver: Option<&str>) -> Result<u32, LookupError> {
        match &self.variants {
            GraphVariants::Static { offset } => {
                debug_assert!(
                    receiver.is_none(),
                    "receiver {receiver:?} supplied for static graph {key}"
                );
                Ok(*offset)
            }
            GraphVariants::Virtual(entries) => receiver
                .and_then(|r| entries.iter().find(|e| e.receiver == r))
                .map(|e| e.offset)
                .ok_or_else(|| LookupError::AmbiguousReceiver {
                    key: key.clone(),
                    receiver: receiver.map(str::to_string),
                }),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("conflicting static graph for {key}: offset {existing} vs {offset}")]
    StaticConflict {
        key: MethodKey,
        existing: u32,
        offset: u32,
    },
    #[error("conflicting graph for {key} with receiver {receiver}: offset {existing} vs {offset}")]
    ReceiverConflict {
        key: MethodKey,
        receiver: String,
        existing: u32,
        offset: u32,
    },
    #[error("{key} registered both as static and as virtual")]
    ShapeConflict { key: MethodKey },
    #[error("conflicting original method or parameter info for {key}")]
    MetadataConflict { key: MethodKey },
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    #[error("no graph registered for {0}")]
    NotFound(MethodKey),
    #[error("no graph variant of {key} for receiver {receiver:?}")]
    AmbiguousReceiver {
        key: MethodKey,
        receiver: Option<String>,
    },
}

/// Result of a successful lookup.
#[derive(Clone, Copy, Debug)]
pub struct Lookup<'a> {
    pub data: &'a GraphData,
    pub offset: u32,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GraphRegistry {
    entries: IndexMap<MethodKey, GraphData>,
}

impl GraphRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a graph. Registering an identical entry twice is a no-op.
    pub fn register(
        &mut self,
        key: MethodKey,
        offset: u32,
        original: Option<MethodKey>,
        parameters: ParameterInfo,
        receiver: Option<&str>,
    ) -> Result<(), RegistryError> {
        let Some(existing) = self.entries.get_mut(&key) else {
            let variants = match receiver {
                None => GraphVariants::Static { offset },
                Some(r) => GraphVariants::Virtual(vec![ReceiverVariant {
                    receiver: r.to_string(),
                    offset,
                }]),
            };
            self.entries.insert(
                key,
                GraphData {
                    original,
                    parameters,
                    variants,
                },
            );
            return Ok(());
        };

        if existing.original != original || existing.parameters != parameters {
            return Err(RegistryError::MetadataConflict { key });
        }

        match (&mut existing.variants, receiver) {
            (GraphVariants::Static { offset: prev }, None) => {
                if *prev != offset {
                    return Err(RegistryError::StaticConflict {
                        existing: *prev,
                        key,
                        offset,
                    });
                }
                Ok(())
            }
            (GraphVariants::Virtual(entries), Some(r)) => {
                match entries.iter().find(|e| e.receiver == r) {
                    Some(e) if e.offset == offset => Ok(()),
                    Some(e) => Err(RegistryError::ReceiverConflict {
                        existing: e.offset,
                        key,
                        receiver: r.to_string(),
                        offset,
                    }),
                    None => {
                        entries.push(ReceiverVariant {
                            receiver: r.to_string(),
                            offset,
                        });
                        Ok(())
                    }
                }
            }
            _ => Err(RegistryError::ShapeConflict { key }),
        }
    }

    pub fn lookup(
        &self,
        key: &MethodKey,
        receiver: Option<&str>,
    ) -> Result<Lookup<'_>, LookupError> {
        let data = self
            .entries
            .get(key)
            .ok_or_else(|| LookupError::NotFound(key.clone()))?;
        let offset = data.offset_for(key, receiver)?;
        Ok(Lookup { data, offset })
    }

    pub fn get(&self, key: &MethodKey) -> Option<&GraphData> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &MethodKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&MethodKey, &GraphData)> {
        self.entries.iter()
    }

    /// Every graph offset in registration order.
    pub fn offsets(&self) -> impl Iterator<Item = (&MethodKey, Option<&str>, u32)> {
        self.entries.iter().flat_map(|(key, data)| {
            let items: Vec<_> = match &data.variants {
                GraphVariants::Static { offset } => vec![(key, None, *offset)],
                GraphVariants::Virtual(entries) => entries
                    .iter()
                    .map(|e| (key, Some(e.receiver.as_str()), e.offset))
                    .collect(),
            };
            items
        })
    }
}
