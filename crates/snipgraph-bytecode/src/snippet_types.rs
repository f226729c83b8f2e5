//! Synthetic types for compiler-internal classes.
//!
//! Graphs may reference compiler-internal types that the consumer process
//! never loads as ordinary runtime types. The encoder records each such type
//! here with the methods graphs call on it, and the decoder binds references
//! to these entries before asking the consumer.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use snipgraph_core::{MethodHandle, TypeHandle};

use crate::constants::SNIPPET_ID_BASE;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetMethod {
    pub name: String,
    pub descriptor: String,
    pub is_static: bool,
    pub id: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetType {
    pub name: String,
    pub id: u64,
    pub methods: Vec<SnippetMethod>,
    /// Name of the array type whose component this is, once created.
    pub array_of: Option<String>,
    /// Component type name, for array types.
    pub component: Option<String>,
}

impl SnippetType {
    pub fn handle(&self) -> TypeHandle {
        TypeHandle::snippet(self.name.clone(), self.id)
    }

    pub fn method(&self, name: &str, descriptor: &str) -> Option<&SnippetMethod> {
        self.methods
            .iter()
            .find(|m| m.name == name && m.descriptor == descriptor)
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SnippetTypeRegistry {
    types: IndexMap<String, SnippetType>,
    next_id: u64,
}

impl SnippetTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> u64 {
        let id = SNIPPET_ID_BASE + self.next_id;
        self.next_id += 1;
        id
    }

    /// Get or create the entry for `name`, creating component types for arrays.
    pub fn lookup_or_create(&mut self, name: &str) -> &SnippetType {
        if !self.types.contains_key(name) {
            let component = name.strip_suffix("[]").map(|c| {
                self.lookup_or_create(c);
                c.to_string()
            });
            let id = self.fresh_id();
            if let Some(c) = &component
                && let Some(ct) = self.types.get_mut(c)
            {
                ct.array_of = Some(name.to_string());
            }
            self.types.insert(
                name.to_string(),
                SnippetType {
                    name: name.to_string(),
                    id,
                    methods: Vec::new(),
                    array_of: None,
                    component,
                },
            );
        }
        &self.types[name]
    }

    /// Record a method declared on `declaring`, creating the type if needed.
    pub fn add_method(&mut self, declaring: &str, name: &str, descriptor: &str, is_static: bool) {
        self.lookup_or_create(declaring);
        if self.types[declaring].method(name, descriptor).is_some() {
            return;
        }
        let id = self.fresh_id();
        if let Some(ty) = self.types.get_mut(declaring) {
            ty.methods.push(SnippetMethod {
                name: name.to_string(),
                descriptor: descriptor.to_string(),
                is_static,
                id,
            });
        }
    }

    pub fn get(&self, name: &str) -> Option<&SnippetType> {
        self.types.get(name)
    }

    pub fn type_handle(&self, name: &str) -> Option<TypeHandle> {
        self.types.get(name).map(SnippetType::handle)
    }

    pub fn method_handle(&self, declaring: &str, name: &str, descriptor: &str) -> Option<MethodHandle> {
        let ty = self.types.get(declaring)?;
        let m = ty.method(name, descriptor)?;
        Some(MethodHandle::new(
            ty.handle(),
            m.name.clone(),
            m.descriptor.clone(),
            m.is_static,
            m.id,
        ))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SnippetType> {
        self.types.values()
    }
}
