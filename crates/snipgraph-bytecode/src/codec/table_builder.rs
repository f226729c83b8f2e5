//! Object table and node-class registry builders.

use indexmap::IndexSet;

use snipgraph_core::{NodeKind, Object};

use crate::ids::{NodeClassId, ObjectIndex};

/// Assigns dense indices to the distinct objects referenced by encoded graphs.
///
/// Objects are deduplicated by structural equality, so two nodes that embed
/// equal objects share one table slot. Indices are stable across every graph
/// written through the same builder.
#[derive(Debug, Default)]
pub struct ObjectTableBuilder {
    objects: IndexSet<Object>,
}

impl ObjectTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the index for an object.
    pub fn intern(&mut self, object: &Object) -> ObjectIndex {
        if let Some(idx) = self.objects.get_index_of(object) {
            return ObjectIndex(idx as u32);
        }
        let (idx, _) = self.objects.insert_full(object.clone());
        ObjectIndex(idx as u32)
    }

    pub fn get(&self, object: &Object) -> Option<ObjectIndex> {
        self.objects
            .get_index_of(object)
            .map(|idx| ObjectIndex(idx as u32))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects in index order.
    pub fn into_objects(self) -> Vec<Object> {
        self.objects.into_iter().collect()
    }
}

/// Node classes in first-use order.
#[derive(Debug, Default)]
pub struct NodeClassRegistry {
    classes: IndexSet<NodeKind>,
}

impl NodeClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn intern(&mut self, kind: NodeKind) -> NodeClassId {
        let (idx, _) = self.classes.insert_full(kind);
        NodeClassId(idx as u16)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn into_classes(self) -> Vec<NodeKind> {
        self.classes.into_iter().collect()
    }
}
