//! Shared object table with per-slot resolution cache.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use snipgraph_core::Object;

use crate::entry::TableEntry;
use crate::ids::ObjectIndex;

/// A table entry plus a write-once cell for its resolved form.
///
/// The cell is process-local and never persisted.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectSlot {
    entry: TableEntry,
    #[serde(skip)]
    resolved: OnceLock<Object>,
}

impl ObjectSlot {
    pub fn new(entry: TableEntry) -> Self {
        Self {
            entry,
            resolved: OnceLock::new(),
        }
    }

    pub fn entry(&self) -> &TableEntry {
        &self.entry
    }

    pub fn cached(&self) -> Option<&Object> {
        self.resolved.get()
    }

    /// Publish a resolved object. The first publication wins; later ones
    /// return the already-cached value.
    pub fn publish(&self, object: Object) -> &Object {
        self.resolved.get_or_init(|| object)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ObjectTable {
    slots: Vec<ObjectSlot>,
}

impl ObjectTable {
    pub fn new(entries: impl IntoIterator<Item = TableEntry>) -> Self {
        Self {
            slots: entries.into_iter().map(ObjectSlot::new).collect(),
        }
    }

    pub fn get(&self, index: ObjectIndex) -> Option<&ObjectSlot> {
        self.slots.get(index.index())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ObjectIndex, &ObjectSlot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, s)| (ObjectIndex(i as u32), s))
    }

    /// Number of slots whose cache cell has been written.
    pub fn resolved_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_resolved()).count()
    }
}
