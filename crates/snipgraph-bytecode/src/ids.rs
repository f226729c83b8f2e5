//! Container index newtypes.

use serde::{Deserialize, Serialize};

/// Index into the shared object table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct ObjectIndex(pub u32);

impl ObjectIndex {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the node-class registry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct NodeClassId(pub u16);
