//! Once-per-process container publication.

use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use snipgraph_bytecode::Container;

/// Builds a container at most once and publishes it only when complete.
///
/// Readers never observe a partially built container: the cell is written
/// after the build returns, while the build lock is held.
pub struct Publication {
    lock: Mutex<()>,
    cell: OnceLock<Arc<Container>>,
}

impl Default for Publication {
    fn default() -> Self {
        Self::new()
    }
}

impl Publication {
    pub const fn new() -> Self {
        Self {
            lock: parking_lot::const_mutex(()),
            cell: OnceLock::new(),
        }
    }

    pub fn get(&self) -> Option<Arc<Container>> {
        self.cell.get().cloned()
    }

    /// Return the published container, building it first if needed.
    ///
    /// A failed build publishes nothing; the next caller builds again.
    pub fn get_or_build<E>(
        &self,
        build: impl FnOnce() -> Result<Container, E>,
    ) -> Result<Arc<Container>, E> {
        if let Some(container) = self.cell.get() {
            return Ok(container.clone());
        }
        let _guard = self.lock.lock();
        if let Some(container) = self.cell.get() {
            return Ok(container.clone());
        }
        let container = Arc::new(build()?);
        tracing::debug!(graphs = container.graphs().len(), "published snippet container");
        Ok(self.cell.get_or_init(|| container).clone())
    }
}
