//! Process-wide graph handle with explicit init/teardown
//!
//! Components never reach for an ambient global graph: whoever owns the
//! provider hands `graph()` to the components that need it.

use super::engine::GraphEngine;
use super::store::GraphStore;
use crate::config::TypeStoreConfig;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Graph engine shared between components
pub type SharedGraph<G = GraphStore> = Arc<RwLock<G>>;

/// Owner of the shared graph
#[derive(Debug)]
pub struct GraphProvider<G: GraphEngine = GraphStore> {
    graph: SharedGraph<G>,
}

impl<G: GraphEngine> GraphProvider<G> {
    /// Wrap an engine so it can be shared
    pub fn init(engine: G) -> Self {
        info!("Graph provider initialized");
        Self {
            graph: Arc::new(RwLock::new(engine)),
        }
    }

    /// Handle to pass into components
    pub fn graph(&self) -> &SharedGraph<G> {
        &self.graph
    }

    /// Drop every vertex and edge held by the engine.
    ///
    /// Handles given out earlier stay valid and observe an empty graph.
    /// A poisoned lock does not prevent teardown.
    pub fn teardown(&self) {
        let mut graph = self.graph.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        graph.clear();
        info!("Graph provider torn down");
    }
}

impl GraphProvider<GraphStore> {
    /// In-memory engine indexing the keys named in `config`
    pub fn in_memory(config: &TypeStoreConfig) -> Self {
        Self::init(GraphStore::with_indexed_keys(config.indexed_keys.iter().cloned()))
    }
}
