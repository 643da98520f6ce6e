//! Type-definition graph store
//!
//! Persists type definitions as vertices of a shared graph and inheritance
//! as labeled edges between them:
//! - `mapper`: record <-> vertex property projection, defaults
//! - `lookup`: indexed retrieval by name, identifier and category
//! - `supertype`: idempotent inheritance edges
//! - `lifecycle`: validated creation, update, integrity-checked deletion
//! - `catalog`: bulk load/export of a whole catalog
//!
//! Every public operation takes the graph lock once and holds it for its
//! whole duration, so each call is atomic with respect to other users of the
//! same `GraphProvider`.

pub mod catalog;
pub mod constants;
pub mod event;
pub mod lifecycle;
pub mod lookup;
pub mod mapper;
pub mod supertype;

pub use event::TypeChangeEvent;

use crate::config::TypeStoreConfig;
use crate::graph::{EdgeLabel, GraphEngine, GraphError, GraphProvider, GraphStore, SharedGraph, VertexId};
use crate::typedef::{TypeCategory, UnknownCategory};
use std::sync::{Arc, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Errors raised by type store operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TypeStoreError {
    /// Definition failed a precondition; nothing was written
    #[error("Invalid type definition: {0}")]
    Validation(String),

    /// Delete refused: another vertex still points at this one
    #[error("Type vertex {0} has references")]
    HasReferences(VertexId),

    #[error("Vertex {0} is not a type vertex")]
    NotTypeVertex(VertexId),

    #[error("Category mismatch on {vertex}: stored {stored}, given {given}")]
    CategoryMismatch {
        vertex: VertexId,
        stored: TypeCategory,
        given: TypeCategory,
    },

    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Graph lock poisoned")]
    LockPoisoned,
}

pub type TypeStoreResult<T> = Result<T, TypeStoreError>;

/// Type-definition store over a shared graph engine
#[derive(Debug)]
pub struct TypeDefGraphStore<G: GraphEngine = GraphStore> {
    graph: SharedGraph<G>,
    config: TypeStoreConfig,
    supertype_label: EdgeLabel,
    /// Change listener channel, if enabled
    change_sender: Option<UnboundedSender<TypeChangeEvent>>,
}

impl<G: GraphEngine> TypeDefGraphStore<G> {
    pub fn new(provider: &GraphProvider<G>, config: TypeStoreConfig) -> Self {
        let supertype_label = EdgeLabel::new(config.supertype_edge_label.clone());
        Self {
            graph: Arc::clone(provider.graph()),
            config,
            supertype_label,
            change_sender: None,
        }
    }

    /// Create a store that reports every applied change on the returned channel
    pub fn with_change_events(
        provider: &GraphProvider<G>,
        config: TypeStoreConfig,
    ) -> (Self, UnboundedReceiver<TypeChangeEvent>) {
        let (tx, rx) = unbounded_channel();
        let mut store = Self::new(provider, config);
        store.change_sender = Some(tx);
        (store, rx)
    }

    pub fn config(&self) -> &TypeStoreConfig {
        &self.config
    }

    pub fn graph(&self) -> &SharedGraph<G> {
        &self.graph
    }

    /// Label used for subtype -> supertype edges
    pub fn supertype_label(&self) -> &EdgeLabel {
        &self.supertype_label
    }

    pub(crate) fn read_graph(&self) -> TypeStoreResult<RwLockReadGuard<'_, G>> {
        self.graph.read().map_err(|_| TypeStoreError::LockPoisoned)
    }

    pub(crate) fn write_graph(&self) -> TypeStoreResult<RwLockWriteGuard<'_, G>> {
        self.graph.write().map_err(|_| TypeStoreError::LockPoisoned)
    }

    pub(crate) fn notify(&self, event: TypeChangeEvent) {
        if let Some(sender) = &self.change_sender {
            // A dropped listener must not fail the write that already happened
            let _ = sender.send(event);
        }
    }
}
