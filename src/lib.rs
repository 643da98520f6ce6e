//! Typegraph
//!
//! Persists a metadata type catalog (entity kinds, classification kinds,
//! structs and enumerations) as vertices and inheritance edges of a property
//! graph.
//!
//! # Architecture
//!
//! - `graph`: the engine contract (`GraphEngine`), an in-memory engine and the
//!   `GraphProvider` that shares it
//! - `index`: equality indices used by the in-memory engine
//! - `typedef`: type-definition records and categories
//! - `store`: the type-definition graph store
//! - `config`: store configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use typegraph::{BaseTypeDef, GraphProvider, TypeDef, TypeDefGraphStore, TypeStoreConfig};
//!
//! let config = TypeStoreConfig::default();
//! let provider = GraphProvider::in_memory(&config);
//! let store = TypeDefGraphStore::new(&provider, config);
//!
//! // Create a base type and a subtype linked to it
//! let mut dataset = TypeDef::entity(BaseTypeDef::new("DataSet"));
//! store.create_type_vertex(&mut dataset).unwrap();
//!
//! let mut table = TypeDef::entity(BaseTypeDef::new("hive_table")).with_super_types(["DataSet"]);
//! let vertex = store.create_with_super_types(&mut table).unwrap();
//!
//! let parents = store.get_super_type_names(vertex).unwrap();
//! assert!(parents.contains("DataSet"));
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod graph;
pub mod index;
pub mod store;
pub mod typedef;

// Re-export main types for convenience
pub use config::{ConfigError, ConfigResult, TypeStoreConfig};

pub use graph::{
    Direction, Edge, EdgeId, EdgeLabel, GraphEngine, GraphError, GraphProvider, GraphResult, GraphStore,
    PropertyMap, PropertyValue, SharedGraph, Vertex, VertexId,
};

pub use store::{TypeChangeEvent, TypeDefGraphStore, TypeStoreError, TypeStoreResult};

pub use typedef::{
    AttributeDef, BaseTypeDef, ClassificationDef, EntityDef, EnumDef, EnumElementDef, StructDef, TypeCategory,
    TypeDef, TypesDef, UnknownCategory,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
