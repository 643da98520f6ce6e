//! Property graph engine
//!
//! The contract the type store relies on (`GraphEngine`) and an in-memory
//! implementation of it:
//! - Vertices carrying key/value properties
//! - Directed, labeled edges with adjacency lists in both directions
//! - Equality indices on chosen vertex property keys

pub mod edge;
pub mod engine;
pub mod property;
pub mod provider;
pub mod store;
pub mod types;
pub mod vertex;

// Re-export main types
pub use edge::Edge;
pub use engine::{GraphEngine, VertexQuery};
pub use property::{PropertyMap, PropertyValue};
pub use provider::{GraphProvider, SharedGraph};
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{Direction, EdgeId, EdgeLabel, VertexId};
pub use vertex::Vertex;
