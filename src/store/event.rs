//! Type change events
//!
//! Emitted after a create/update/delete has been applied, for listeners that
//! keep a search index in sync with the catalog.

use crate::graph::VertexId;
use crate::typedef::TypeCategory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeChangeEvent {
    Created {
        vertex: VertexId,
        name: String,
        guid: String,
        category: TypeCategory,
    },
    Updated {
        vertex: VertexId,
        name: String,
        guid: String,
        category: TypeCategory,
    },
    Deleted {
        vertex: VertexId,
        name: String,
        guid: Option<String>,
        /// `None` when the stored category could not be read
        category: Option<TypeCategory>,
    },
}

impl TypeChangeEvent {
    /// Name of the type the event is about
    pub fn type_name(&self) -> &str {
        match self {
            TypeChangeEvent::Created { name, .. }
            | TypeChangeEvent::Updated { name, .. }
            | TypeChangeEvent::Deleted { name, .. } => name,
        }
    }
}
