//! Vertex implementation for the property graph

use super::property::{PropertyMap, PropertyValue};
use super::types::VertexId;
use serde::{Deserialize, Serialize};

/// A vertex in the property graph
///
/// Vertices carry no labels of their own: what a vertex *is* is expressed
/// through its properties (for type vertices, the marker key).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vertex {
    /// Unique identifier for this vertex
    pub id: VertexId,

    /// Properties associated with this vertex
    pub properties: PropertyMap,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,

    /// Last update timestamp (Unix milliseconds)
    pub updated_at: i64,
}

impl Vertex {
    /// Create a new vertex without properties
    pub fn new(id: VertexId) -> Self {
        let now = chrono::Utc::now().timestamp_millis();

        Vertex {
            id,
            properties: PropertyMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Set a property value, returning the previous one
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        let old = self.properties.insert(key.into(), value.into());
        self.update_timestamp();
        old
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    fn update_timestamp(&mut self) {
        self.updated_at = chrono::Utc::now().timestamp_millis();
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vertex {}

impl std::hash::Hash for Vertex {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
