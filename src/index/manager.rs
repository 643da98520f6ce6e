//! Manager for property indices
//!
//! Handles creation, deletion, and maintenance of per-key equality indices.

use super::property_index::PropertyIndex;
use crate::graph::{PropertyValue, VertexId};
use std::collections::HashMap;

/// Manager for all property indices, keyed by property name
#[derive(Debug, Default)]
pub struct IndexManager {
    indices: HashMap<String, PropertyIndex>,
}

impl IndexManager {
    pub fn new() -> Self {
        Self {
            indices: HashMap::new(),
        }
    }

    /// Create an index for a property key. Existing indices are kept as is.
    ///
    /// Returns true when a new (empty) index was created; the caller is
    /// responsible for backfilling it.
    pub fn create_index(&mut self, property: impl Into<String>) -> bool {
        let mut created = false;
        self.indices.entry(property.into()).or_insert_with(|| {
            created = true;
            PropertyIndex::new()
        });
        created
    }

    /// Drop an index
    pub fn drop_index(&mut self, property: &str) {
        self.indices.remove(property);
    }

    /// Update index when a vertex property is set
    pub fn index_insert(&mut self, property: &str, value: PropertyValue, vertex_id: VertexId) {
        if let Some(index) = self.indices.get_mut(property) {
            index.insert(value, vertex_id);
        }
    }

    /// Update index when a vertex property is removed (or old value replaced)
    pub fn index_remove(&mut self, property: &str, value: &PropertyValue, vertex_id: VertexId) {
        if let Some(index) = self.indices.get_mut(property) {
            index.remove(value, vertex_id);
        }
    }

    /// Check if an index exists
    pub fn has_index(&self, property: &str) -> bool {
        self.indices.contains_key(property)
    }

    /// Get index for querying
    pub fn get_index(&self, property: &str) -> Option<&PropertyIndex> {
        self.indices.get(property)
    }

    /// Empty every index, keeping the set of indexed keys
    pub fn clear_entries(&mut self) {
        for index in self.indices.values_mut() {
            *index = PropertyIndex::new();
        }
    }
}
