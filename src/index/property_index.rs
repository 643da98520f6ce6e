//! B-Tree based equality index for one property key

use crate::graph::{PropertyValue, VertexId};
use std::collections::{BTreeMap, BTreeSet};

/// Index for a single property key: value -> vertices holding it
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    index: BTreeMap<PropertyValue, BTreeSet<VertexId>>,
}

impl PropertyIndex {
    pub fn new() -> Self {
        Self {
            index: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, value: PropertyValue, vertex_id: VertexId) {
        self.index.entry(value).or_default().insert(vertex_id);
    }

    pub fn remove(&mut self, value: &PropertyValue, vertex_id: VertexId) {
        if let Some(vertices) = self.index.get_mut(value) {
            vertices.remove(&vertex_id);
            if vertices.is_empty() {
                self.index.remove(value);
            }
        }
    }

    /// Vertices holding `value`, in ascending id order
    pub fn get(&self, value: &PropertyValue) -> Vec<VertexId> {
        self.index
            .get(value)
            .map(|vertices| vertices.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Number of vertices holding `value`
    pub fn count(&self, value: &PropertyValue) -> usize {
        self.index.get(value).map_or(0, BTreeSet::len)
    }

    /// Number of distinct values indexed
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
