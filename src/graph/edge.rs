//! Directed, labeled edge

use super::types::{EdgeId, EdgeLabel, VertexId};
use serde::{Deserialize, Serialize};

/// A directed edge in the property graph
///
/// `source` is the out-vertex (the edge leaves it), `target` the in-vertex.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source vertex (edge goes FROM this vertex)
    pub source: VertexId,

    /// Target vertex (edge goes TO this vertex)
    pub target: VertexId,

    /// Relationship label
    pub label: EdgeLabel,

    /// Creation timestamp (Unix milliseconds)
    pub created_at: i64,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: VertexId, target: VertexId, label: impl Into<EdgeLabel>) -> Self {
        Edge {
            id,
            source,
            target,
            label: label.into(),
            created_at: chrono::Utc::now().timestamp_millis(),
        }
    }

    /// The vertex this edge leaves
    pub fn out_vertex(&self) -> VertexId {
        self.source
    }

    /// The vertex this edge points at
    pub fn in_vertex(&self) -> VertexId {
        self.target
    }

    pub fn has_label(&self, label: &EdgeLabel) -> bool {
        &self.label == label
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
