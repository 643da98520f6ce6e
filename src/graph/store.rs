//! In-memory graph storage implementation
//!
//! Arena-backed vertices and edges with adjacency lists and optional
//! equality indices on vertex property keys. Ids are never reused, so a
//! handle to a removed element can not alias a newer one.

use super::edge::Edge;
use super::engine::GraphEngine;
use super::property::PropertyValue;
use super::types::{Direction, EdgeId, EdgeLabel, VertexId};
use super::vertex::Vertex;
use crate::index::IndexManager;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Vertex {0} not found")]
    VertexNotFound(VertexId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Invalid edge: source vertex {0} does not exist")]
    InvalidEdgeSource(VertexId),

    #[error("Invalid edge: target vertex {0} does not exist")]
    InvalidEdgeTarget(VertexId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - vertices: VertexId -> Vertex (arena slot, `None` once removed)
/// - edges: EdgeId -> Edge
/// - outgoing / incoming: VertexId -> Vec<EdgeId> adjacency lists
/// - property_index: property key -> value -> VertexIds
#[derive(Debug)]
pub struct GraphStore {
    vertices: Vec<Option<Vertex>>,

    edges: Vec<Option<Edge>>,

    /// Outgoing edges for each vertex (adjacency list)
    outgoing: Vec<Vec<EdgeId>>,

    /// Incoming edges for each vertex (adjacency list)
    incoming: Vec<Vec<EdgeId>>,

    /// Equality indices on vertex properties
    property_index: IndexManager,

    next_vertex_id: u64,

    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            vertices: Vec::with_capacity(1024),
            edges: Vec::with_capacity(4096),
            outgoing: Vec::with_capacity(1024),
            incoming: Vec::with_capacity(1024),
            property_index: IndexManager::new(),
            next_vertex_id: 1,
            next_edge_id: 1,
        }
    }

    /// Create a store with equality indices on the given property keys
    pub fn with_indexed_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut store = Self::new();
        for key in keys {
            store.create_index(key);
        }
        store
    }

    /// Create an index on a vertex property key, backfilling existing vertices
    pub fn create_index(&mut self, key: impl Into<String>) {
        let key = key.into();
        if !self.property_index.create_index(key.clone()) {
            return;
        }

        let mut backfilled = 0usize;
        for vertex in self.vertices.iter().flatten() {
            if let Some(value) = vertex.get_property(&key) {
                self.property_index.index_insert(&key, value.clone(), vertex.id);
                backfilled += 1;
            }
        }
        debug!(key = %key, backfilled, "created property index");
    }

    pub fn has_index(&self, key: &str) -> bool {
        self.property_index.has_index(key)
    }

    /// Get total number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.iter().flatten().count()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.iter().flatten().count()
    }

    fn allocate_vertex_id(&mut self) -> u64 {
        let id = self.next_vertex_id;
        self.next_vertex_id += 1;
        id
    }

    fn allocate_edge_id(&mut self) -> u64 {
        let id = self.next_edge_id;
        self.next_edge_id += 1;
        id
    }

    /// The indexed filter key with the fewest candidate vertices, if any
    /// filter key is indexed
    pub(crate) fn narrowing_key<'f>(&self, filters: &'f [(String, PropertyValue)]) -> Option<&'f str> {
        filters
            .iter()
            .filter_map(|(key, value)| {
                self.property_index
                    .get_index(key)
                    .map(|index| (key.as_str(), index.count(value)))
            })
            .min_by_key(|&(_, count)| count)
            .map(|(key, _)| key)
    }

    fn matches(vertex: &Vertex, filters: &[(String, PropertyValue)]) -> bool {
        filters
            .iter()
            .all(|(key, value)| vertex.get_property(key) == Some(value))
    }
}

impl GraphEngine for GraphStore {
    fn add_vertex(&mut self) -> VertexId {
        let id_u64 = self.allocate_vertex_id();
        let vertex_id = VertexId::new(id_u64);
        let idx = id_u64 as usize;

        // Ensure storage capacity
        if idx >= self.vertices.len() {
            self.vertices.resize(idx + 1, None);
            self.outgoing.resize(idx + 1, Vec::new());
            self.incoming.resize(idx + 1, Vec::new());
        }

        self.vertices[idx] = Some(Vertex::new(vertex_id));
        vertex_id
    }

    fn has_vertex(&self, id: VertexId) -> bool {
        self.vertex(id).is_some()
    }

    fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.vertices.get(id.as_u64() as usize).and_then(|v| v.as_ref())
    }

    fn set_vertex_property(
        &mut self,
        id: VertexId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>> {
        let vertex = self
            .vertices
            .get_mut(id.as_u64() as usize)
            .and_then(|v| v.as_mut())
            .ok_or(GraphError::VertexNotFound(id))?;

        let old = vertex.set_property(key, value.clone());

        if let Some(old_value) = &old {
            self.property_index.index_remove(key, old_value, id);
        }
        self.property_index.index_insert(key, value, id);

        Ok(old)
    }

    fn find_vertices(&self, filters: &[(String, PropertyValue)]) -> Vec<VertexId> {
        // Narrow with the most selective indexed filter, verify the rest by scan
        let indexed = self.narrowing_key(filters).and_then(|key| {
            let (_, value) = filters.iter().find(|(k, _)| k == key)?;
            self.property_index.get_index(key).map(|index| index.get(value))
        });

        match indexed {
            Some(candidates) => candidates
                .into_iter()
                .filter(|&id| self.vertex(id).is_some_and(|v| Self::matches(v, filters)))
                .collect(),
            None => self
                .vertices
                .iter()
                .flatten()
                .filter(|v| Self::matches(v, filters))
                .map(|v| v.id)
                .collect(),
        }
    }

    fn add_edge(&mut self, out: VertexId, inv: VertexId, label: &EdgeLabel) -> GraphResult<EdgeId> {
        // Validate vertices exist
        if !self.has_vertex(out) {
            return Err(GraphError::InvalidEdgeSource(out));
        }
        if !self.has_vertex(inv) {
            return Err(GraphError::InvalidEdgeTarget(inv));
        }

        let id_u64 = self.allocate_edge_id();
        let edge_id = EdgeId::new(id_u64);
        let idx = id_u64 as usize;

        // Update adjacency lists
        self.outgoing[out.as_u64() as usize].push(edge_id);
        self.incoming[inv.as_u64() as usize].push(edge_id);

        // Ensure storage capacity
        if idx >= self.edges.len() {
            self.edges.resize(idx + 1, None);
        }

        self.edges[idx] = Some(Edge::new(edge_id, out, inv, label.clone()));
        Ok(edge_id)
    }

    fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.as_u64() as usize).and_then(|e| e.as_ref())
    }

    fn edges(&self, vertex: VertexId, direction: Direction, label: Option<&EdgeLabel>) -> Vec<&Edge> {
        let idx = vertex.as_u64() as usize;
        let empty = Vec::new();
        let adjacent = match direction {
            Direction::Out => self.outgoing.get(idx).unwrap_or(&empty),
            Direction::In => self.incoming.get(idx).unwrap_or(&empty),
        };

        adjacent
            .iter()
            .filter_map(|&id| self.edge(id))
            .filter(|edge| label.map_or(true, |l| edge.has_label(l)))
            .collect()
    }

    fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self
            .edges
            .get_mut(id.as_u64() as usize)
            .and_then(|e| e.take())
            .ok_or(GraphError::EdgeNotFound(id))?;

        // Remove from adjacency lists
        if let Some(adj) = self.outgoing.get_mut(edge.source.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }
        if let Some(adj) = self.incoming.get_mut(edge.target.as_u64() as usize) {
            adj.retain(|&eid| eid != id);
        }

        Ok(edge)
    }

    fn remove_vertex(&mut self, id: VertexId) -> GraphResult<Vertex> {
        if !self.has_vertex(id) {
            return Err(GraphError::VertexNotFound(id));
        }
        let idx = id.as_u64() as usize;

        // A self-loop sits in both adjacency lists
        let connected: BTreeSet<EdgeId> = self.outgoing[idx]
            .iter()
            .chain(self.incoming[idx].iter())
            .copied()
            .collect();
        for edge_id in connected {
            self.remove_edge(edge_id)?;
        }

        let vertex = self.vertices[idx].take().ok_or(GraphError::VertexNotFound(id))?;
        for (key, value) in &vertex.properties {
            self.property_index.index_remove(key, value, id);
        }

        Ok(vertex)
    }

    fn clear(&mut self) {
        // Id counters keep running so handles from before the clear stay dead
        for slot in self.vertices.iter_mut() {
            *slot = None;
        }
        for slot in self.edges.iter_mut() {
            *slot = None;
        }
        for adj in self.outgoing.iter_mut().chain(self.incoming.iter_mut()) {
            adj.clear();
        }
        self.property_index.clear_entries();
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex_with(store: &mut GraphStore, key: &str, value: &str) -> VertexId {
        let id = store.add_vertex();
        store.set_vertex_property(id, key, value.into()).unwrap();
        id
    }

    #[test]
    fn test_add_and_get_vertex() {
        let mut store = GraphStore::new();
        let id = store.add_vertex();

        assert_eq!(store.vertex_count(), 1);
        assert!(store.has_vertex(id));
        assert_eq!(store.vertex(id).unwrap().id, id);
    }

    #[test]
    fn test_set_property_on_missing_vertex() {
        let mut store = GraphStore::new();
        let missing = VertexId::new(42);
        let result = store.set_vertex_property(missing, "k", "v".into());
        assert_eq!(result, Err(GraphError::VertexNotFound(missing)));
    }

    #[test]
    fn test_edge_validation() {
        let mut store = GraphStore::new();
        let v1 = store.add_vertex();
        let invalid = VertexId::new(999);
        let label = EdgeLabel::new("refers");

        assert_eq!(store.add_edge(invalid, v1, &label), Err(GraphError::InvalidEdgeSource(invalid)));
        assert_eq!(store.add_edge(v1, invalid, &label), Err(GraphError::InvalidEdgeTarget(invalid)));
    }

    #[test]
    fn test_adjacency_and_direction() {
        let mut store = GraphStore::new();
        let v1 = store.add_vertex();
        let v2 = store.add_vertex();
        let v3 = store.add_vertex();
        let knows = EdgeLabel::new("KNOWS");
        let follows = EdgeLabel::new("FOLLOWS");

        store.add_edge(v1, v2, &knows).unwrap();
        store.add_edge(v1, v3, &knows).unwrap();
        store.add_edge(v2, v3, &follows).unwrap();

        assert_eq!(store.edges(v1, Direction::Out, None).len(), 2);
        assert_eq!(store.edges(v2, Direction::Out, None).len(), 1);
        assert_eq!(store.edges(v2, Direction::In, None).len(), 1);
        assert_eq!(store.edges(v3, Direction::In, Some(&knows)).len(), 1);
        assert_eq!(store.edges(v3, Direction::In, Some(&follows)).len(), 1);
        assert_eq!(store.edges(v3, Direction::Out, None).len(), 0);
        assert_eq!(store.edges(v1, Direction::Out, Some(&follows)).len(), 0);
    }

    #[test]
    fn test_find_vertices_indexed_and_scanned() {
        let mut store = GraphStore::with_indexed_keys(["name"]);
        let a = vertex_with(&mut store, "name", "A");
        store.set_vertex_property(a, "kind", "x".into()).unwrap();
        let b = vertex_with(&mut store, "name", "A");
        store.set_vertex_property(b, "kind", "y".into()).unwrap();
        vertex_with(&mut store, "name", "B");

        // Indexed key narrows, unindexed key is verified by scan
        let filters = vec![
            ("name".to_string(), PropertyValue::from("A")),
            ("kind".to_string(), PropertyValue::from("y")),
        ];
        assert_eq!(store.find_vertices(&filters), vec![b]);

        // Unindexed only: full scan in id order
        let filters = vec![("kind".to_string(), PropertyValue::from("x"))];
        assert_eq!(store.find_vertices(&filters), vec![a]);

        assert_eq!(store.query().has("name", "A").vertices().collect::<Vec<_>>(), vec![a, b]);
        assert_eq!(store.query().has("name", "Z").first(), None);
    }

    #[test]
    fn test_index_follows_property_updates() {
        let mut store = GraphStore::with_indexed_keys(["name"]);
        let v = vertex_with(&mut store, "name", "old");

        store.set_vertex_property(v, "name", "new".into()).unwrap();

        assert_eq!(store.query().has("name", "old").first(), None);
        assert_eq!(store.query().has("name", "new").first(), Some(v));
    }

    #[test]
    fn test_create_index_backfills() {
        let mut store = GraphStore::new();
        let v = vertex_with(&mut store, "__guid", "g-1");

        store.create_index("__guid");
        assert!(store.has_index("__guid"));
        assert_eq!(store.query().has("__guid", "g-1").first(), Some(v));
    }

    #[test]
    fn test_remove_vertex_detaches_edges_and_index() {
        let mut store = GraphStore::with_indexed_keys(["name"]);
        let v1 = vertex_with(&mut store, "name", "A");
        let v2 = vertex_with(&mut store, "name", "B");
        store.add_edge(v1, v2, &EdgeLabel::new("refers")).unwrap();

        let removed = store.remove_vertex(v1).unwrap();
        assert_eq!(removed.id, v1);
        assert_eq!(store.vertex_count(), 1);
        assert_eq!(store.edge_count(), 0);
        assert!(store.edges(v2, Direction::In, None).is_empty());
        assert_eq!(store.query().has("name", "A").first(), None);

        assert_eq!(store.remove_vertex(v1).unwrap_err(), GraphError::VertexNotFound(v1));
    }

    #[test]
    fn test_remove_edge() {
        let mut store = GraphStore::new();
        let v1 = store.add_vertex();
        let v2 = store.add_vertex();
        let label = EdgeLabel::new("refers");
        let e = store.add_edge(v1, v2, &label).unwrap();

        let removed = store.remove_edge(e).unwrap();
        assert_eq!(removed.source, v1);
        assert_eq!(store.edge_count(), 0);
        assert!(store.edges(v1, Direction::Out, None).is_empty());
        assert!(store.edges(v2, Direction::In, Some(&label)).is_empty());
        assert_eq!(store.remove_edge(e), Err(GraphError::EdgeNotFound(e)));
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut store = GraphStore::new();
        let v1 = store.add_vertex();
        let v2 = store.add_vertex();
        let label = EdgeLabel::new("refers");
        let e1 = store.add_edge(v1, v2, &label).unwrap();

        store.remove_vertex(v1).unwrap();

        let v3 = store.add_vertex();
        assert_ne!(v3, v1);
        assert_eq!(store.vertex_count(), 2);
        assert!(!store.has_vertex(v1));
        assert_eq!(store.remove_vertex(v1).unwrap_err(), GraphError::VertexNotFound(v1));
        assert!(store.has_vertex(v3));

        let e2 = store.add_edge(v3, v2, &label).unwrap();
        assert_ne!(e2, e1);
        assert_eq!(store.remove_edge(e1), Err(GraphError::EdgeNotFound(e1)));
        assert_eq!(store.edge_count(), 1);
    }

    #[test]
    fn test_remove_vertex_with_self_loop() {
        let mut store = GraphStore::new();
        let v1 = store.add_vertex();
        let v2 = store.add_vertex();
        let label = EdgeLabel::new("refers");
        store.add_edge(v1, v1, &label).unwrap();
        store.add_edge(v1, v2, &label).unwrap();

        assert_eq!(store.edges(v1, Direction::Out, None).len(), 2);
        assert_eq!(store.edges(v1, Direction::In, None).len(), 1);

        store.remove_vertex(v1).unwrap();
        assert_eq!(store.edge_count(), 0);
        assert!(store.edges(v2, Direction::In, None).is_empty());
        assert_eq!(store.vertex_count(), 1);
    }

    #[test]
    fn test_narrowing_prefers_smallest_candidate_set() {
        let mut store = GraphStore::with_indexed_keys(["__type", "__type.name"]);
        let mut target = VertexId::new(0);
        for i in 0..50 {
            let v = vertex_with(&mut store, "__type", "typeSystem");
            store
                .set_vertex_property(v, "__type.name", format!("type_{}", i).into())
                .unwrap();
            if i == 17 {
                target = v;
            }
        }

        let filters = vec![
            ("__type".to_string(), PropertyValue::from("typeSystem")),
            ("__type.name".to_string(), PropertyValue::from("type_17")),
            ("unindexed".to_string(), PropertyValue::from("x")),
        ];
        assert_eq!(store.narrowing_key(&filters), Some("__type.name"));
        assert_eq!(store.find_vertices(&filters[..2]), vec![target]);

        // No candidates at all beats any populated index
        let filters = vec![
            ("__type".to_string(), PropertyValue::from("typeSystem")),
            ("__type.name".to_string(), PropertyValue::from("absent")),
        ];
        assert_eq!(store.narrowing_key(&filters), Some("__type.name"));
        assert!(store.find_vertices(&filters).is_empty());

        let filters = vec![("unindexed".to_string(), PropertyValue::from("x"))];
        assert_eq!(store.narrowing_key(&filters), None);
    }

    #[test]
    fn test_clear_keeps_indexed_keys() {
        let mut store = GraphStore::with_indexed_keys(["name"]);
        vertex_with(&mut store, "name", "A");
        store.clear();

        assert_eq!(store.vertex_count(), 0);
        assert!(store.has_index("name"));
        assert_eq!(store.query().has("name", "A").first(), None);
        assert_eq!(store.add_vertex(), VertexId::new(2));
    }
}
