//! Graph engine contract
//!
//! The type-definition store only ever talks to the graph through this
//! trait. `GraphStore` is the in-memory implementation shipped with the
//! crate; any other engine offering the same primitives can be plugged in.

use super::edge::Edge;
use super::property::PropertyValue;
use super::store::GraphResult;
use super::types::{Direction, EdgeId, EdgeLabel, VertexId};
use super::vertex::Vertex;

/// Primitive vertex/edge operations expected from a graph engine
pub trait GraphEngine {
    /// Allocate a new vertex with no properties
    ///
    /// An id is never handed out twice, even after its vertex is removed.
    fn add_vertex(&mut self) -> VertexId;

    fn has_vertex(&self, id: VertexId) -> bool;

    fn vertex(&self, id: VertexId) -> Option<&Vertex>;

    /// Set a vertex property, returning the previous value
    fn set_vertex_property(
        &mut self,
        id: VertexId,
        key: &str,
        value: PropertyValue,
    ) -> GraphResult<Option<PropertyValue>>;

    fn vertex_property(&self, id: VertexId, key: &str) -> Option<&PropertyValue> {
        self.vertex(id).and_then(|v| v.get_property(key))
    }

    /// Vertices matching every `(key, value)` filter, ascending by id
    fn find_vertices(&self, filters: &[(String, PropertyValue)]) -> Vec<VertexId>;

    /// Create a directed edge `out -> in`
    fn add_edge(&mut self, out: VertexId, inv: VertexId, label: &EdgeLabel) -> GraphResult<EdgeId>;

    fn edge(&self, id: EdgeId) -> Option<&Edge>;

    /// Edges touching `vertex` in `direction`, optionally restricted to one label
    fn edges(&self, vertex: VertexId, direction: Direction, label: Option<&EdgeLabel>) -> Vec<&Edge>;

    fn remove_edge(&mut self, id: EdgeId) -> GraphResult<Edge>;

    /// Remove a vertex together with any edge still attached to it
    fn remove_vertex(&mut self, id: VertexId) -> GraphResult<Vertex>;

    /// Drop all vertices and edges
    fn clear(&mut self);

    /// Start a conjunctive equality query
    fn query(&self) -> VertexQuery<'_, Self>
    where
        Self: Sized,
    {
        VertexQuery::new(self)
    }
}

/// Builder for `query().has(k, v)...vertices()`
pub struct VertexQuery<'g, G> {
    graph: &'g G,
    filters: Vec<(String, PropertyValue)>,
}

impl<'g, G: GraphEngine> VertexQuery<'g, G> {
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            filters: Vec::new(),
        }
    }

    /// Add an equality filter
    pub fn has(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Run the query. The result is a snapshot; re-run the query to restart.
    pub fn vertices(self) -> std::vec::IntoIter<VertexId> {
        self.graph.find_vertices(&self.filters).into_iter()
    }

    /// First match in engine order, if any
    pub fn first(self) -> Option<VertexId> {
        self.vertices().next()
    }
}
