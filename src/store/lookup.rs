//! Type vertex retrieval
//!
//! All lookups are conjunctive equality queries on the marker plus one or two
//! stored keys. With several matches the engine's first result wins.

use super::constants::*;
use super::mapper::string_property;
use super::{TypeDefGraphStore, TypeStoreResult};
use crate::graph::{GraphEngine, VertexId};
use crate::typedef::TypeCategory;

pub fn find_type_vertex_by_name<G: GraphEngine>(graph: &G, name: &str) -> Option<VertexId> {
    graph
        .query()
        .has(VERTEX_TYPE_PROPERTY_KEY, VERTEX_TYPE)
        .has(TYPENAME_PROPERTY_KEY, name)
        .first()
}

pub fn find_type_vertex_by_name_and_category<G: GraphEngine>(
    graph: &G,
    name: &str,
    category: TypeCategory,
) -> Option<VertexId> {
    graph
        .query()
        .has(VERTEX_TYPE_PROPERTY_KEY, VERTEX_TYPE)
        .has(TYPENAME_PROPERTY_KEY, name)
        .has(TYPE_CATEGORY_PROPERTY_KEY, category.as_str())
        .first()
}

pub fn find_type_vertex_by_guid<G: GraphEngine>(graph: &G, guid: &str) -> Option<VertexId> {
    graph
        .query()
        .has(VERTEX_TYPE_PROPERTY_KEY, VERTEX_TYPE)
        .has(GUID_PROPERTY_KEY, guid)
        .first()
}

pub fn find_type_vertex_by_guid_and_category<G: GraphEngine>(
    graph: &G,
    guid: &str,
    category: TypeCategory,
) -> Option<VertexId> {
    graph
        .query()
        .has(VERTEX_TYPE_PROPERTY_KEY, VERTEX_TYPE)
        .has(GUID_PROPERTY_KEY, guid)
        .has(TYPE_CATEGORY_PROPERTY_KEY, category.as_str())
        .first()
}

/// All type vertices of one category, as a snapshot
pub fn find_type_vertices_by_category<G: GraphEngine>(
    graph: &G,
    category: TypeCategory,
) -> std::vec::IntoIter<VertexId> {
    graph
        .query()
        .has(VERTEX_TYPE_PROPERTY_KEY, VERTEX_TYPE)
        .has(TYPE_CATEGORY_PROPERTY_KEY, category.as_str())
        .vertices()
}

/// True when the vertex exists and carries the type-system marker
pub fn is_type_vertex<G: GraphEngine>(graph: &G, vertex: VertexId) -> bool {
    graph
        .vertex(vertex)
        .is_some_and(|v| string_property(v, VERTEX_TYPE_PROPERTY_KEY) == Some(VERTEX_TYPE))
}

pub fn is_type_vertex_of<G: GraphEngine>(graph: &G, vertex: VertexId, category: TypeCategory) -> bool {
    is_type_vertex_in(graph, vertex, &[category])
}

/// True when the vertex is a type vertex whose stored category is one of `categories`
pub fn is_type_vertex_in<G: GraphEngine>(graph: &G, vertex: VertexId, categories: &[TypeCategory]) -> bool {
    if !is_type_vertex(graph, vertex) {
        return false;
    }
    graph
        .vertex(vertex)
        .and_then(|v| string_property(v, TYPE_CATEGORY_PROPERTY_KEY))
        .is_some_and(|stored| categories.iter().any(|c| c.as_str() == stored))
}

impl<G: GraphEngine> TypeDefGraphStore<G> {
    pub fn find_type_vertex_by_name(&self, name: &str) -> TypeStoreResult<Option<VertexId>> {
        let graph = self.read_graph()?;
        Ok(find_type_vertex_by_name(&*graph, name))
    }

    pub fn find_type_vertex_by_name_and_category(
        &self,
        name: &str,
        category: TypeCategory,
    ) -> TypeStoreResult<Option<VertexId>> {
        let graph = self.read_graph()?;
        Ok(find_type_vertex_by_name_and_category(&*graph, name, category))
    }

    pub fn find_type_vertex_by_guid(&self, guid: &str) -> TypeStoreResult<Option<VertexId>> {
        let graph = self.read_graph()?;
        Ok(find_type_vertex_by_guid(&*graph, guid))
    }

    pub fn find_type_vertex_by_guid_and_category(
        &self,
        guid: &str,
        category: TypeCategory,
    ) -> TypeStoreResult<Option<VertexId>> {
        let graph = self.read_graph()?;
        Ok(find_type_vertex_by_guid_and_category(&*graph, guid, category))
    }

    /// Snapshot of the type vertices of `category`, ascending by id.
    /// Later writes are not reflected; call again to see them.
    pub fn find_type_vertices_by_category(
        &self,
        category: TypeCategory,
    ) -> TypeStoreResult<std::vec::IntoIter<VertexId>> {
        let graph = self.read_graph()?;
        Ok(find_type_vertices_by_category(&*graph, category))
    }

    pub fn is_type_vertex(&self, vertex: VertexId) -> TypeStoreResult<bool> {
        let graph = self.read_graph()?;
        Ok(is_type_vertex(&*graph, vertex))
    }

    pub fn is_type_vertex_of(&self, vertex: VertexId, category: TypeCategory) -> TypeStoreResult<bool> {
        let graph = self.read_graph()?;
        Ok(is_type_vertex_of(&*graph, vertex, category))
    }

    pub fn is_type_vertex_in(&self, vertex: VertexId, categories: &[TypeCategory]) -> TypeStoreResult<bool> {
        let graph = self.read_graph()?;
        Ok(is_type_vertex_in(&*graph, vertex, categories))
    }
}
