//! Subtype -> supertype edges

use super::constants::TYPENAME_PROPERTY_KEY;
use super::lookup::find_type_vertex_by_name_and_category;
use super::mapper::string_property;
use super::{TypeDefGraphStore, TypeStoreResult};
use crate::graph::{Direction, EdgeId, EdgeLabel, GraphEngine, GraphResult, VertexId};
use crate::typedef::TypeCategory;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Unconditionally add an edge `out -> inv`
pub fn add_edge<G: GraphEngine>(graph: &mut G, out: VertexId, inv: VertexId, label: &EdgeLabel) -> GraphResult<EdgeId> {
    graph.add_edge(out, inv, label)
}

/// Return the existing `out -[label]-> inv` edge, or create it
pub fn get_or_create_edge<G: GraphEngine>(
    graph: &mut G,
    out: VertexId,
    inv: VertexId,
    label: &EdgeLabel,
) -> GraphResult<EdgeId> {
    let existing = graph
        .edges(out, Direction::Out, Some(label))
        .into_iter()
        .find(|edge| edge.in_vertex() == inv)
        .map(|edge| edge.id);

    if let Some(id) = existing {
        return Ok(id);
    }

    let id = graph.add_edge(out, inv, label)?;
    debug!("Created edge {} {} -> {}", label, out, inv);
    Ok(id)
}

/// Link `vertex` to each named supertype of `category`.
///
/// Names with no matching type vertex are skipped with a warning. Returns the
/// edges that now link `vertex` to the resolved supertypes.
pub(crate) fn link_super_types<G: GraphEngine>(
    graph: &mut G,
    vertex: VertexId,
    super_types: &BTreeSet<String>,
    category: TypeCategory,
    label: &EdgeLabel,
) -> GraphResult<Vec<EdgeId>> {
    let mut edges = Vec::with_capacity(super_types.len());
    for name in super_types {
        match find_type_vertex_by_name_and_category(&*graph, name, category) {
            Some(super_vertex) => edges.push(get_or_create_edge(graph, vertex, super_vertex, label)?),
            None => warn!("Supertype {} ({}) not found for {}, skipping", name, category, vertex),
        }
    }
    Ok(edges)
}

/// Link `vertex` to each named CLASS supertype
pub fn create_super_type_edges<G: GraphEngine>(
    graph: &mut G,
    vertex: VertexId,
    super_types: &BTreeSet<String>,
    label: &EdgeLabel,
) -> GraphResult<Vec<EdgeId>> {
    link_super_types(graph, vertex, super_types, TypeCategory::Class, label)
}

/// Names of the vertices `vertex` points at through `label` edges
pub fn get_super_type_names<G: GraphEngine>(graph: &G, vertex: VertexId, label: &EdgeLabel) -> BTreeSet<String> {
    graph
        .edges(vertex, Direction::Out, Some(label))
        .into_iter()
        .filter_map(|edge| graph.vertex(edge.in_vertex()))
        .filter_map(|v| string_property(v, TYPENAME_PROPERTY_KEY))
        .map(str::to_string)
        .collect()
}

impl<G: GraphEngine> TypeDefGraphStore<G> {
    pub fn add_edge(&self, out: VertexId, inv: VertexId, label: &EdgeLabel) -> TypeStoreResult<EdgeId> {
        let mut graph = self.write_graph()?;
        Ok(add_edge(&mut *graph, out, inv, label)?)
    }

    /// Idempotent edge creation; check and insert happen under one lock
    pub fn get_or_create_edge(&self, out: VertexId, inv: VertexId, label: &EdgeLabel) -> TypeStoreResult<EdgeId> {
        let mut graph = self.write_graph()?;
        Ok(get_or_create_edge(&mut *graph, out, inv, label)?)
    }

    /// Link `vertex` to each named CLASS supertype with the configured label
    pub fn create_super_type_edges(&self, vertex: VertexId, super_types: &BTreeSet<String>) -> TypeStoreResult<Vec<EdgeId>> {
        let mut graph = self.write_graph()?;
        Ok(create_super_type_edges(&mut *graph, vertex, super_types, &self.supertype_label)?)
    }

    pub fn get_super_type_names(&self, vertex: VertexId) -> TypeStoreResult<BTreeSet<String>> {
        let graph = self.read_graph()?;
        Ok(get_super_type_names(&*graph, vertex, &self.supertype_label))
    }
}
