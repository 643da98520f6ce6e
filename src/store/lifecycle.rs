//! Type vertex lifecycle: create, update, delete
//!
//! A type vertex is created only through `create_type_vertex` (or the
//! catalog loader), rewritten by `update_type_vertex`, and removed by
//! `delete_type_vertex` once nothing points at it any more.

use super::constants::*;
use super::event::TypeChangeEvent;
use super::lookup::is_type_vertex;
use super::mapper::{apply_defaults, description_or_name, now_millis, string_property, type_def_to_vertex, vertex_category, vertex_to_type_def};
use super::supertype::link_super_types;
use super::{TypeDefGraphStore, TypeStoreError, TypeStoreResult};
use crate::graph::{Direction, GraphEngine, GraphError, GraphResult, PropertyValue, VertexId};
use crate::typedef::{BaseTypeDef, TypeDef};
use tracing::{info, warn};

/// Check the preconditions every stored header must meet
pub fn validate_type_def(base: &BaseTypeDef) -> TypeStoreResult<()> {
    if base.name.trim().is_empty() {
        return Err(TypeStoreError::Validation("Type name can't be null/empty".to_string()));
    }
    if base.type_version.as_deref().map_or(true, |v| v.trim().is_empty()) {
        return Err(TypeStoreError::Validation("Type version can't be null/empty".to_string()));
    }
    if base.version.is_none() {
        return Err(TypeStoreError::Validation("Version can't be null".to_string()));
    }
    Ok(())
}

/// Header of `def` with defaults applied, if it passes validation.
/// `def` itself is not touched.
pub(crate) fn prepare(def: &TypeDef, default_type_version: &str, now: i64) -> TypeStoreResult<BaseTypeDef> {
    let mut base = def.base().clone();
    apply_defaults(&mut base, default_type_version, now);
    validate_type_def(&base)?;
    Ok(base)
}

/// Allocate a vertex and project an already prepared `def` onto it
pub(crate) fn insert_type_vertex<G: GraphEngine>(graph: &mut G, def: &TypeDef) -> GraphResult<VertexId> {
    let vertex = graph.add_vertex();
    type_def_to_vertex(graph, vertex, def)?;
    Ok(vertex)
}

pub(crate) fn created_event(vertex: VertexId, def: &TypeDef) -> TypeChangeEvent {
    TypeChangeEvent::Created {
        vertex,
        name: def.name().to_string(),
        guid: def.base().guid.clone().unwrap_or_default(),
        category: def.category(),
    }
}

impl<G: GraphEngine> TypeDefGraphStore<G> {
    /// Create the vertex for `def`.
    ///
    /// Defaults are applied first, then the header is validated; a failure
    /// leaves both the graph and `def` unchanged. On success `def` carries the
    /// generated identifier, version tag and timestamps.
    pub fn create_type_vertex(&self, def: &mut TypeDef) -> TypeStoreResult<VertexId> {
        let base = prepare(def, &self.config.default_type_version, now_millis())?;
        *def.base_mut() = base;

        let mut graph = self.write_graph()?;
        let vertex = insert_type_vertex(&mut *graph, def)?;
        info!("Created {} type {} as {}", def.category(), def.name(), vertex);

        self.notify(created_event(vertex, def));
        Ok(vertex)
    }

    /// Create the vertex for `def` and link it to its supertypes in one step.
    ///
    /// Supertypes resolve against the definition's own category: entity
    /// parents are CLASS vertices, classification parents are TRAIT vertices.
    pub fn create_with_super_types(&self, def: &mut TypeDef) -> TypeStoreResult<VertexId> {
        let base = prepare(def, &self.config.default_type_version, now_millis())?;
        *def.base_mut() = base;

        let mut graph = self.write_graph()?;
        let vertex = insert_type_vertex(&mut *graph, def)?;
        if let Some(super_types) = def.super_types() {
            link_super_types(&mut *graph, vertex, super_types, def.category(), &self.supertype_label)?;
        }
        info!("Created {} type {} as {}", def.category(), def.name(), vertex);

        self.notify(created_event(vertex, def));
        Ok(vertex)
    }

    /// Rewrite the mutable header fields of an existing type vertex.
    ///
    /// Description, version tag and updater are taken from `def`; the update
    /// time is set to now and the version bumped by one. Name, identifier and
    /// category stay as stored. On success `def` is refreshed from the vertex.
    pub fn update_type_vertex(&self, vertex: VertexId, def: &mut TypeDef) -> TypeStoreResult<()> {
        let mut graph = self.write_graph()?;

        let stored = vertex_category(&*graph, vertex)?;
        if stored != def.category() {
            return Err(TypeStoreError::CategoryMismatch {
                vertex,
                stored,
                given: def.category(),
            });
        }

        let mut current = BaseTypeDef::default();
        vertex_to_type_def(&*graph, vertex, &mut current)?;

        let base = def.base();
        if !base.name.is_empty() && base.name != current.name {
            return Err(TypeStoreError::Validation(format!(
                "Type name can't be changed from {} to {}",
                current.name, base.name
            )));
        }
        if let Some(guid) = base.guid.as_deref().filter(|g| !g.trim().is_empty()) {
            if current.guid.as_deref() != Some(guid) {
                return Err(TypeStoreError::Validation(format!("Type guid can't be changed for {}", current.name)));
            }
        }

        let type_version = match base.type_version.as_deref() {
            Some(v) if !v.trim().is_empty() => v.to_string(),
            _ => current
                .type_version
                .clone()
                .unwrap_or_else(|| self.config.default_type_version.clone()),
        };
        let mut description_source = current.clone();
        description_source.description = base.description.clone();
        let description = description_or_name(&description_source).to_string();
        let version = current
            .version
            .unwrap_or(0)
            .checked_add(1)
            .ok_or_else(|| TypeStoreError::Validation(format!("Version of {} can't be incremented", current.name)))?;

        graph.set_vertex_property(vertex, TYPEDESCRIPTION_PROPERTY_KEY, description.into())?;
        graph.set_vertex_property(vertex, TYPEVERSION_PROPERTY_KEY, type_version.into())?;
        graph.set_vertex_property(vertex, MODIFICATION_TIMESTAMP_PROPERTY_KEY, PropertyValue::DateTime(now_millis()))?;
        graph.set_vertex_property(vertex, VERSION_PROPERTY_KEY, version.into())?;
        if let Some(updated_by) = &base.updated_by {
            graph.set_vertex_property(vertex, MODIFIED_BY_KEY, updated_by.into())?;
        }

        vertex_to_type_def(&*graph, vertex, def.base_mut())?;
        info!("Updated {} type {} to version {}", stored, current.name, version);

        self.notify(TypeChangeEvent::Updated {
            vertex,
            name: current.name,
            guid: current.guid.unwrap_or_default(),
            category: stored,
        });
        Ok(())
    }

    /// Remove a type vertex and its outgoing edges.
    ///
    /// Fails with `HasReferences`, leaving the graph unchanged, while an
    /// edge from another vertex still points at it. Self-loops go with the
    /// vertex. A stored category that does not parse does not block removal.
    pub fn delete_type_vertex(&self, vertex: VertexId) -> TypeStoreResult<()> {
        let mut graph = self.write_graph()?;

        if !graph.has_vertex(vertex) {
            return Err(GraphError::VertexNotFound(vertex).into());
        }
        if !is_type_vertex(&*graph, vertex) {
            return Err(TypeStoreError::NotTypeVertex(vertex));
        }
        let referenced = graph
            .edges(vertex, Direction::In, None)
            .iter()
            .any(|edge| edge.out_vertex() != vertex);
        if referenced {
            return Err(TypeStoreError::HasReferences(vertex));
        }

        let category = match vertex_category(&*graph, vertex) {
            Ok(category) => Some(category),
            Err(e) => {
                warn!("Deleting type vertex {} with unreadable category: {}", vertex, e);
                None
            }
        };
        let (name, guid) = match graph.vertex(vertex) {
            Some(v) => (
                string_property(v, TYPENAME_PROPERTY_KEY).unwrap_or_default().to_string(),
                string_property(v, GUID_PROPERTY_KEY).map(str::to_string),
            ),
            None => return Err(GraphError::VertexNotFound(vertex).into()),
        };

        let out_edges: Vec<_> = graph
            .edges(vertex, Direction::Out, None)
            .into_iter()
            .map(|edge| edge.id)
            .collect();
        for edge in out_edges {
            graph.remove_edge(edge)?;
        }
        graph.remove_vertex(vertex)?;
        info!("Deleted type {} ({})", name, vertex);

        self.notify(TypeChangeEvent::Deleted {
            vertex,
            name,
            guid,
            category,
        });
        Ok(())
    }
}
