//! Whole-catalog load and export

use super::lifecycle::{created_event, insert_type_vertex, prepare};
use super::lookup::find_type_vertices_by_category;
use super::mapper::{load_type_def, now_millis};
use super::supertype::link_super_types;
use super::{TypeDefGraphStore, TypeStoreResult};
use crate::graph::{GraphEngine, VertexId};
use crate::typedef::{TypeCategory, TypeDef, TypesDef};
use tracing::info;

impl<G: GraphEngine> TypeDefGraphStore<G> {
    /// Create every definition of `types`, then wire supertype edges.
    ///
    /// Definitions are created enums first, then structs, classifications and
    /// entities. Every header is validated before the first vertex is
    /// allocated, so an invalid definition leaves the graph untouched. Once all
    /// vertices exist, each entity and classification is linked to its
    /// supertypes of the same category; forward references within the catalog
    /// therefore resolve.
    ///
    /// Returns each created definition, defaults filled in, with its vertex.
    pub fn create_types_def(&self, types: TypesDef) -> TypeStoreResult<Vec<(TypeDef, VertexId)>> {
        let now = now_millis();
        let mut defs = types.into_type_defs();
        for def in defs.iter_mut() {
            let base = prepare(def, &self.config.default_type_version, now)?;
            *def.base_mut() = base;
        }

        let mut graph = self.write_graph()?;

        let mut created = Vec::with_capacity(defs.len());
        for def in defs {
            let vertex = insert_type_vertex(&mut *graph, &def)?;
            created.push((def, vertex));
        }

        for (def, vertex) in &created {
            if let Some(super_types) = def.super_types() {
                link_super_types(&mut *graph, *vertex, super_types, def.category(), &self.supertype_label)?;
            }
        }

        info!("Loaded {} type definitions", created.len());
        for (def, vertex) in &created {
            self.notify(created_event(*vertex, def));
        }
        Ok(created)
    }

    /// Rebuild the catalog currently stored in the graph
    pub fn load_types_def(&self) -> TypeStoreResult<TypesDef> {
        let graph = self.read_graph()?;

        let mut defs = Vec::new();
        for category in TypeCategory::ALL {
            for vertex in find_type_vertices_by_category(&*graph, category) {
                defs.push(load_type_def(&*graph, vertex, &self.supertype_label)?);
            }
        }
        Ok(TypesDef::from_type_defs(defs))
    }
}
