//! Type definition <-> vertex property projection

use super::constants::*;
use super::supertype::get_super_type_names;
use super::{TypeDefGraphStore, TypeStoreError, TypeStoreResult};
use crate::graph::{EdgeLabel, GraphEngine, GraphError, GraphResult, PropertyValue, Vertex, VertexId};
use crate::typedef::{BaseTypeDef, ClassificationDef, EntityDef, EnumDef, StructDef, TypeCategory, TypeDef};
use uuid::Uuid;

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Fill in header fields the caller left blank
pub fn apply_defaults(base: &mut BaseTypeDef, default_type_version: &str, now: i64) {
    if is_blank(base.type_version.as_deref()) {
        base.type_version = Some(default_type_version.to_string());
    }
    if is_blank(base.guid.as_deref()) {
        base.guid = Some(Uuid::new_v4().to_string());
    }
    if base.create_time.is_none() {
        base.create_time = Some(now);
    }
    if base.update_time.is_none() {
        base.update_time = Some(now);
    }
}

/// Stored description: the given one, or the name when blank
pub(crate) fn description_or_name(base: &BaseTypeDef) -> &str {
    match base.description.as_deref() {
        Some(d) if !d.trim().is_empty() => d,
        _ => &base.name,
    }
}

/// Every property a type vertex carries for `def`, marker and category included.
/// Absent optional fields produce no entry.
pub fn type_def_to_properties(def: &TypeDef) -> Vec<(&'static str, PropertyValue)> {
    let base = def.base();
    let mut props = vec![
        (VERTEX_TYPE_PROPERTY_KEY, PropertyValue::from(VERTEX_TYPE)),
        (TYPE_CATEGORY_PROPERTY_KEY, def.category().as_str().into()),
        (TYPENAME_PROPERTY_KEY, base.name.as_str().into()),
        (TYPEDESCRIPTION_PROPERTY_KEY, description_or_name(base).into()),
    ];

    if let Some(type_version) = &base.type_version {
        props.push((TYPEVERSION_PROPERTY_KEY, type_version.into()));
    }
    if let Some(guid) = &base.guid {
        props.push((GUID_PROPERTY_KEY, guid.into()));
    }
    if let Some(create_time) = base.create_time {
        props.push((TIMESTAMP_PROPERTY_KEY, PropertyValue::DateTime(create_time)));
    }
    if let Some(update_time) = base.update_time {
        props.push((MODIFICATION_TIMESTAMP_PROPERTY_KEY, PropertyValue::DateTime(update_time)));
    }
    if let Some(version) = base.version {
        props.push((VERSION_PROPERTY_KEY, version.into()));
    }
    if let Some(created_by) = &base.created_by {
        props.push((CREATED_BY_KEY, created_by.into()));
    }
    if let Some(updated_by) = &base.updated_by {
        props.push((MODIFIED_BY_KEY, updated_by.into()));
    }

    props
}

/// Write the projection of `def` onto an existing vertex
pub fn type_def_to_vertex<G: GraphEngine>(graph: &mut G, vertex: VertexId, def: &TypeDef) -> GraphResult<()> {
    for (key, value) in type_def_to_properties(def) {
        graph.set_vertex_property(vertex, key, value)?;
    }
    Ok(())
}

pub(crate) fn string_property<'v>(vertex: &'v Vertex, key: &str) -> Option<&'v str> {
    vertex.get_property(key).and_then(PropertyValue::as_string)
}

fn datetime_property(vertex: &Vertex, key: &str) -> Option<i64> {
    vertex.get_property(key).and_then(PropertyValue::as_datetime)
}

fn integer_property(vertex: &Vertex, key: &str) -> Option<i64> {
    vertex.get_property(key).and_then(PropertyValue::as_integer)
}

/// Read the header fields stored on `vertex` into `base`.
///
/// Only fields present on the vertex (with the expected value type) are
/// written; everything else in `base` is left as it was.
pub fn vertex_to_type_def<G: GraphEngine>(graph: &G, vertex: VertexId, base: &mut BaseTypeDef) -> TypeStoreResult<()> {
    let v = graph.vertex(vertex).ok_or(GraphError::VertexNotFound(vertex))?;

    if let Some(name) = string_property(v, TYPENAME_PROPERTY_KEY) {
        base.name = name.to_string();
    }
    if let Some(description) = string_property(v, TYPEDESCRIPTION_PROPERTY_KEY) {
        base.description = Some(description.to_string());
    }
    if let Some(type_version) = string_property(v, TYPEVERSION_PROPERTY_KEY) {
        base.type_version = Some(type_version.to_string());
    }
    if let Some(guid) = string_property(v, GUID_PROPERTY_KEY) {
        base.guid = Some(guid.to_string());
    }
    if let Some(created_by) = string_property(v, CREATED_BY_KEY) {
        base.created_by = Some(created_by.to_string());
    }
    if let Some(updated_by) = string_property(v, MODIFIED_BY_KEY) {
        base.updated_by = Some(updated_by.to_string());
    }
    if let Some(create_time) = datetime_property(v, TIMESTAMP_PROPERTY_KEY) {
        base.create_time = Some(create_time);
    }
    if let Some(update_time) = datetime_property(v, MODIFICATION_TIMESTAMP_PROPERTY_KEY) {
        base.update_time = Some(update_time);
    }
    if let Some(version) = integer_property(v, VERSION_PROPERTY_KEY) {
        base.version = Some(version);
    }

    Ok(())
}

/// Category stored on a type vertex
pub fn vertex_category<G: GraphEngine>(graph: &G, vertex: VertexId) -> TypeStoreResult<TypeCategory> {
    let v = graph.vertex(vertex).ok_or(GraphError::VertexNotFound(vertex))?;

    if string_property(v, VERTEX_TYPE_PROPERTY_KEY) != Some(VERTEX_TYPE) {
        return Err(TypeStoreError::NotTypeVertex(vertex));
    }
    let stored = string_property(v, TYPE_CATEGORY_PROPERTY_KEY).ok_or(TypeStoreError::NotTypeVertex(vertex))?;
    Ok(stored.parse()?)
}

/// Rebuild the full definition stored at `vertex`
pub(crate) fn load_type_def<G: GraphEngine>(graph: &G, vertex: VertexId, supertype_label: &EdgeLabel) -> TypeStoreResult<TypeDef> {
    let category = vertex_category(graph, vertex)?;
    let mut base = BaseTypeDef::default();
    vertex_to_type_def(graph, vertex, &mut base)?;

    let def = match category {
        TypeCategory::Class => TypeDef::Entity(EntityDef {
            base,
            super_types: get_super_type_names(graph, vertex, supertype_label),
            attribute_defs: Vec::new(),
        }),
        TypeCategory::Trait => TypeDef::Classification(ClassificationDef {
            base,
            super_types: get_super_type_names(graph, vertex, supertype_label),
            attribute_defs: Vec::new(),
        }),
        TypeCategory::Struct => TypeDef::Struct(StructDef {
            base,
            attribute_defs: Vec::new(),
        }),
        TypeCategory::Enum => TypeDef::Enum(EnumDef {
            base,
            element_defs: Vec::new(),
            default_value: None,
        }),
    };
    Ok(def)
}

impl<G: GraphEngine> TypeDefGraphStore<G> {
    /// Copy the stored header of `vertex` into `base`
    pub fn vertex_to_type_def(&self, vertex: VertexId, base: &mut BaseTypeDef) -> TypeStoreResult<()> {
        let graph = self.read_graph()?;
        vertex_to_type_def(&*graph, vertex, base)
    }

    /// Rebuild the definition stored at `vertex`, supertypes included.
    ///
    /// Attribute and enum element payloads are not stored on the vertex and
    /// come back empty.
    pub fn load_type_def(&self, vertex: VertexId) -> TypeStoreResult<TypeDef> {
        let graph = self.read_graph()?;
        load_type_def(&*graph, vertex, &self.supertype_label)
    }

    pub fn vertex_category(&self, vertex: VertexId) -> TypeStoreResult<TypeCategory> {
        let graph = self.read_graph()?;
        vertex_category(&*graph, vertex)
    }
}
