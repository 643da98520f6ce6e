//! Type-definition records
//!
//! Field names serialize in camelCase so catalogs written by other tools of
//! the metadata platform (`superTypes`, `typeVersion`, `createTime`, ...)
//! load unchanged.

use super::category::TypeCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Header fields shared by every kind of type definition
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTypeDef {
    #[serde(default)]
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Schema-revision tag, e.g. "1.0"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_version: Option<String>,

    /// Opaque unique identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guid: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    /// Unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time: Option<i64>,

    /// Unix milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub update_time: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
}

impl BaseTypeDef {
    /// A header with the given name and version 1; everything else unset
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: Some(1),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_type_version(mut self, type_version: impl Into<String>) -> Self {
        self.type_version = Some(type_version.into());
        self
    }

    pub fn with_guid(mut self, guid: impl Into<String>) -> Self {
        self.guid = Some(guid.into());
        self
    }
}

/// Attribute carried by struct, classification and entity definitions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDef {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_optional: bool,
}

/// Value of an enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumElementDef {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Entity kind (stored as CLASS)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default)]
    pub super_types: BTreeSet<String>,
    #[serde(default)]
    pub attribute_defs: Vec<AttributeDef>,
}

/// Classification (tag) kind (stored as TRAIT)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassificationDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default)]
    pub super_types: BTreeSet<String>,
    #[serde(default)]
    pub attribute_defs: Vec<AttributeDef>,
}

/// Reusable struct (stored as STRUCT)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StructDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default)]
    pub attribute_defs: Vec<AttributeDef>,
}

/// Enumeration (stored as ENUM)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    #[serde(flatten)]
    pub base: BaseTypeDef,
    #[serde(default)]
    pub element_defs: Vec<EnumElementDef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// Any type definition, tagged by its concrete kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeDef {
    Entity(EntityDef),
    Classification(ClassificationDef),
    Struct(StructDef),
    Enum(EnumDef),
}

impl TypeDef {
    pub fn entity(base: BaseTypeDef) -> Self {
        TypeDef::Entity(EntityDef {
            base,
            ..EntityDef::default()
        })
    }

    pub fn classification(base: BaseTypeDef) -> Self {
        TypeDef::Classification(ClassificationDef {
            base,
            ..ClassificationDef::default()
        })
    }

    pub fn structure(base: BaseTypeDef) -> Self {
        TypeDef::Struct(StructDef {
            base,
            ..StructDef::default()
        })
    }

    pub fn enumeration(base: BaseTypeDef) -> Self {
        TypeDef::Enum(EnumDef {
            base,
            ..EnumDef::default()
        })
    }

    /// Builder: add supertypes to an entity or classification.
    /// Other kinds have no supertypes and are returned unchanged.
    pub fn with_super_types<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        match &mut self {
            TypeDef::Entity(def) => def.super_types.extend(names.into_iter().map(Into::into)),
            TypeDef::Classification(def) => def.super_types.extend(names.into_iter().map(Into::into)),
            TypeDef::Struct(_) | TypeDef::Enum(_) => {}
        }
        self
    }

    /// Category the vertex for this definition is stamped with
    pub fn category(&self) -> TypeCategory {
        match self {
            TypeDef::Entity(_) => TypeCategory::Class,
            TypeDef::Classification(_) => TypeCategory::Trait,
            TypeDef::Struct(_) => TypeCategory::Struct,
            TypeDef::Enum(_) => TypeCategory::Enum,
        }
    }

    pub fn base(&self) -> &BaseTypeDef {
        match self {
            TypeDef::Entity(def) => &def.base,
            TypeDef::Classification(def) => &def.base,
            TypeDef::Struct(def) => &def.base,
            TypeDef::Enum(def) => &def.base,
        }
    }

    pub fn base_mut(&mut self) -> &mut BaseTypeDef {
        match self {
            TypeDef::Entity(def) => &mut def.base,
            TypeDef::Classification(def) => &mut def.base,
            TypeDef::Struct(def) => &mut def.base,
            TypeDef::Enum(def) => &mut def.base,
        }
    }

    pub fn name(&self) -> &str {
        &self.base().name
    }

    /// Declared supertypes; `None` for kinds that cannot inherit
    pub fn super_types(&self) -> Option<&BTreeSet<String>> {
        match self {
            TypeDef::Entity(def) => Some(&def.super_types),
            TypeDef::Classification(def) => Some(&def.super_types),
            TypeDef::Struct(_) | TypeDef::Enum(_) => None,
        }
    }
}

/// A whole catalog, grouped by kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypesDef {
    #[serde(default)]
    pub enum_defs: Vec<EnumDef>,
    #[serde(default)]
    pub struct_defs: Vec<StructDef>,
    #[serde(default)]
    pub classification_defs: Vec<ClassificationDef>,
    #[serde(default)]
    pub entity_defs: Vec<EntityDef>,
}

impl TypesDef {
    pub fn len(&self) -> usize {
        self.enum_defs.len() + self.struct_defs.len() + self.classification_defs.len() + self.entity_defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the catalog into tagged definitions: enums, structs,
    /// classifications, then entities
    pub fn into_type_defs(self) -> Vec<TypeDef> {
        let mut defs = Vec::with_capacity(self.len());
        defs.extend(self.enum_defs.into_iter().map(TypeDef::Enum));
        defs.extend(self.struct_defs.into_iter().map(TypeDef::Struct));
        defs.extend(self.classification_defs.into_iter().map(TypeDef::Classification));
        defs.extend(self.entity_defs.into_iter().map(TypeDef::Entity));
        defs
    }

    /// Inverse of `into_type_defs`
    pub fn from_type_defs(defs: impl IntoIterator<Item = TypeDef>) -> Self {
        let mut types = TypesDef::default();
        for def in defs {
            match def {
                TypeDef::Enum(d) => types.enum_defs.push(d),
                TypeDef::Struct(d) => types.struct_defs.push(d),
                TypeDef::Classification(d) => types.classification_defs.push(d),
                TypeDef::Entity(d) => types.entity_defs.push(d),
            }
        }
        types
    }
}
