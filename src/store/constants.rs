//! Property keys and labels shared with storage
//!
//! These strings are what ends up in the graph; changing any of them orphans
//! previously stored type vertices.

/// Marker key present on every type vertex
pub const VERTEX_TYPE_PROPERTY_KEY: &str = "__type";

/// Marker value stored under `VERTEX_TYPE_PROPERTY_KEY`
pub const VERTEX_TYPE: &str = "typeSystem";

pub const TYPE_CATEGORY_PROPERTY_KEY: &str = "__type.category";
pub const TYPENAME_PROPERTY_KEY: &str = "__type.name";
pub const TYPEDESCRIPTION_PROPERTY_KEY: &str = "__type.description";
pub const TYPEVERSION_PROPERTY_KEY: &str = "__type.version";

pub const GUID_PROPERTY_KEY: &str = "__guid";
pub const TIMESTAMP_PROPERTY_KEY: &str = "__timestamp";
pub const MODIFICATION_TIMESTAMP_PROPERTY_KEY: &str = "__modificationTimestamp";
pub const VERSION_PROPERTY_KEY: &str = "__version";
pub const CREATED_BY_KEY: &str = "__createdBy";
pub const MODIFIED_BY_KEY: &str = "__modifiedBy";

/// Subtype -> supertype edge label. The double dot is part of the stored label.
pub const SUPERTYPE_EDGE_LABEL: &str = "__type..supertype";

pub const DEFAULT_TYPE_VERSION: &str = "1.0";
