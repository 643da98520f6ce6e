//! Type-definition records and their categories

pub mod category;
pub mod model;

pub use category::{TypeCategory, UnknownCategory};
pub use model::{
    AttributeDef, BaseTypeDef, ClassificationDef, EntityDef, EnumDef, EnumElementDef, StructDef, TypeDef, TypesDef,
};
