//! Structural kind of a type definition

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category stamped on a type vertex at creation
///
/// Entity definitions map to `Class`, classification (tag) definitions to
/// `Trait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeCategory {
    Class,
    Trait,
    Struct,
    Enum,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 4] = [
        TypeCategory::Class,
        TypeCategory::Trait,
        TypeCategory::Struct,
        TypeCategory::Enum,
    ];

    /// Value written under the category property key
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeCategory::Class => "CLASS",
            TypeCategory::Trait => "TRAIT",
            TypeCategory::Struct => "STRUCT",
            TypeCategory::Enum => "ENUM",
        }
    }
}

impl fmt::Display for TypeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a category string that names no known category
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown type category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for TypeCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLASS" => Ok(TypeCategory::Class),
            "TRAIT" => Ok(TypeCategory::Trait),
            "STRUCT" => Ok(TypeCategory::Struct),
            "ENUM" => Ok(TypeCategory::Enum),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_strings_parse_back() {
        for category in TypeCategory::ALL {
            assert_eq!(category.as_str().parse::<TypeCategory>(), Ok(category));
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "RELATIONSHIP".parse::<TypeCategory>().unwrap_err();
        assert_eq!(err, UnknownCategory("RELATIONSHIP".to_string()));
        assert!("class".parse::<TypeCategory>().is_err());
    }

    #[test]
    fn test_serde_matches_storage_string() {
        let json = serde_json::to_string(&TypeCategory::Trait).unwrap();
        assert_eq!(json, "\"TRAIT\"");
    }
}
