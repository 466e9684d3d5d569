//! Converter error types.

use thiserror::Error;

/// Fatal per-relationship conversion errors. Recorded in the outcome's
/// failure list; siblings are unaffected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("relationship '{relationship}' references unknown entity type '{entity}'")]
    UnresolvedReference {
        relationship: String,
        entity: String,
    },

    #[error(
        "relationship '{relationship}' declares conflicting {end} cardinality: '{first}' vs '{second}'"
    )]
    CardinalityConflict {
        relationship: String,
        end: String,
        first: String,
        second: String,
    },
}

impl ConvertError {
    pub fn unresolved(relationship: impl Into<String>, entity: impl Into<String>) -> Self {
        Self::UnresolvedReference {
            relationship: relationship.into(),
            entity: entity.into(),
        }
    }
}

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;
