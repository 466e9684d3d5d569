//! Bridge error types.

use thiserror::Error;

/// Fatal per-binding bridge errors. Each aborts only the binding it
/// names; siblings continue and the outcome lists every failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BridgeError {
    #[error("binding references unknown entity type '{entity}'")]
    UnknownEntityType { entity: String },

    #[error("binding references unknown relationship type '{relationship}'")]
    UnknownRelationshipType { relationship: String },

    #[error("relationship '{relationship}' {endpoint} endpoint '{entity}' has no entity binding")]
    MissingEndpointBinding {
        relationship: String,
        endpoint: String,
        entity: String,
    },

    #[error(
        "relationship '{relationship}' {endpoint} endpoint is bound to '{actual}', expected '{expected}'"
    )]
    EndpointMismatch {
        relationship: String,
        endpoint: String,
        expected: String,
        actual: String,
    },

    #[error("'{owner}' has no property '{property}'")]
    Validation { owner: String, property: String },

    #[error(
        "constant '{literal}' for '{owner}.{property}' does not parse as {expected}"
    )]
    TypeMismatch {
        owner: String,
        property: String,
        expected: String,
        literal: String,
    },

    #[error(
        "relationship '{relationship}' {endpoint} join key '{key}' is not a key of that entity binding"
    )]
    InvalidJoinKey {
        relationship: String,
        endpoint: String,
        key: String,
    },
}

impl BridgeError {
    pub fn unknown_entity(entity: impl Into<String>) -> Self {
        Self::UnknownEntityType {
            entity: entity.into(),
        }
    }

    pub fn unknown_relationship(relationship: impl Into<String>) -> Self {
        Self::UnknownRelationshipType {
            relationship: relationship.into(),
        }
    }

    pub fn validation(owner: impl Into<String>, property: impl Into<String>) -> Self {
        Self::Validation {
            owner: owner.into(),
            property: property.into(),
        }
    }
}

/// Result type for bridge operations.
pub type BridgeResult<T> = Result<T, BridgeError>;
