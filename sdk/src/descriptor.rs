//! Resolved SDK descriptor types.

use ontobind_core::{Cardinality, DataType};
use serde::Serialize;
use std::fmt;

/// Identifier of a resolved entity type, allocated in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityTypeId(pub u32);

/// Identifier of a resolved relationship type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct RelationshipTypeId(pub u32);

impl fmt::Display for EntityTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for RelationshipTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "r{}", self.0)
    }
}

/// A typed attribute on a resolved descriptor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
}

/// A resolved entity type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityDescriptor {
    pub id: EntityTypeId,
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
}

impl EntityDescriptor {
    pub fn get_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }
}

/// One resolved end of a relationship type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedEnd {
    pub entity: EntityTypeId,
    pub entity_name: String,
    pub cardinality: Cardinality,
}

/// A resolved relationship type. Both ends point at entity descriptors
/// that exist in the same outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipDescriptor {
    pub id: RelationshipTypeId,
    pub name: String,
    pub source: ResolvedEnd,
    pub target: ResolvedEnd,
    pub properties: Vec<PropertyDescriptor>,
}

impl RelationshipDescriptor {
    pub fn get_property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn has_property(&self, name: &str) -> bool {
        self.get_property(name).is_some()
    }
}
