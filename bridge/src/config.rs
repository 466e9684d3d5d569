//! Final resolved configuration types, ready for an SDK client.

use ontobind_binding::JoinCondition;
use ontobind_core::Value;
use ontobind_sdk::{EntityDescriptor, PropertyDescriptor, RelationshipDescriptor};
use serde::Serialize;

/// A property mapping with its target resolved and constants parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum ResolvedMappingKind {
    Column(String),
    /// Constant already checked against the property's data type.
    Constant(Value),
    Computed(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedMapping {
    pub target: PropertyDescriptor,
    pub kind: ResolvedMappingKind,
    pub transform: Option<String>,
}

/// A fully validated entity binding: descriptor plus data source wiring.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityBindingConfig {
    pub descriptor: EntityDescriptor,
    pub source: String,
    pub keys: Vec<String>,
    pub mappings: Vec<ResolvedMapping>,
}

/// A fully validated relationship binding. Both endpoint configs are
/// embedded so an SDK client needs nothing else to wire the edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipContextConfig {
    pub descriptor: RelationshipDescriptor,
    pub source: EntityBindingConfig,
    pub target: EntityBindingConfig,
    pub mappings: Vec<ResolvedMapping>,
    pub join: JoinCondition,
}
