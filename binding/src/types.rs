//! Validated binding types.

use ontobind_core::Diagnostic;
use serde::Serialize;

/// How one property gets its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MappingKind {
    /// Value comes from a named source column.
    Column(String),
    /// Fixed literal, kept as text until the bridge type-checks it
    /// against the property's declared data type.
    Constant(String),
    /// Value is produced by a named expression the runtime evaluates.
    Computed(String),
}

/// Maps one declared property to a value source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyMapping {
    pub property: String,
    pub kind: MappingKind,
    pub transform: Option<String>,
}

/// Binds one entity type to a tabular data source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityBinding {
    pub entity: String,
    pub source: String,
    /// Key property names identifying a row within the source.
    pub keys: Vec<String>,
    pub mappings: Vec<PropertyMapping>,
}

/// How rows of the two endpoint bindings are matched up.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinCondition {
    pub source_key: String,
    pub target_key: String,
}

/// Binds one relationship type to a pair of entity bindings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipBinding {
    pub relationship: String,
    pub source_binding: String,
    pub target_binding: String,
    pub mappings: Vec<PropertyMapping>,
    pub join: JoinCondition,
}

/// Output of one binding parse: validated bindings in document order plus
/// shape diagnostics for anything dropped along the way.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BindingSet {
    pub entities: Vec<EntityBinding>,
    pub relationships: Vec<RelationshipBinding>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BindingSet {
    /// Look up an entity binding by entity type name.
    pub fn entity_binding(&self, entity: &str) -> Option<&EntityBinding> {
        self.entities.iter().find(|b| b.entity == entity)
    }
}
