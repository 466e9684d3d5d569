//! Schema graph types produced by the parser.

use ontobind_core::{Cardinality, DataType, Diagnostic};
use serde::Serialize;

/// Source location for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub column: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// A typed attribute of an entity or relationship type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityTypeProperty {
    pub name: String,
    pub data_type: DataType,
    pub required: bool,
    pub span: Span,
}

/// A declared kind of ontology node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityType {
    pub name: String,
    /// Properties in source declaration order.
    pub properties: Vec<EntityTypeProperty>,
    pub span: Span,
}

/// One endpoint of a relationship. The entity name is unresolved here;
/// it may refer to an entity declared later in the same document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipEnd {
    pub entity: String,
    pub cardinality: Cardinality,
}

/// A declared, directed edge kind between two entity types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipType {
    pub name: String,
    pub source: RelationshipEnd,
    pub target: RelationshipEnd,
    pub properties: Vec<EntityTypeProperty>,
    pub span: Span,
}

/// The internal schema graph: output of one parse call.
///
/// Declaration order is preserved in both sequences; later stages rely on
/// source order for deterministic tie-breaks. Diagnostics never block
/// parsing of subsequent declarations.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ConversionResult {
    pub entity_types: Vec<EntityType>,
    pub relationship_types: Vec<RelationshipType>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ConversionResult {
    /// Look up an entity type by name.
    pub fn entity_type(&self, name: &str) -> Option<&EntityType> {
        self.entity_types.iter().find(|e| e.name == name)
    }

    /// True if any diagnostic reported dropped content.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == ontobind_core::Severity::Error)
    }
}
