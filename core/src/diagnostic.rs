//! Non-fatal diagnostics.
//!
//! Every pipeline stage accumulates diagnostics and returns them alongside
//! its (possibly partial) result instead of aborting. Only the resolution
//! failures modeled as error enums in the sdk and bridge crates are fatal,
//! and even those abort a single item, never the whole batch.

use serde::Serialize;
use std::fmt;

/// What kind of declaration a duplicate diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuplicateKind {
    EntityType,
    RelationshipType,
    Property,
}

impl fmt::Display for DuplicateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicateKind::EntityType => write!(f, "entity type"),
            DuplicateKind::RelationshipType => write!(f, "relationship type"),
            DuplicateKind::Property => write!(f, "property"),
        }
    }
}

/// How serious a diagnostic is. None of these abort a build call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Content was dropped (a declaration or mapping was skipped).
    Error,
    /// Content was kept, with a first-wins or merge policy applied.
    Warning,
}

/// A structured, non-throwing report of a parse or validation issue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Diagnostic {
    /// A malformed declaration or mapping that was skipped.
    Parse { context: String, detail: String },
    /// A duplicate name; the first declaration wins.
    Duplicate {
        kind: DuplicateKind,
        name: String,
        detail: String,
    },
    /// Merged relationship declarations disagree on cardinality.
    Conflict { relationship: String, detail: String },
}

impl Diagnostic {
    pub fn parse(context: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic::Parse {
            context: context.into(),
            detail: detail.into(),
        }
    }

    pub fn duplicate(
        kind: DuplicateKind,
        name: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Diagnostic::Duplicate {
            kind,
            name: name.into(),
            detail: detail.into(),
        }
    }

    pub fn conflict(relationship: impl Into<String>, detail: impl Into<String>) -> Self {
        Diagnostic::Conflict {
            relationship: relationship.into(),
            detail: detail.into(),
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::Parse { .. } => Severity::Error,
            Diagnostic::Duplicate { .. } | Diagnostic::Conflict { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Parse { context, detail } => {
                write!(f, "parse issue in {}: {}", context, detail)
            }
            Diagnostic::Duplicate { kind, name, detail } => {
                write!(f, "duplicate {} '{}': {}", kind, name, detail)
            }
            Diagnostic::Conflict {
                relationship,
                detail,
            } => {
                write!(
                    f,
                    "cardinality conflict on relationship '{}': {}",
                    relationship, detail
                )
            }
        }
    }
}
