//! Relationship end cardinality.

use serde::Serialize;
use std::fmt;

/// How many instances may participate at one end of a relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Cardinality {
    /// At most one instance.
    #[default]
    One,
    /// Any number of instances.
    Many,
}

impl Cardinality {
    /// Resolve a schema modifier name (`one` / `many`) to a cardinality.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "one" => Some(Cardinality::One),
            "many" => Some(Cardinality::Many),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cardinality::One => "one",
            Cardinality::Many => "many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
