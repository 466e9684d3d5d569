//! Raw document structs, deserialized straight from YAML.
//!
//! Everything here is optional and stringly-typed; validation into the
//! closed binding types happens in `parse`.

use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawDocument {
    #[serde(default)]
    pub entities: Vec<RawEntityBinding>,
    #[serde(default)]
    pub relationships: Vec<RawRelationshipBinding>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawEntityBinding {
    pub entity: Option<String>,
    pub source: Option<String>,
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub mappings: Vec<RawMapping>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawRelationshipBinding {
    pub relationship: Option<String>,
    pub source_binding: Option<String>,
    pub target_binding: Option<String>,
    #[serde(default)]
    pub mappings: Vec<RawMapping>,
    pub join: Option<RawJoin>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawMapping {
    pub property: Option<String>,
    pub column: Option<String>,
    pub constant: Option<serde_yaml::Value>,
    pub computed: Option<String>,
    pub transform: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RawJoin {
    pub source_key: Option<String>,
    pub target_key: Option<String>,
}

/// Render a YAML scalar as the string form the bridge will type-check.
/// Non-scalar values have no literal form and are rejected by the caller.
pub(crate) fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    match value {
        serde_yaml::Value::String(s) => Some(s.clone()),
        serde_yaml::Value::Number(n) => Some(n.to_string()),
        serde_yaml::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
