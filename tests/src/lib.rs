//! Shared fixtures for the integration scenarios.

pub mod prelude {
    pub use ontobind_binding::parse_bindings;
    pub use ontobind_bridge::{
        apply, assemble, Bridge, BridgeError, BuilderCall, OntologyBuilder, RecordingBuilder,
    };
    pub use ontobind_core::{Cardinality, DataType, Diagnostic, Severity, Value};
    pub use ontobind_parser::parse_schema;
    pub use ontobind_sdk::{convert, ConvertError, ConvertOptions, ConvertOutcome};

    pub use crate::{machines_bindings, machines_schema, run};
}

use ontobind_bridge::{assemble, AssembleResult};
use ontobind_sdk::ConvertOptions;

/// The machine-park schema used across scenarios.
pub fn machines_schema() -> &'static str {
    r#"
    entity Machine {
        serialNumber: string [required]
    }
    entity Plant {
        name: string [required]
    }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    "#
}

/// Bindings matching [`machines_schema`].
pub fn machines_bindings() -> &'static str {
    r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
    mappings:
      - property: serialNumber
        column: SerialNo
  - entity: Plant
    source: plants.csv
    keys: [name]
    mappings:
      - property: name
        column: PlantName
relationships:
  - relationship: locatedAt
    source_binding: Machine
    target_binding: Plant
    join:
      source_key: serialNumber
      target_key: name
"#
}

/// Run the whole pipeline with default options, panicking on whole-input
/// failures (fixtures are expected to at least tokenize).
pub fn run(schema: &str, bindings: &str) -> AssembleResult {
    assemble(schema, bindings, &ConvertOptions::default()).expect("fixture inputs must parse")
}
