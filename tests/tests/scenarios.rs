//! End-to-end pipeline scenarios: schema text and binding text in,
//! resolved configuration and structured failures out.

use ontobind_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_machine_park_resolves_completely() {
    // GIVEN the machine-park schema and a matching binding document
    // WHEN the whole pipeline runs
    let result = run(machines_schema(), machines_bindings());

    // THEN two entity configs, one relationship config, nothing fatal
    assert!(result.diagnostics.is_empty());
    assert!(result.schema.failures.is_empty());
    assert!(result.bindings.failures.is_empty());
    assert_eq!(result.bindings.entities.len(), 2);
    assert_eq!(result.bindings.relationships.len(), 1);

    let rel = &result.bindings.relationships[0];
    assert_eq!(rel.descriptor.name, "locatedAt");
    assert_eq!(rel.descriptor.source.cardinality, Cardinality::Many);
    assert_eq!(rel.descriptor.target.cardinality, Cardinality::One);
    assert_eq!(rel.source.descriptor.name, "Machine");
    assert_eq!(rel.target.descriptor.name, "Plant");
    assert_eq!(rel.join.source_key, "serialNumber");
    assert_eq!(rel.join.target_key, "name");
}

#[test]
fn test_binding_to_undeclared_property_fails_that_binding_only() {
    // GIVEN a binding that maps Machine.model, which the schema never declares
    let bindings = r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
    mappings:
      - property: model
        column: Model
  - entity: Plant
    source: plants.csv
    keys: [name]
"#;

    // WHEN
    let result = run(machines_schema(), bindings);

    // THEN the Machine config is not produced, Plant still resolves
    assert_eq!(result.bindings.entities.len(), 1);
    assert_eq!(result.bindings.entities[0].descriptor.name, "Plant");
    assert_eq!(
        result.bindings.failures,
        vec![BridgeError::validation("Machine", "model")]
    );
}

#[test]
fn test_relationship_to_undeclared_entity_yields_unresolved_reference() {
    // GIVEN a schema where `monitors` targets an entity that never appears
    let schema = r#"
    entity Machine { serialNumber: string [required] }
    relationship monitors (source: Machine, target: Sensor)
    "#;

    // WHEN
    let result = run(schema, "{}");

    // THEN no descriptor for `monitors`, one failure naming it
    assert!(result.schema.relationship("monitors").is_none());
    assert_eq!(
        result.schema.failures,
        vec![ConvertError::unresolved("monitors", "Sensor")]
    );
}

#[test]
fn test_duplicate_relationship_with_conflicting_cardinality_merges() {
    // GIVEN locatedAt declared twice, disagreeing on the target end
    let schema = r#"
    entity Machine { serialNumber: string [required] }
    entity Plant { name: string [required] }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    relationship locatedAt (source: Machine [many], target: Plant [many])
    "#;

    // WHEN
    let result = run(schema, "{}");

    // THEN one merged descriptor with the first cardinality, one warning
    assert_eq!(result.schema.relationships.len(), 1);
    assert_eq!(
        result.schema.relationships[0].target.cardinality,
        Cardinality::One
    );
    assert!(result.schema.failures.is_empty());
    assert_eq!(result.diagnostics.len(), 1);
    assert!(matches!(
        result.diagnostics[0],
        Diagnostic::Conflict { .. }
    ));
    assert_eq!(result.diagnostics[0].severity(), Severity::Warning);
}

#[test]
fn test_strict_mode_drops_conflicting_relationship() {
    let schema = r#"
    entity Machine { serialNumber: string [required] }
    entity Plant { name: string [required] }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    relationship locatedAt (source: Machine [many], target: Plant [many])
    "#;

    let result = assemble(schema, "{}", &ConvertOptions { strict: true }).unwrap();

    assert!(result.schema.relationships.is_empty());
    assert!(matches!(
        result.schema.failures[0],
        ConvertError::CardinalityConflict { .. }
    ));
}

#[test]
fn test_recording_builder_receives_dependency_order() {
    // GIVEN a fully resolved pipeline output
    let result = run(machines_schema(), machines_bindings());
    let mut builder = RecordingBuilder::new();

    // WHEN
    apply(&result.schema, &result.bindings, &mut builder).unwrap();

    // THEN every relationship call comes after the entity calls it needs
    assert_eq!(
        builder.calls,
        vec![
            BuilderCall::EntityType("Machine".to_string()),
            BuilderCall::EntityType("Plant".to_string()),
            BuilderCall::RelationshipType("locatedAt".to_string()),
            BuilderCall::EntityBinding("Machine".to_string()),
            BuilderCall::EntityBinding("Plant".to_string()),
            BuilderCall::RelationshipContext("locatedAt".to_string()),
        ]
    );
}

#[test]
fn test_schema_diagnostics_flow_through_assemble() {
    // GIVEN a schema with a duplicate entity and a clean binding document
    let schema = r#"
    entity Machine { serialNumber: string [required] }
    entity Machine { serialNumber: string }
    "#;

    let result = run(schema, "{}");

    assert_eq!(result.schema.entities.len(), 1);
    assert_eq!(result.diagnostics.len(), 1);
    assert!(matches!(
        result.diagnostics[0],
        Diagnostic::Duplicate { .. }
    ));
}
