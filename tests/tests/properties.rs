//! Structural properties the pipeline guarantees regardless of input.

use ontobind_tests::prelude::*;
use pretty_assertions::assert_eq;

#[test]
fn test_declaration_order_is_preserved_end_to_end() {
    // GIVEN entities and relationships in a specific source order
    let schema = r#"
    entity Zeta { x: int }
    entity Alpha { y: int }
    entity Mid { z: int }
    relationship second (source: Alpha, target: Mid)
    relationship first (source: Zeta, target: Alpha)
    "#;

    // WHEN
    let result = run(schema, "{}");

    // THEN descriptor sequences follow source order, not name order
    let entity_names: Vec<&str> = result.schema.entities.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(entity_names, vec!["Zeta", "Alpha", "Mid"]);
    let rel_names: Vec<&str> = result
        .schema
        .relationships
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(rel_names, vec!["second", "first"]);
}

#[test]
fn test_string_property_round_trip() {
    // GIVEN
    let schema = "entity Machine { serialNumber: string }";

    // WHEN
    let result = run(schema, "{}");

    // THEN exactly one property, named and typed as declared
    let machine = result.schema.entity("Machine").unwrap();
    assert_eq!(machine.properties.len(), 1);
    assert_eq!(machine.properties[0].name, "serialNumber");
    assert_eq!(machine.properties[0].data_type, DataType::String);
    assert!(!machine.properties[0].required);
}

#[test]
fn test_bridge_is_idempotent() {
    // GIVEN one converted schema and one parsed binding set
    let schema = convert(
        &parse_schema(machines_schema()).unwrap(),
        &ConvertOptions::default(),
    );
    let bindings = parse_bindings(machines_bindings()).unwrap();
    let bridge = Bridge::new(&schema);

    // WHEN the bridge runs twice over identical inputs
    let first = bridge.bind(&bindings);
    let second = bridge.bind(&bindings);

    // THEN outputs are structurally equal
    assert_eq!(first, second);
}

#[test]
fn test_entity_declaration_order_does_not_change_relationship_config() {
    // GIVEN the same relationship over two entity declaration orders
    let plant_first = r#"
    entity Plant { name: string [required] }
    entity Machine { serialNumber: string [required] }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    "#;
    let machine_first = r#"
    entity Machine { serialNumber: string [required] }
    entity Plant { name: string [required] }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    "#;

    // WHEN
    let a = run(plant_first, machines_bindings());
    let b = run(machine_first, machines_bindings());

    // THEN the relationship configs agree on everything but allocated ids
    let ra = &a.bindings.relationships[0];
    let rb = &b.bindings.relationships[0];
    assert_eq!(ra.descriptor.name, rb.descriptor.name);
    assert_eq!(
        ra.descriptor.source.entity_name,
        rb.descriptor.source.entity_name
    );
    assert_eq!(
        ra.descriptor.source.cardinality,
        rb.descriptor.source.cardinality
    );
    assert_eq!(
        ra.descriptor.target.cardinality,
        rb.descriptor.target.cardinality
    );
    assert_eq!(ra.join, rb.join);
    assert_eq!(ra.mappings, rb.mappings);
    assert_eq!(ra.source.source, rb.source.source);
    assert_eq!(ra.source.keys, rb.source.keys);
    assert_eq!(ra.target.source, rb.target.source);
}

#[test]
fn test_fatal_errors_never_abort_sibling_items() {
    // GIVEN a batch where one entity binding, one relationship binding
    // and one schema relationship are each independently broken
    let schema = r#"
    entity Machine { serialNumber: string [required] }
    entity Plant { name: string [required] }
    relationship locatedAt (source: Machine [many], target: Plant [one])
    relationship monitors (source: Machine, target: Sensor)
    "#;
    let bindings = r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
  - entity: Depot
    source: depots.csv
  - entity: Plant
    source: plants.csv
    keys: [name]
relationships:
  - relationship: monitors
    source_binding: Machine
    target_binding: Plant
    join:
      source_key: serialNumber
      target_key: name
  - relationship: locatedAt
    source_binding: Machine
    target_binding: Plant
    join:
      source_key: serialNumber
      target_key: name
"#;

    // WHEN
    let result = run(schema, bindings);

    // THEN every healthy sibling still resolves
    assert_eq!(result.schema.failures.len(), 1);
    assert_eq!(result.bindings.entities.len(), 2);
    assert_eq!(result.bindings.relationships.len(), 1);
    assert_eq!(result.bindings.relationships[0].descriptor.name, "locatedAt");
    assert_eq!(
        result.bindings.failures,
        vec![
            BridgeError::unknown_entity("Depot"),
            BridgeError::unknown_relationship("monitors"),
        ]
    );
}
