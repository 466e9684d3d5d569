//! Binding resolution against SDK descriptors.

use crate::config::*;
use crate::error::{BridgeError, BridgeResult};
use ontobind_binding::{BindingSet, EntityBinding, MappingKind, PropertyMapping, RelationshipBinding};
use ontobind_sdk::{ConvertOutcome, EntityDescriptor, PropertyDescriptor, RelationshipDescriptor};
use tracing::debug;

/// Output of one bridge call: resolved configs in binding order plus the
/// failures for every binding that did not make it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BridgeOutcome {
    pub entities: Vec<EntityBindingConfig>,
    pub relationships: Vec<RelationshipContextConfig>,
    pub failures: Vec<BridgeError>,
}

/// Resolves binding sets against a converted schema.
///
/// Borrows the descriptor sequences and keeps no state across calls, so
/// one bridge can serve any number of `bind` calls (including from
/// concurrent callers) with structurally equal results for equal inputs.
pub struct Bridge<'a> {
    entities: &'a [EntityDescriptor],
    relationships: &'a [RelationshipDescriptor],
}

impl<'a> Bridge<'a> {
    pub fn new(outcome: &'a ConvertOutcome) -> Self {
        Self {
            entities: &outcome.entities,
            relationships: &outcome.relationships,
        }
    }

    /// Resolve a binding set. Entity bindings resolve first so that
    /// relationship bindings can embed their endpoint configs; a fatal
    /// error aborts only the binding it occurred in.
    pub fn bind(&self, bindings: &BindingSet) -> BridgeOutcome {
        let mut outcome = BridgeOutcome::default();

        for binding in &bindings.entities {
            match self.bind_entity(binding) {
                Ok(config) => outcome.entities.push(config),
                Err(error) => outcome.failures.push(error),
            }
        }

        for binding in &bindings.relationships {
            match self.bind_relationship(binding, &outcome.entities) {
                Ok(config) => outcome.relationships.push(config),
                Err(error) => outcome.failures.push(error),
            }
        }

        debug!(
            entities = outcome.entities.len(),
            relationships = outcome.relationships.len(),
            failures = outcome.failures.len(),
            "resolved binding set"
        );
        outcome
    }

    fn bind_entity(&self, binding: &EntityBinding) -> BridgeResult<EntityBindingConfig> {
        let descriptor = self
            .entities
            .iter()
            .find(|e| e.name == binding.entity)
            .ok_or_else(|| BridgeError::unknown_entity(&binding.entity))?;

        for key in &binding.keys {
            if !descriptor.has_property(key) {
                return Err(BridgeError::validation(&descriptor.name, key));
            }
        }

        let mappings = resolve_mappings(&descriptor.name, &binding.mappings, |name| {
            descriptor.get_property(name)
        })?;

        Ok(EntityBindingConfig {
            descriptor: descriptor.clone(),
            source: binding.source.clone(),
            keys: binding.keys.clone(),
            mappings,
        })
    }

    fn bind_relationship(
        &self,
        binding: &RelationshipBinding,
        entities: &[EntityBindingConfig],
    ) -> BridgeResult<RelationshipContextConfig> {
        let descriptor = self
            .relationships
            .iter()
            .find(|r| r.name == binding.relationship)
            .ok_or_else(|| BridgeError::unknown_relationship(&binding.relationship))?;

        let source = resolve_endpoint(
            descriptor,
            "source",
            &descriptor.source.entity_name,
            &binding.source_binding,
            entities,
        )?;
        let target = resolve_endpoint(
            descriptor,
            "target",
            &descriptor.target.entity_name,
            &binding.target_binding,
            entities,
        )?;

        for (endpoint, config, key) in [
            ("source", source, &binding.join.source_key),
            ("target", target, &binding.join.target_key),
        ] {
            if !config.keys.contains(key) {
                return Err(BridgeError::InvalidJoinKey {
                    relationship: descriptor.name.clone(),
                    endpoint: endpoint.to_string(),
                    key: key.clone(),
                });
            }
        }

        let mappings = resolve_mappings(&descriptor.name, &binding.mappings, |name| {
            descriptor.get_property(name)
        })?;

        Ok(RelationshipContextConfig {
            descriptor: descriptor.clone(),
            source: source.clone(),
            target: target.clone(),
            mappings,
            join: binding.join.clone(),
        })
    }
}

/// Find the entity binding config an endpoint reference names, and check
/// it binds the entity type the relationship descriptor expects.
fn resolve_endpoint<'c>(
    descriptor: &RelationshipDescriptor,
    endpoint: &str,
    expected_entity: &str,
    reference: &str,
    entities: &'c [EntityBindingConfig],
) -> BridgeResult<&'c EntityBindingConfig> {
    let config = entities
        .iter()
        .find(|c| c.descriptor.name == reference)
        .ok_or_else(|| BridgeError::MissingEndpointBinding {
            relationship: descriptor.name.clone(),
            endpoint: endpoint.to_string(),
            entity: reference.to_string(),
        })?;

    if config.descriptor.name != expected_entity {
        return Err(BridgeError::EndpointMismatch {
            relationship: descriptor.name.clone(),
            endpoint: endpoint.to_string(),
            expected: expected_entity.to_string(),
            actual: config.descriptor.name.clone(),
        });
    }

    Ok(config)
}

/// Resolve property mappings against a descriptor's property set.
/// Constants are parsed into typed values here; a literal that does not
/// parse as the declared data type is fatal for the owning binding.
fn resolve_mappings<'d>(
    owner: &str,
    mappings: &[PropertyMapping],
    get_property: impl Fn(&str) -> Option<&'d PropertyDescriptor>,
) -> BridgeResult<Vec<ResolvedMapping>> {
    let mut resolved = Vec::with_capacity(mappings.len());

    for mapping in mappings {
        let target = get_property(&mapping.property)
            .ok_or_else(|| BridgeError::validation(owner, &mapping.property))?;

        let kind = match &mapping.kind {
            MappingKind::Column(column) => ResolvedMappingKind::Column(column.clone()),
            MappingKind::Computed(expr) => ResolvedMappingKind::Computed(expr.clone()),
            MappingKind::Constant(literal) => {
                let value = target.data_type.parse_literal(literal).ok_or_else(|| {
                    BridgeError::TypeMismatch {
                        owner: owner.to_string(),
                        property: target.name.clone(),
                        expected: target.data_type.name().to_string(),
                        literal: literal.clone(),
                    }
                })?;
                ResolvedMappingKind::Constant(value)
            }
        };

        resolved.push(ResolvedMapping {
            target: target.clone(),
            kind,
            transform: mapping.transform.clone(),
        });
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ontobind_binding::parse_bindings;
    use ontobind_core::Value;
    use ontobind_parser::parse_schema;
    use ontobind_sdk::{convert, ConvertOptions};
    use pretty_assertions::assert_eq;

    fn converted(schema: &str) -> ConvertOutcome {
        convert(&parse_schema(schema).unwrap(), &ConvertOptions::default())
    }

    fn machines_schema() -> ConvertOutcome {
        converted(
            r#"
            entity Machine {
                serialNumber: string [required]
                capacity: int
            }
            entity Plant { name: string [required] }
            relationship locatedAt (source: Machine [many], target: Plant [one]) {
                since: datetime
            }
            "#,
        )
    }

    fn machines_bindings() -> BindingSet {
        parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
    mappings:
      - property: serialNumber
        column: SerialNo
      - property: capacity
        constant: 42
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
    mappings:
      - property: since
        computed: ingestion_time
    join:
      source_key: serialNumber
      target_key: name
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_bind_full_set() {
        // GIVEN
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);

        // WHEN
        let outcome = bridge.bind(&machines_bindings());

        // THEN
        assert!(outcome.failures.is_empty());
        assert_eq!(outcome.entities.len(), 2);
        let machine = &outcome.entities[0];
        assert_eq!(machine.descriptor.name, "Machine");
        assert_eq!(machine.source, "machines.csv");
        assert_eq!(machine.mappings[1].kind, ResolvedMappingKind::Constant(Value::Int(42)));
        assert_eq!(outcome.relationships.len(), 1);
        let rel = &outcome.relationships[0];
        assert_eq!(rel.descriptor.name, "locatedAt");
        assert_eq!(rel.source.descriptor.name, "Machine");
        assert_eq!(rel.target.descriptor.name, "Plant");
        assert_eq!(rel.join.source_key, "serialNumber");
        assert_eq!(
            rel.mappings[0].kind,
            ResolvedMappingKind::Computed("ingestion_time".to_string())
        );
    }

    #[test]
    fn test_unknown_entity_type_fails_that_binding_only() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Warehouse
    source: warehouses.csv
  - entity: Plant
    source: plants.csv
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert_eq!(outcome.entities.len(), 1);
        assert_eq!(outcome.entities[0].descriptor.name, "Plant");
        assert_eq!(
            outcome.failures,
            vec![BridgeError::unknown_entity("Warehouse")]
        );
    }

    #[test]
    fn test_unknown_key_property_is_fatal_for_binding() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [partNumber]
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert!(outcome.entities.is_empty());
        assert_eq!(
            outcome.failures,
            vec![BridgeError::validation("Machine", "partNumber")]
        );
    }

    #[test]
    fn test_unknown_mapped_property_is_fatal_for_binding() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    mappings:
      - property: weight
        column: Weight
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert_eq!(
            outcome.failures,
            vec![BridgeError::validation("Machine", "weight")]
        );
    }

    #[test]
    fn test_constant_type_mismatch() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    mappings:
      - property: capacity
        constant: lots
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert!(outcome.entities.is_empty());
        assert!(matches!(
            &outcome.failures[0],
            BridgeError::TypeMismatch { owner, property, .. }
                if owner == "Machine" && property == "capacity"
        ));
    }

    #[test]
    fn test_missing_endpoint_binding() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
relationships:
  - relationship: locatedAt
    source_binding: Machine
    target_binding: Plant
    join:
      source_key: serialNumber
      target_key: name
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert!(outcome.relationships.is_empty());
        assert!(matches!(
            &outcome.failures[0],
            BridgeError::MissingEndpointBinding { endpoint, entity, .. }
                if endpoint == "target" && entity == "Plant"
        ));
    }

    #[test]
    fn test_endpoint_bound_to_wrong_entity_type() {
        // locatedAt goes Machine -> Plant; binding it Plant -> Machine
        // must fail on the source endpoint.
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
  - entity: Plant
    source: plants.csv
    keys: [name]
relationships:
  - relationship: locatedAt
    source_binding: Plant
    target_binding: Machine
    join:
      source_key: name
      target_key: serialNumber
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert!(matches!(
            &outcome.failures[0],
            BridgeError::EndpointMismatch { endpoint, expected, actual, .. }
                if endpoint == "source" && expected == "Machine" && actual == "Plant"
        ));
    }

    #[test]
    fn test_join_key_must_be_binding_key() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = parse_bindings(
            r#"
entities:
  - entity: Machine
    source: machines.csv
    keys: [serialNumber]
  - entity: Plant
    source: plants.csv
    keys: [name]
relationships:
  - relationship: locatedAt
    source_binding: Machine
    target_binding: Plant
    join:
      source_key: capacity
      target_key: name
"#,
        )
        .unwrap();

        let outcome = bridge.bind(&bindings);

        assert!(matches!(
            &outcome.failures[0],
            BridgeError::InvalidJoinKey { endpoint, key, .. }
                if endpoint == "source" && key == "capacity"
        ));
    }

    #[test]
    fn test_bind_is_idempotent() {
        let schema = machines_schema();
        let bridge = Bridge::new(&schema);
        let bindings = machines_bindings();

        let first = bridge.bind(&bindings);
        let second = bridge.bind(&bindings);

        assert_eq!(first, second);
    }
}
