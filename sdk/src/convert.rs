//! Schema graph to SDK descriptor conversion.

use crate::descriptor::*;
use crate::error::ConvertError;
use ontobind_core::{Diagnostic, DuplicateKind};
use ontobind_parser::{ConversionResult, EntityTypeProperty, RelationshipEnd, RelationshipType};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Conversion options.
///
/// In strict mode a cardinality disagreement between duplicate
/// relationship declarations is fatal for that relationship; otherwise
/// the first declaration wins with a conflict diagnostic.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub strict: bool,
}

/// Output of one conversion: resolved descriptors plus everything that
/// went wrong along the way. Failures are per-relationship; they never
/// abort sibling items.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConvertOutcome {
    pub entities: Vec<EntityDescriptor>,
    pub relationships: Vec<RelationshipDescriptor>,
    pub diagnostics: Vec<Diagnostic>,
    pub failures: Vec<ConvertError>,
}

impl ConvertOutcome {
    /// Look up an entity descriptor by name.
    pub fn entity(&self, name: &str) -> Option<&EntityDescriptor> {
        self.entities.iter().find(|e| e.name == name)
    }

    /// Look up a relationship descriptor by name.
    pub fn relationship(&self, name: &str) -> Option<&RelationshipDescriptor> {
        self.relationships.iter().find(|r| r.name == name)
    }
}

/// Convert a parsed schema graph into SDK descriptors.
///
/// Two passes: entity descriptors first with ids allocated in declaration
/// order, then relationship resolution against the freshly built name
/// table. Forward references therefore resolve regardless of declaration
/// order.
pub fn convert(schema: &ConversionResult, options: &ConvertOptions) -> ConvertOutcome {
    let mut outcome = ConvertOutcome::default();

    let mut entity_ids: HashMap<&str, EntityTypeId> = HashMap::new();
    for (index, entity) in schema.entity_types.iter().enumerate() {
        let id = EntityTypeId(index as u32);
        entity_ids.insert(entity.name.as_str(), id);
        outcome.entities.push(EntityDescriptor {
            id,
            name: entity.name.clone(),
            properties: entity.properties.iter().map(to_property).collect(),
        });
    }

    // Merge key: same name AND same endpoints. Indexes into
    // outcome.relationships for already-emitted descriptors.
    let mut merged: HashMap<(String, EntityTypeId, EntityTypeId), usize> = HashMap::new();
    // Keys dropped in strict mode; later declarations of the same key are
    // ignored without piling up failures.
    let mut dropped: HashSet<(String, EntityTypeId, EntityTypeId)> = HashSet::new();
    let mut next_id = 0u32;

    for rel in &schema.relationship_types {
        let Some((source, target)) = resolve_ends(rel, &entity_ids, &mut outcome.failures) else {
            continue;
        };

        let key = (rel.name.clone(), source.entity, target.entity);
        if dropped.contains(&key) {
            continue;
        }

        if let Some(&index) = merged.get(&key) {
            if options.strict {
                if let Some(conflict) = cardinality_conflict(
                    &rel.name,
                    &outcome.relationships[index],
                    &source,
                    &target,
                ) {
                    outcome.failures.push(conflict);
                    outcome.relationships.remove(index);
                    merged.remove(&key);
                    for value in merged.values_mut() {
                        if *value > index {
                            *value -= 1;
                        }
                    }
                    dropped.insert(key);
                    continue;
                }
            } else if let Some(conflict) = cardinality_conflict(
                &rel.name,
                &outcome.relationships[index],
                &source,
                &target,
            ) {
                outcome.diagnostics.push(Diagnostic::conflict(
                    &rel.name,
                    format!("{}; keeping first declaration's cardinality", conflict),
                ));
            }
            merge_properties(&mut outcome.relationships[index].properties, &rel.properties);
            continue;
        }

        // Same name, different endpoints: mirror the entity duplicate
        // policy. First declaration wins.
        if outcome.relationships.iter().any(|r| r.name == rel.name) {
            outcome.diagnostics.push(Diagnostic::duplicate(
                DuplicateKind::RelationshipType,
                &rel.name,
                "redeclared with different endpoints; keeping first declaration",
            ));
            continue;
        }

        let id = RelationshipTypeId(next_id);
        next_id += 1;
        merged.insert(key, outcome.relationships.len());
        outcome.relationships.push(RelationshipDescriptor {
            id,
            name: rel.name.clone(),
            source,
            target,
            properties: rel.properties.iter().map(to_property).collect(),
        });
    }

    debug!(
        entities = outcome.entities.len(),
        relationships = outcome.relationships.len(),
        diagnostics = outcome.diagnostics.len(),
        failures = outcome.failures.len(),
        "converted schema graph"
    );
    outcome
}

fn to_property(property: &EntityTypeProperty) -> PropertyDescriptor {
    PropertyDescriptor {
        name: property.name.clone(),
        data_type: property.data_type,
        required: property.required,
    }
}

/// Resolve both ends of one relationship. Each unknown entity name gets
/// its own failure; the relationship is skipped if either is missing.
fn resolve_ends(
    rel: &RelationshipType,
    entity_ids: &HashMap<&str, EntityTypeId>,
    failures: &mut Vec<ConvertError>,
) -> Option<(ResolvedEnd, ResolvedEnd)> {
    let source = resolve_end(&rel.name, &rel.source, entity_ids, failures);
    let target = resolve_end(&rel.name, &rel.target, entity_ids, failures);
    Some((source?, target?))
}

fn resolve_end(
    relationship: &str,
    end: &RelationshipEnd,
    entity_ids: &HashMap<&str, EntityTypeId>,
    failures: &mut Vec<ConvertError>,
) -> Option<ResolvedEnd> {
    match entity_ids.get(end.entity.as_str()) {
        Some(&id) => Some(ResolvedEnd {
            entity: id,
            entity_name: end.entity.clone(),
            cardinality: end.cardinality,
        }),
        None => {
            failures.push(ConvertError::unresolved(relationship, &end.entity));
            None
        }
    }
}

fn cardinality_conflict(
    name: &str,
    existing: &RelationshipDescriptor,
    source: &ResolvedEnd,
    target: &ResolvedEnd,
) -> Option<ConvertError> {
    for (end, first, second) in [
        ("source", existing.source.cardinality, source.cardinality),
        ("target", existing.target.cardinality, target.cardinality),
    ] {
        if first != second {
            return Some(ConvertError::CardinalityConflict {
                relationship: name.to_string(),
                end: end.to_string(),
                first: first.name().to_string(),
                second: second.name().to_string(),
            });
        }
    }
    None
}

/// Merge later declaration's properties into an existing descriptor.
/// On name collision the later declaration overrides.
fn merge_properties(existing: &mut Vec<PropertyDescriptor>, later: &[EntityTypeProperty]) {
    for property in later {
        let descriptor = to_property(property);
        match existing.iter_mut().find(|p| p.name == descriptor.name) {
            Some(slot) => *slot = descriptor,
            None => existing.push(descriptor),
        }
    }
}
