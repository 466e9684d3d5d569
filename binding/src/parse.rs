//! YAML document parsing and shape validation.

use crate::document::{scalar_to_string, RawDocument, RawMapping};
use crate::error::BindingResult;
use crate::types::*;
use ontobind_core::Diagnostic;
use tracing::debug;

/// Parse a YAML binding document into a validated binding set.
///
/// A document that fails to deserialize at all is the only `Err`. Shape
/// problems inside the document become diagnostics: the offending mapping
/// or binding is dropped and the rest of the document survives.
pub fn parse_bindings(input: &str) -> BindingResult<BindingSet> {
    let raw: RawDocument = serde_yaml::from_str(input)?;
    let mut set = BindingSet::default();

    for (index, entity) in raw.entities.into_iter().enumerate() {
        let context = match &entity.entity {
            Some(name) if !name.is_empty() => format!("entity binding '{}'", name),
            _ => format!("entity binding #{}", index),
        };

        let (Some(name), Some(source)) = (non_empty(entity.entity), non_empty(entity.source))
        else {
            set.diagnostics.push(Diagnostic::parse(
                context,
                "missing required field 'entity' or 'source'; binding skipped",
            ));
            continue;
        };

        let mappings = parse_mappings(entity.mappings, &context, &mut set.diagnostics);
        set.entities.push(EntityBinding {
            entity: name,
            source,
            keys: entity.keys,
            mappings,
        });
    }

    for (index, rel) in raw.relationships.into_iter().enumerate() {
        let context = match &rel.relationship {
            Some(name) if !name.is_empty() => format!("relationship binding '{}'", name),
            _ => format!("relationship binding #{}", index),
        };

        let (Some(name), Some(source_binding), Some(target_binding)) = (
            non_empty(rel.relationship),
            non_empty(rel.source_binding),
            non_empty(rel.target_binding),
        ) else {
            set.diagnostics.push(Diagnostic::parse(
                context,
                "missing required field 'relationship', 'source_binding' or 'target_binding'; binding skipped",
            ));
            continue;
        };

        let join = match rel.join {
            Some(join) => match (non_empty(join.source_key), non_empty(join.target_key)) {
                (Some(source_key), Some(target_key)) => JoinCondition {
                    source_key,
                    target_key,
                },
                _ => {
                    set.diagnostics.push(Diagnostic::parse(
                        context,
                        "join must name both 'source_key' and 'target_key'; binding skipped",
                    ));
                    continue;
                }
            },
            None => {
                set.diagnostics.push(Diagnostic::parse(
                    context,
                    "missing required field 'join'; binding skipped",
                ));
                continue;
            }
        };

        let mappings = parse_mappings(rel.mappings, &context, &mut set.diagnostics);
        set.relationships.push(RelationshipBinding {
            relationship: name,
            source_binding,
            target_binding,
            mappings,
            join,
        });
    }

    debug!(
        entities = set.entities.len(),
        relationships = set.relationships.len(),
        diagnostics = set.diagnostics.len(),
        "parsed binding document"
    );
    Ok(set)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Validate raw mappings. Exactly one of column/constant/computed must be
/// present; a violating mapping is skipped with a diagnostic naming its
/// owner and index.
fn parse_mappings(
    raw: Vec<RawMapping>,
    owner: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Vec<PropertyMapping> {
    let mut mappings = Vec::new();

    for (index, mapping) in raw.into_iter().enumerate() {
        let Some(property) = mapping.property.filter(|p| !p.is_empty()) else {
            diagnostics.push(Diagnostic::parse(
                format!("{}, mapping #{}", owner, index),
                "missing required field 'property'; mapping skipped",
            ));
            continue;
        };

        let sources =
            [mapping.column.is_some(), mapping.constant.is_some(), mapping.computed.is_some()]
                .iter()
                .filter(|present| **present)
                .count();
        if sources != 1 {
            diagnostics.push(Diagnostic::parse(
                format!("{}, mapping #{} ('{}')", owner, index, property),
                "exactly one of 'column', 'constant' or 'computed' must be set; mapping skipped",
            ));
            continue;
        }

        let kind = if let Some(column) = mapping.column {
            MappingKind::Column(column)
        } else if let Some(constant) = mapping.constant {
            match scalar_to_string(&constant) {
                Some(literal) => MappingKind::Constant(literal),
                None => {
                    diagnostics.push(Diagnostic::parse(
                        format!("{}, mapping #{} ('{}')", owner, index, property),
                        "'constant' must be a scalar value; mapping skipped",
                    ));
                    continue;
                }
            }
        } else if let Some(computed) = mapping.computed {
            MappingKind::Computed(computed)
        } else {
            unreachable!("exactly one source checked above")
        };

        mappings.push(PropertyMapping {
            property,
            kind,
            transform: mapping.transform,
        });
    }

    mappings
}
