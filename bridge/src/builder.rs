//! The narrow interface an SDK client implements to receive the
//! resolved ontology, plus an in-memory recorder used as a test double.

use crate::config::{EntityBindingConfig, RelationshipContextConfig};
use crate::BridgeOutcome;
use ontobind_sdk::{ConvertOutcome, EntityDescriptor, RelationshipDescriptor};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum BuilderError {
    #[error("builder rejected {kind} '{name}': {reason}")]
    Rejected {
        kind: String,
        name: String,
        reason: String,
    },

    #[error("'{name}' was submitted before its prerequisites")]
    OutOfOrder { name: String },
}

pub type BuilderResult<T> = Result<T, BuilderError>;

/// Receives the resolved ontology, one item at a time. Implementations
/// may assume the `apply` ordering: all type descriptors before any
/// binding config, entities before relationships within each group.
pub trait OntologyBuilder {
    fn create_entity_type(&mut self, descriptor: &EntityDescriptor) -> BuilderResult<()>;
    fn create_relationship_type(
        &mut self,
        descriptor: &RelationshipDescriptor,
    ) -> BuilderResult<()>;
    fn bind_entity_properties(&mut self, config: &EntityBindingConfig) -> BuilderResult<()>;
    fn bind_relationship_context(
        &mut self,
        config: &RelationshipContextConfig,
    ) -> BuilderResult<()>;
}

/// Feed a converted schema and its resolved bindings into a builder in
/// dependency order.
pub fn apply<B: OntologyBuilder>(
    schema: &ConvertOutcome,
    bindings: &BridgeOutcome,
    builder: &mut B,
) -> BuilderResult<()> {
    for descriptor in &schema.entities {
        builder.create_entity_type(descriptor)?;
    }
    for descriptor in &schema.relationships {
        builder.create_relationship_type(descriptor)?;
    }
    for config in &bindings.entities {
        builder.bind_entity_properties(config)?;
    }
    for config in &bindings.relationships {
        builder.bind_relationship_context(config)?;
    }
    Ok(())
}

/// One recorded builder call, by item name.
#[derive(Debug, Clone, PartialEq)]
pub enum BuilderCall {
    EntityType(String),
    RelationshipType(String),
    EntityBinding(String),
    RelationshipContext(String),
}

/// In-memory `OntologyBuilder` that records call order and rejects calls
/// whose prerequisites have not arrived yet. Used by integration tests
/// in place of a real SDK client.
#[derive(Debug, Default)]
pub struct RecordingBuilder {
    pub calls: Vec<BuilderCall>,
}

impl RecordingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn has(&self, call: &BuilderCall) -> bool {
        self.calls.contains(call)
    }
}

impl OntologyBuilder for RecordingBuilder {
    fn create_entity_type(&mut self, descriptor: &EntityDescriptor) -> BuilderResult<()> {
        self.calls
            .push(BuilderCall::EntityType(descriptor.name.clone()));
        Ok(())
    }

    fn create_relationship_type(
        &mut self,
        descriptor: &RelationshipDescriptor,
    ) -> BuilderResult<()> {
        for end in [&descriptor.source, &descriptor.target] {
            if !self.has(&BuilderCall::EntityType(end.entity_name.clone())) {
                return Err(BuilderError::OutOfOrder {
                    name: descriptor.name.clone(),
                });
            }
        }
        self.calls
            .push(BuilderCall::RelationshipType(descriptor.name.clone()));
        Ok(())
    }

    fn bind_entity_properties(&mut self, config: &EntityBindingConfig) -> BuilderResult<()> {
        if !self.has(&BuilderCall::EntityType(config.descriptor.name.clone())) {
            return Err(BuilderError::OutOfOrder {
                name: config.descriptor.name.clone(),
            });
        }
        self.calls
            .push(BuilderCall::EntityBinding(config.descriptor.name.clone()));
        Ok(())
    }

    fn bind_relationship_context(
        &mut self,
        config: &RelationshipContextConfig,
    ) -> BuilderResult<()> {
        let name = config.descriptor.name.clone();
        if !self.has(&BuilderCall::RelationshipType(name.clone()))
            || !self.has(&BuilderCall::EntityBinding(config.source.descriptor.name.clone()))
            || !self.has(&BuilderCall::EntityBinding(config.target.descriptor.name.clone()))
        {
            return Err(BuilderError::OutOfOrder { name });
        }
        self.calls.push(BuilderCall::RelationshipContext(name));
        Ok(())
    }
}
