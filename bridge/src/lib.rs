//! ontobind Binding Bridge
//!
//! Resolves parsed binding sets against converted SDK descriptors into
//! final configuration an SDK client can apply, and exposes the
//! `assemble` convenience that runs the whole pipeline over two input
//! texts: schema parse, descriptor conversion, binding parse, bridge.

mod bridge;
mod builder;
mod config;
mod error;

pub use bridge::{Bridge, BridgeOutcome};
pub use builder::{apply, BuilderCall, BuilderError, BuilderResult, OntologyBuilder, RecordingBuilder};
pub use config::*;
pub use error::{BridgeError, BridgeResult};

use ontobind_binding::{parse_bindings, BindingError};
use ontobind_core::Diagnostic;
use ontobind_parser::{parse_schema, ParseError};
use ontobind_sdk::{convert, ConvertOptions, ConvertOutcome};
use thiserror::Error;

/// Whole-input failures of `assemble`. Anything at item granularity is
/// reported inside the result instead.
#[derive(Debug, Error)]
pub enum AssembleError {
    #[error("schema: {0}")]
    Schema(#[from] ParseError),

    #[error("bindings: {0}")]
    Binding(#[from] BindingError),
}

/// Output of one full pipeline run. `diagnostics` aggregates the
/// non-fatal findings of every stage in pipeline order; per-item fatal
/// errors stay in the stage outcomes' failure lists.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembleResult {
    pub schema: ConvertOutcome,
    pub bindings: BridgeOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the full pipeline over schema and binding text.
pub fn assemble(
    schema_text: &str,
    binding_text: &str,
    options: &ConvertOptions,
) -> Result<AssembleResult, AssembleError> {
    let parsed = parse_schema(schema_text)?;
    let schema = convert(&parsed, options);
    let binding_set = parse_bindings(binding_text)?;
    let bindings = Bridge::new(&schema).bind(&binding_set);

    let mut diagnostics = parsed.diagnostics;
    diagnostics.extend(schema.diagnostics.iter().cloned());
    diagnostics.extend(binding_set.diagnostics);

    Ok(AssembleResult {
        schema,
        bindings,
        diagnostics,
    })
}
