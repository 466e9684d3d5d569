//! ontobind Binding Parser
//!
//! Parses YAML binding documents into validated binding sets. A binding
//! document maps entity types to tabular data sources and relationship
//! types to pairs of entity bindings with a join condition.
//!
//! This crate is schema-independent: it checks document shape only.
//! Checking names against actual schema descriptors is the bridge's job.

mod document;
mod error;
mod parse;
mod types;

pub use error::{BindingError, BindingResult};
pub use parse::parse_bindings;
pub use types::*;
