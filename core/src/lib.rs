//! ontobind Core Types
//!
//! This crate provides the foundational types shared across the ontobind
//! pipeline:
//! - Literal values (the Value enum used for constant bindings)
//! - Property data types (DataType with literal parsing)
//! - Relationship end cardinality
//! - Non-fatal diagnostics accumulated by every pipeline stage

mod cardinality;
mod data_type;
mod diagnostic;
mod value;

pub use cardinality::*;
pub use data_type::*;
pub use diagnostic::*;
pub use value::*;
