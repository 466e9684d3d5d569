//! ontobind SDK Converter
//!
//! Projects the parsed schema graph into flat SDK descriptors: entity
//! references resolved to allocated ids, duplicate relationship
//! declarations merged, cardinality conflicts surfaced. Descriptors are
//! plain data; downstream stages and SDK clients consume them read-only.

mod convert;
mod descriptor;
mod error;

pub use convert::{convert, ConvertOptions, ConvertOutcome};
pub use descriptor::*;
pub use error::{ConvertError, ConvertResult};
