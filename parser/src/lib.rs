//! ontobind Schema Parser
//!
//! Parses ontology schema text into an internal graph of entity types and
//! relationship types plus collected diagnostics. Parsing never aborts on
//! the first malformed declaration: bad declarations are reported as
//! diagnostics and skipped, and parsing continues with the next one.
//!
//! Forward references are allowed here; a relationship may name an entity
//! type declared later in the document. Resolution happens in the sdk
//! converter, not in this crate.

mod ast;
mod error;
mod lexer;
mod parser;

pub use ast::*;
pub use error::{ParseError, ParseResult};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{parse_schema, Parser};
