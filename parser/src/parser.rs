//! Recursive-descent parser for ontology schema text.
//!
//! Declarations are parsed one at a time. A malformed declaration yields a
//! parse diagnostic and the parser skips ahead to the next top-level
//! `entity` / `relationship` keyword, so one bad declaration never hides
//! the rest of the document.

use crate::ast::*;
use crate::error::{ParseError, ParseResult};
use crate::lexer::{Lexer, Token, TokenKind};
use ontobind_core::{Cardinality, DataType, Diagnostic, DuplicateKind};

// ==================== PARSER STATE ====================

/// Parser state.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// Create a new parser from source text.
    pub fn new(input: &str) -> ParseResult<Self> {
        let tokens = Lexer::new(input).tokenize()?;
        Ok(Self { tokens, pos: 0 })
    }
}

// ==================== TOKEN HELPERS ====================

impl Parser {
    fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("tokens should always end with EOF")
        })
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn check_ident(&self, name: &str) -> bool {
        matches!(&self.peek().kind, TokenKind::Ident(s) if s.eq_ignore_ascii_case(name))
    }

    fn expect(&mut self, kind: &TokenKind) -> ParseResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            let token = self.peek();
            Err(ParseError::unexpected_token(
                token.span,
                kind.name(),
                token.kind.name(),
            ))
        }
    }

    fn expect_ident(&mut self) -> ParseResult<String> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.advance();
                Ok(name)
            }
            _ => {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "identifier",
                    token.kind.name(),
                ))
            }
        }
    }

    /// Expect an identifier or a keyword that can be used as a name.
    /// This allows `entity` or `relationship` to appear as property names.
    fn expect_name(&mut self) -> ParseResult<String> {
        let token = self.peek().clone();
        let name = match &token.kind {
            TokenKind::Ident(name) => name.clone(),
            kind if kind.is_keyword() => kind.name().to_string(),
            _ => {
                return Err(ParseError::unexpected_token(
                    token.span,
                    "name",
                    token.kind.name(),
                ));
            }
        };
        self.advance();
        Ok(name)
    }

    fn span_from(&self, start: Span) -> Span {
        let end_token = if self.pos > 0 {
            &self.tokens[self.pos - 1]
        } else {
            self.peek()
        };
        Span::new(start.start, end_token.span.end, start.line, start.column)
    }
}

// ==================== DOCUMENT ====================

enum Decl {
    Entity(EntityType),
    Relationship(RelationshipType),
}

impl Parser {
    /// Parse a whole schema document into the internal graph.
    pub fn parse_document(&mut self) -> ParseResult<ConversionResult> {
        let mut result = ConversionResult::default();

        while !self.check(&TokenKind::Eof) {
            let decl_span = self.peek().span;
            let outcome = if self.check(&TokenKind::Entity) {
                self.parse_entity_decl(&mut result.diagnostics)
                    .map(Decl::Entity)
            } else if self.check(&TokenKind::Relationship) {
                self.parse_relationship_decl(&mut result.diagnostics)
                    .map(Decl::Relationship)
            } else {
                let token = self.peek();
                Err(ParseError::unexpected_token(
                    token.span,
                    "entity or relationship",
                    token.kind.name(),
                ))
            };

            match outcome {
                Ok(Decl::Entity(entity)) => {
                    if result.entity_type(&entity.name).is_some() {
                        result.diagnostics.push(Diagnostic::duplicate(
                            DuplicateKind::EntityType,
                            &entity.name,
                            format!(
                                "redeclared at line {}; keeping first declaration",
                                entity.span.line
                            ),
                        ));
                    } else {
                        result.entity_types.push(entity);
                    }
                }
                // Relationship duplicates are merged by the sdk converter,
                // which knows endpoint identity; keep every declaration here.
                Ok(Decl::Relationship(rel)) => result.relationship_types.push(rel),
                Err(err) => {
                    result.diagnostics.push(Diagnostic::parse(
                        format!("declaration at line {}", decl_span.line),
                        err.to_string(),
                    ));
                    self.recover();
                }
            }
        }

        Ok(result)
    }

    /// Skip tokens up to the next top-level declaration keyword.
    fn recover(&mut self) {
        while !self.check(&TokenKind::Eof) {
            if self.check(&TokenKind::Entity) || self.check(&TokenKind::Relationship) {
                break;
            }
            self.advance();
        }
    }

    // ==================== ENTITY ====================

    /// Parse an entity type declaration.
    /// Syntax: entity Name { prop: type [required], ... }
    fn parse_entity_decl(&mut self, diagnostics: &mut Vec<Diagnostic>) -> ParseResult<EntityType> {
        let start = self.expect(&TokenKind::Entity)?.span;
        let name = self.expect_ident()?;

        let properties = if self.check(&TokenKind::LBrace) {
            self.parse_property_block(&name, diagnostics)?
        } else {
            Vec::new()
        };

        let span = self.span_from(start);
        Ok(EntityType {
            name,
            properties,
            span,
        })
    }

    /// Parse a property block: { name: type [required], ... }
    /// Commas between properties are optional. Duplicate property names
    /// keep the first declaration; unknown data types skip the property.
    fn parse_property_block(
        &mut self,
        owner: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ParseResult<Vec<EntityTypeProperty>> {
        self.expect(&TokenKind::LBrace)?;

        let mut properties: Vec<EntityTypeProperty> = Vec::new();
        while !self.check(&TokenKind::RBrace) && !self.check(&TokenKind::Eof) {
            if let Some(property) = self.parse_property(owner, diagnostics)? {
                if properties.iter().any(|p| p.name == property.name) {
                    diagnostics.push(Diagnostic::duplicate(
                        DuplicateKind::Property,
                        format!("{}.{}", owner, property.name),
                        "keeping first declaration",
                    ));
                } else {
                    properties.push(property);
                }
            }
            if self.check(&TokenKind::Comma) {
                self.advance();
            }
        }

        self.expect(&TokenKind::RBrace)?;
        Ok(properties)
    }

    /// Parse a single property: name: type [required]
    /// Returns None (with a diagnostic) when the data type is unknown.
    fn parse_property(
        &mut self,
        owner: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ParseResult<Option<EntityTypeProperty>> {
        let start = self.peek().span;
        let name = self.expect_name()?;
        self.expect(&TokenKind::Colon)?;
        let type_name = self.expect_ident()?;

        let required = if self.check(&TokenKind::LBracket) {
            self.parse_property_modifiers()?
        } else {
            false
        };

        let span = self.span_from(start);
        match DataType::from_name(&type_name) {
            Some(data_type) => Ok(Some(EntityTypeProperty {
                name,
                data_type,
                required,
                span,
            })),
            None => {
                diagnostics.push(Diagnostic::parse(
                    format!("property '{}.{}'", owner, name),
                    format!("unknown data type '{}'", type_name),
                ));
                Ok(None)
            }
        }
    }

    /// Parse property modifiers: [required]
    fn parse_property_modifiers(&mut self) -> ParseResult<bool> {
        self.expect(&TokenKind::LBracket)?;

        let mut required = false;
        while !self.check(&TokenKind::RBracket) && !self.check(&TokenKind::Eof) {
            if self.check_ident("required") {
                self.advance();
                required = true;
            } else if self.check(&TokenKind::Comma) {
                self.advance();
            } else {
                let token = self.peek().clone();
                return Err(ParseError::unexpected_token(
                    token.span,
                    "required",
                    token.kind.name(),
                ));
            }
        }

        self.expect(&TokenKind::RBracket)?;
        Ok(required)
    }

    // ==================== RELATIONSHIP ====================

    /// Parse a relationship type declaration.
    /// Syntax: relationship Name (source: Entity [card], target: Entity [card]) { props }
    fn parse_relationship_decl(
        &mut self,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> ParseResult<RelationshipType> {
        let start = self.expect(&TokenKind::Relationship)?.span;
        let name = self.expect_ident()?;

        self.expect(&TokenKind::LParen)?;
        let source = self.parse_relationship_end("source")?;
        self.expect(&TokenKind::Comma)?;
        let target = self.parse_relationship_end("target")?;
        self.expect(&TokenKind::RParen)?;

        let properties = if self.check(&TokenKind::LBrace) {
            self.parse_property_block(&name, diagnostics)?
        } else {
            Vec::new()
        };

        let span = self.span_from(start);
        Ok(RelationshipType {
            name,
            source,
            target,
            properties,
            span,
        })
    }

    /// Parse one relationship end: role: Entity [one|many]
    /// The role name (`source` / `target`) is part of the grammar.
    fn parse_relationship_end(&mut self, role: &str) -> ParseResult<RelationshipEnd> {
        let token = self.peek().clone();
        if !self.check_ident(role) {
            return Err(ParseError::unexpected_token(
                token.span,
                role,
                token.kind.name(),
            ));
        }
        self.advance();
        self.expect(&TokenKind::Colon)?;
        let entity = self.expect_ident()?;

        let cardinality = if self.check(&TokenKind::LBracket) {
            self.parse_cardinality()?
        } else {
            Cardinality::default()
        };

        Ok(RelationshipEnd {
            entity,
            cardinality,
        })
    }

    /// Parse a cardinality modifier: [one] or [many]
    fn parse_cardinality(&mut self) -> ParseResult<Cardinality> {
        self.expect(&TokenKind::LBracket)?;
        let span = self.peek().span;
        let word = self.expect_ident()?;
        let cardinality = Cardinality::from_name(&word).ok_or_else(|| {
            ParseError::new(
                format!("expected cardinality 'one' or 'many', found '{}'", word),
                span,
            )
        })?;
        self.expect(&TokenKind::RBracket)?;
        Ok(cardinality)
    }
}

// ==================== PUBLIC API ====================

/// Parse schema text into the internal graph.
///
/// The only hard failure is a text that cannot be tokenized; everything at
/// declaration granularity is reported through the result's diagnostics.
pub fn parse_schema(input: &str) -> ParseResult<ConversionResult> {
    Parser::new(input)?.parse_document()
}

// ==================== TESTS ====================
