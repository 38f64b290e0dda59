//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct: a cursor over the token
//! stream with `peek`/`match`/`expect` helpers, plus the lookup tables
//! registered by `lookups.rs`. Keywords are ordinary identifier tokens, so
//! the cursor matches on token text as well as on token kind.
//!
//! It maintains lookup tables for:
//! - Statement handlers, keyed by leading keyword
//! - Infix operator handlers and their binding powers

use std::{collections::HashMap, rc::Rc};

use crate::{
    ast::ast::Source,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, StmtHandler,
        StmtLookup,
    },
    stmt::{parse_function, parse_global},
};

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// The list of tokens to parse
    tokens: Vec<Token>,
    /// Current position in the token stream
    pos: usize,
    /// The name of the source file being parsed
    file: Rc<String>,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for infix expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for infix binding powers (precedence)
    binding_power_lookup: BPLookup,
}

impl Parser {
    /// Creates a new Parser instance with empty lookup tables.
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
            stmt_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Returns the token `n` places after the current one.
    pub fn peek_token(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.pos + n)
    }

    pub fn has_tokens(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Whether the current token's text is exactly `literal`.
    pub fn peek_literal(&self, literal: &str) -> bool {
        self.current_token()
            .is_some_and(|token| token.kind != TokenKind::String && token.is_literal(literal))
    }

    pub fn peek_any_literal(&self, literals: &[&str]) -> bool {
        literals.iter().any(|literal| self.peek_literal(literal))
    }

    pub fn peek_kind(&self, kind: TokenKind) -> bool {
        self.current_token().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the current token if its text is `literal`.
    pub fn match_literal(&mut self, literal: &str) -> bool {
        if self.peek_literal(literal) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Result<Token, Error> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                Ok(token.clone())
            }
            None => Err(self.unexpected("a token")),
        }
    }

    /// Expects a token with text `literal`.
    pub fn expect_literal(&mut self, literal: &str) -> Result<Token, Error> {
        if self.peek_literal(literal) {
            self.advance()
        } else {
            Err(self.unexpected(&format!("expected `{}`", literal)))
        }
    }

    /// Expects a token of the specified kind.
    pub fn expect_kind(&mut self, kind: TokenKind, message: &str) -> Result<Token, Error> {
        if self.peek_kind(kind) {
            self.advance()
        } else {
            Err(self.unexpected(message))
        }
    }

    /// Builds the error for the current token, or for end of input when tokens are exhausted.
    pub fn unexpected(&self, message: &str) -> Error {
        match self.current_token() {
            Some(token) => Error::new(
                ErrorImpl::UnexpectedTokenDetailed {
                    token: token.value.clone(),
                    message: message.to_string(),
                },
                token.span.start.clone(),
            ),
            None => Error::new(
                ErrorImpl::UnexpectedEndOfInput {
                    expected: message.to_string(),
                },
                self.end_position(),
            ),
        }
    }

    /// Returns the position of the current token, or end of input.
    pub fn get_position(&self) -> Position {
        match self.current_token() {
            Some(token) => token.span.start.clone(),
            None => self.end_position(),
        }
    }

    /// Position just past the last token.
    pub fn end_position(&self) -> Position {
        match self.tokens.last() {
            Some(token) => token.span.end.clone(),
            None => Position(0, Rc::clone(&self.file)),
        }
    }

    /// Span from `start` to the end of the most recently consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        let end = match self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)) {
            Some(token) => token.span.end.clone(),
            None => start.clone(),
        };
        Span::new(start, end)
    }

    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Registers an infix handler for an operator symbol.
    pub fn led(&mut self, symbol: &'static str, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(symbol, binding_power);
        self.led_lookup.insert(symbol, led_fn);
    }

    /// Registers a statement handler for a leading keyword.
    pub fn stmt(&mut self, keyword: &'static str, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(keyword, stmt_fn);
    }

    /// The infix operator at the cursor, with the number of tokens it spans.
    ///
    /// `<` or `>` directly followed by `=` reads as `<=` or `>=`.
    pub fn current_infix(&self) -> Option<(&'static str, usize)> {
        let token = self.current_token()?;
        if token.kind != TokenKind::Operator {
            return None;
        }

        if token.value == "<" || token.value == ">" {
            if let Some(next) = self.peek_token(1) {
                if next.kind == TokenKind::Operator
                    && next.value == "="
                    && next.offset() == token.span.end.0
                {
                    let symbol = if token.value == "<" { "<=" } else { ">=" };
                    return Some((symbol, 2));
                }
            }
        }

        self.binding_power_lookup
            .get_key_value(token.value.as_str())
            .map(|(symbol, _)| (*symbol, 1))
    }

    /// Skips `count` tokens already inspected by the caller.
    pub fn skip(&mut self, count: usize) {
        self.pos = (self.pos + count).min(self.tokens.len());
    }
}

/// Parses a type annotation, which is a single identifier.
pub fn parse_type_name(parser: &mut Parser) -> Result<String, Error> {
    Ok(parser
        .expect_kind(TokenKind::Identifier, "expected type name")?
        .value)
}

/// Parses a stream of tokens into a `Source`.
///
/// Globals (`LIST`, `VAR`, `VAL`) come first, then functions (`FUN`).
/// The first grammar violation aborts the whole parse.
pub fn parse(tokens: Vec<Token>, file: Rc<String>) -> Result<Source, Error> {
    let mut parser = Parser::new(tokens, file);
    create_token_lookups(&mut parser);

    let mut globals = vec![];
    while parser.peek_any_literal(&["LIST", "VAR", "VAL"]) {
        globals.push(parse_global(&mut parser)?);
    }

    let mut functions = vec![];
    while parser.peek_literal("FUN") {
        functions.push(parse_function(&mut parser)?);
    }

    if parser.has_tokens() {
        return Err(parser.unexpected("expected global or function definition"));
    }

    Ok(Source { globals, functions })
}
