use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::Span;

lazy_static! {
    /// Escape letters accepted after `\` and the characters they stand for.
    pub static ref ESCAPE_LOOKUP: HashMap<char, char> = {
        let mut map = HashMap::new();
        map.insert('b', '\u{8}');
        map.insert('n', '\n');
        map.insert('r', '\r');
        map.insert('t', '\t');
        map.insert('\'', '\'');
        map.insert('"', '"');
        map.insert('\\', '\\');
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Identifier,
    Integer,
    Decimal,
    Character,
    String,
    Operator,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn offset(&self) -> u32 {
        self.span.start.0
    }

    pub fn is_literal(&self, literal: &str) -> bool {
        self.value == literal
    }
}

// Two tokens are equal when kind, text and offset agree; the file name is ignored.
impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.value == other.value && self.offset() == other.offset()
    }
}

impl Eq for Token {}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({}) at {}", self.kind, self.value, self.offset())
    }
}
