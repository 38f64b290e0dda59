//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a flat stream of tokens for parsing. It handles:
//!
//! - The backspace pre-pass over the raw input
//! - Tokenization using an ordered table of anchored regex patterns
//! - Identifiers, integer/decimal/character/string literals and operators
//! - Token position tracking for error reporting

pub mod lexer;
pub mod tokens;
