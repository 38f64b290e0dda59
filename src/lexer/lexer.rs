use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{errors::errors::{Error, ErrorImpl}, Position, Span, MK_TOKEN};

use super::tokens::{Token, TokenKind, ESCAPE_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex) -> Result<(), Error>;

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Tried in order at the current position; every pattern is anchored with `^`.
    // The operator pattern accepts any character, so some pattern always matches.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new(r"^\s+").unwrap(), handler: skip_handler },
        RegexPattern {
            regex: Regex::new(r"^[A-Za-z@][A-Za-z0-9_@-]*").unwrap(),
            handler: identifier_handler,
        },
        RegexPattern { regex: Regex::new(r"^-?[0-9]").unwrap(), handler: number_handler },
        RegexPattern { regex: Regex::new("^\"").unwrap(), handler: string_handler },
        RegexPattern { regex: Regex::new("^'").unwrap(), handler: character_handler },
        RegexPattern {
            regex: Regex::new(r"^(?s)(==|!=|&&|\|\||.)").unwrap(),
            handler: operator_handler,
        },
    ];

    // A lone `0` never absorbs further digits; `.` only continues a number when a digit follows.
    static ref NUMBER: Regex = Regex::new(r"^-?(0|[1-9][0-9]*)(\.[0-9]+)?").unwrap();
}

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    /// Offset in the original text of every byte of `source`, plus its end.
    origins: Vec<usize>,
    pos: usize,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: &str, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        let (source, origins) = apply_backspaces(source);

        Lexer {
            pos: 0,
            tokens: vec![],
            source,
            origins,
            file: file_name,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, kind: TokenKind, length: usize) {
        let value = self.source[self.pos..self.pos + length].to_string();
        let token = MK_TOKEN!(
            kind,
            value,
            self.origin(self.pos),
            self.origin(self.pos + length),
            self.file
        );
        self.tokens.push(token);
        self.advance_n(length);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Maps an offset in the backspace-free text back to the text that was read.
    pub fn origin(&self, offset: usize) -> usize {
        self.origins
            .get(offset)
            .or_else(|| self.origins.last())
            .copied()
            .unwrap_or(offset)
    }

    fn error(&self, error: ErrorImpl, offset: usize) -> Error {
        Error::new(error, Position(self.origin(offset) as u32, Rc::clone(&self.file)))
    }
}

/// Removes each backspace (0x08) along with the character emitted before it.
///
/// Also returns, for every byte kept, its offset in `source`, followed by
/// `source.len()`, so tokens and errors point into the text as written.
fn apply_backspaces(source: &str) -> (String, Vec<usize>) {
    let mut result = String::with_capacity(source.len());
    let mut origins = Vec::with_capacity(source.len() + 1);

    for (offset, c) in source.char_indices() {
        if c == '\u{8}' {
            if let Some(removed) = result.pop() {
                origins.truncate(origins.len() - removed.len_utf8());
            }
        } else {
            result.push(c);
            origins.extend(std::iter::repeat(offset).take(c.len_utf8()));
        }
    }
    origins.push(source.len());

    (result, origins)
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let matched = regex.find(lexer.remainder()).map_or(1, |m| m.end());
    lexer.advance_n(matched);
    Ok(())
}

fn identifier_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let length = regex.find(lexer.remainder()).map_or(1, |m| m.end());
    lexer.push(TokenKind::Identifier, length);
    Ok(())
}

fn number_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    let Some(captures) = NUMBER.captures(lexer.remainder()) else {
        return Err(lexer.error(ErrorImpl::ExpectedDigit, lexer.pos + 1));
    };

    let length = captures.get(0).map_or(0, |m| m.end());
    let kind = if captures.get(2).is_some() {
        TokenKind::Decimal
    } else {
        TokenKind::Integer
    };

    lexer.push(kind, length);
    Ok(())
}

fn string_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    match scan_string(lexer.remainder()) {
        Ok(length) => {
            lexer.push(TokenKind::String, length);
            Ok(())
        }
        Err((error, offset)) => Err(lexer.error(error, lexer.pos + offset)),
    }
}

fn character_handler(lexer: &mut Lexer, _regex: &Regex) -> Result<(), Error> {
    match scan_character(lexer.remainder()) {
        Ok(length) => {
            lexer.push(TokenKind::Character, length);
            Ok(())
        }
        Err((error, offset)) => Err(lexer.error(error, lexer.pos + offset)),
    }
}

fn operator_handler(lexer: &mut Lexer, regex: &Regex) -> Result<(), Error> {
    let length = regex
        .find(lexer.remainder())
        .map_or(1, |m| m.end());
    lexer.push(TokenKind::Operator, length);
    Ok(())
}

/// Scans a string literal at the start of `text`, which begins with `"`.
///
/// Returns the byte length including both quotes, or the error and its offset relative to `text`.
fn scan_string(text: &str) -> Result<usize, (ErrorImpl, usize)> {
    let mut chars = text.char_indices().skip(1);

    loop {
        match chars.next() {
            None => return Err((ErrorImpl::UnterminatedString, text.len())),
            Some((i, '"')) => return Ok(i + 1),
            Some((i, '\n' | '\r')) => return Err((ErrorImpl::NewlineInLiteral, i)),
            Some((_, '\\')) => match chars.next() {
                Some((_, escape)) if ESCAPE_LOOKUP.contains_key(&escape) => {}
                Some((i, escape)) => return Err((ErrorImpl::InvalidEscape { escape }, i)),
                None => return Err((ErrorImpl::UnterminatedString, text.len())),
            },
            Some(_) => {}
        }
    }
}

/// Scans a character literal at the start of `text`, which begins with `'`.
fn scan_character(text: &str) -> Result<usize, (ErrorImpl, usize)> {
    let mut chars = text.char_indices().skip(1);

    match chars.next() {
        None => return Err((ErrorImpl::UnterminatedCharacter, text.len())),
        Some((i, '\'')) => return Err((ErrorImpl::MalformedCharacter, i)),
        Some((i, '\n' | '\r')) => return Err((ErrorImpl::NewlineInLiteral, i)),
        Some((_, '\\')) => match chars.next() {
            Some((_, escape)) if ESCAPE_LOOKUP.contains_key(&escape) => {}
            Some((i, escape)) => return Err((ErrorImpl::InvalidEscape { escape }, i)),
            None => return Err((ErrorImpl::UnterminatedCharacter, text.len())),
        },
        Some(_) => {}
    }

    match chars.next() {
        Some((i, '\'')) => Ok(i + 1),
        Some((i, _)) => Err((ErrorImpl::MalformedCharacter, i)),
        None => Err((ErrorImpl::UnterminatedCharacter, text.len())),
    }
}

/// Splits `source` into tokens.
///
/// Backspace characters are applied first, then whitespace between tokens is skipped.
pub fn tokenize(source: &str, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source, file);

    while !lex.at_eof() {
        let pattern = PATTERNS
            .iter()
            .find(|pattern| pattern.regex.is_match(lex.remainder()));

        match pattern {
            Some(pattern) => (pattern.handler)(&mut lex, &pattern.regex)?,
            None => {
                // Unreachable while the operator pattern accepts any character.
                let length = lex.remainder().chars().next().map_or(1, char::len_utf8);
                lex.push(TokenKind::Operator, length);
            }
        }
    }

    Ok(lex.tokens)
}
