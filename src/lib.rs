#![allow(clippy::module_inception)]

use std::{fmt::Display, rc::Rc};

use crate::errors::errors::{Error, ErrorTip};

pub mod analyzer;
pub mod ast;
pub mod errors;
pub mod interpreter;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod scope;

extern crate regex;

pub use analyzer::analyzer::analyze;
pub use interpreter::interpreter::{evaluate, Interpreter};
pub use interpreter::value::Value;
pub use lexer::lexer::tokenize;
pub use parser::parser::parse;

/// Byte offset into a source, paired with the name of that source.
#[derive(Debug, Clone)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.1, self.0)
    }
}

#[derive(Debug, Clone)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Span covering `self` up to the end of `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.clone(),
            end: other.end.clone(),
        }
    }
}

/// Runs every phase over `source`: tokenize, parse, analyze and evaluate.
///
/// `print` output goes to stdout. Returns the value produced by `main`.
pub fn run(source: &str, file: Option<String>) -> Result<Value, Error> {
    let file_name = Rc::new(file.unwrap_or_else(|| String::from("shell")));
    let tokens = tokenize(source, Some(file_name.to_string()))?;
    let mut ast = parse(tokens, Rc::clone(&file_name))?;
    analyze(&mut ast)?;
    evaluate(&ast)
}

/// Finds the line containing the byte `position`.
///
/// Returns the 1-based line number, the line text and the position within the line.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;

    if pos > content.len() {
        return None;
    }

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        // An offset at end of input points just past the last line.
        if (start..end).contains(&pos) || (end == content.len() && pos == end) {
            let line_pos = pos - start;
            return Some((line_number, line.to_string(), line_pos));
        }

        start = end;
        line_number += 1;
    }

    None
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nsecond\n\nTesting { }\n";
        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 30).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("abc", 4).is_none());
        let (line_number, _, line_pos) = super::get_line_at_position("abc", 3).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line_pos, 3);
    }

    #[test]
    fn test_run_hello_world() {
        let value = super::run(
            "FUN main(): Integer DO RETURN 0; END",
            Some(String::from("test.lang")),
        )
        .unwrap();
        assert_eq!(value, super::Value::Integer(0));
    }
}

/// Prints `error` against the line of `content` it points at.
pub fn display_error(error: &Error, file_name: &str, content: &str) {
    /*
        Error: TypeMatchError (Expected type `Integer`, received `String`)
        -> main.plc
           |
        20 | LET a: Integer = "a";
           | -----------------^
    */

    if let ErrorTip::None = error.get_tip() {
        println!("{}: {}", error.get_phase(), error.get_error_name());
    } else {
        println!(
            "{}: {} ({})",
            error.get_phase(),
            error.get_error_name(),
            error.get_tip()
        );
    }
    println!("-> {}", file_name);

    let Some(position) = error.get_position() else {
        println!("   {}", error);
        return;
    };
    let Some((line, line_text, line_pos)) = get_line_at_position(content, position.0) else {
        println!("   {}", error);
        return;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += c.len_utf8();
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}
