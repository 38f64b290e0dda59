//! Unit tests for error handling.
//!
//! This module contains tests for error types, phase classification and reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip, Phase};
use crate::Position;
use std::rc::Rc;

fn at(offset: u32) -> Position {
    Position(offset, Rc::new("test.plc".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(ErrorImpl::UnterminatedString, at(10));

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert_eq!(error.get_phase(), Phase::Lex);
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
        },
        at(42),
    );

    assert_eq!(error.get_offset(), Some(42));
    assert_eq!(error.get_phase(), Phase::Parse);
}

#[test]
fn test_unpositioned_error() {
    let error = Error::unpositioned(ErrorImpl::MissingMain);

    assert!(error.get_position().is_none());
    assert_eq!(error.get_phase(), Phase::Semantic);
    assert_eq!(error.to_string(), "SemanticError: no main/0 function declared");
}

#[test]
fn test_display_includes_offset() {
    let error = Error::new(ErrorImpl::DivideByZero, at(7));

    assert_eq!(error.to_string(), "RuntimeError: division by zero (at offset 7)");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "Integer".to_string(),
            received: "String".to_string(),
        },
        at(0),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(
        error.get_tip().to_string(),
        "Expected type `Integer`, received `String`"
    );
}

#[test]
fn test_runtime_errors_are_runtime_phase() {
    let errors = [
        ErrorImpl::DivideByZero,
        ErrorImpl::IntegerOverflow,
        ErrorImpl::IndexOutOfBounds {
            index: 3,
            length: 3,
        },
        ErrorImpl::UndefinedFunction {
            function: "f".to_string(),
            arity: 1,
        },
    ];

    for error in errors {
        assert_eq!(Error::unpositioned(error).get_phase(), Phase::Runtime);
    }
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(ErrorImpl::DivideByZero, at(0));

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_suggestion() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "END".to_string(),
        },
        at(0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(_) => (),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_phase_display() {
    assert_eq!(Phase::Lex.to_string(), "LexError");
    assert_eq!(Phase::Parse.to_string(), "ParseError");
    assert_eq!(Phase::Semantic.to_string(), "SemanticError");
    assert_eq!(Phase::Runtime.to_string(), "RuntimeError");
}
