//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Global and function definitions
//! - Statements and their block terminators
//! - Operator precedence and associativity
//! - Literals, calls and indexed access
//! - Error offsets for malformed input

use std::rc::Rc;

use rust_decimal::Decimal;

use super::parser::parse;
use crate::{
    ast::{
        ast::Source,
        expressions::{BinaryOperator, Expr, ExprKind, Literal},
        statements::StmtKind,
    },
    errors::errors::{Error, ErrorImpl, Phase},
    lexer::lexer::tokenize,
};

fn parse_source(source: &str) -> Result<Source, Error> {
    let tokens = tokenize(source, Some("test.plc".to_string())).unwrap();
    parse(tokens, Rc::new("test.plc".to_string()))
}

/// Parses `expr` as the initializer of a single `VAL` global.
fn parse_expression(expr: &str) -> Expr {
    let source = parse_source(&format!("VAL x: Any = {};", expr)).unwrap();
    source.globals[0].initializer.clone().unwrap()
}

fn binary_parts(expr: &Expr) -> (BinaryOperator, &Expr, &Expr) {
    match &expr.kind {
        ExprKind::Binary {
            operator,
            left,
            right,
        } => (*operator, left, right),
        other => panic!("expected binary expression, found {:?}", other),
    }
}

#[test]
fn test_parse_empty_program() {
    let source = parse_source("").unwrap();

    assert!(source.globals.is_empty());
    assert!(source.functions.is_empty());
}

#[test]
fn test_parse_globals() {
    let source = parse_source(
        "LIST nums: Integer = [1, 2, 3]; VAR count: Integer; VAR name: String = \"x\"; VAL limit: Integer = 10;",
    )
    .unwrap();

    assert_eq!(source.globals.len(), 4);

    let list = &source.globals[0];
    assert_eq!(list.name, "nums");
    assert_eq!(list.type_name, "Integer");
    assert!(list.mutable);
    match &list.initializer.as_ref().unwrap().kind {
        ExprKind::List(elements) => assert_eq!(elements.len(), 3),
        other => panic!("expected list literal, found {:?}", other),
    }

    assert!(source.globals[1].mutable);
    assert!(source.globals[1].initializer.is_none());
    assert!(source.globals[2].initializer.is_some());

    let val = &source.globals[3];
    assert_eq!(val.name, "limit");
    assert!(!val.mutable);
}

#[test]
fn test_parse_empty_list_global() {
    let source = parse_source("LIST empty: Integer = [];").unwrap();

    match &source.globals[0].initializer.as_ref().unwrap().kind {
        ExprKind::List(elements) => assert!(elements.is_empty()),
        other => panic!("expected list literal, found {:?}", other),
    }
}

#[test]
fn test_val_requires_initializer() {
    let error = parse_source("VAL limit: Integer;").unwrap_err();

    assert_eq!(error.get_phase(), Phase::Parse);
    assert_eq!(error.get_offset(), Some(18));
}

#[test]
fn test_parse_function_declaration() {
    let source = parse_source("FUN add(a: Integer, b: Integer): Integer DO RETURN a + b; END").unwrap();

    let function = &source.functions[0];
    assert_eq!(function.name, "add");
    assert_eq!(function.parameters, vec!["a".to_string(), "b".to_string()]);
    assert_eq!(
        function.parameter_type_names,
        vec!["Integer".to_string(), "Integer".to_string()]
    );
    assert_eq!(function.return_type_name.as_deref(), Some("Integer"));
    assert_eq!(function.arity(), 2);
    assert_eq!(function.body.len(), 1);
    assert!(matches!(function.body[0].kind, StmtKind::Return(_)));
}

#[test]
fn test_parse_function_without_return_type() {
    let source = parse_source("FUN log() DO print(1); END").unwrap();

    let function = &source.functions[0];
    assert!(function.parameters.is_empty());
    assert!(function.return_type_name.is_none());
    assert!(matches!(function.body[0].kind, StmtKind::Expression(_)));
}

#[test]
fn test_globals_must_precede_functions() {
    let error = parse_source("FUN main(): Integer DO RETURN 0; END VAR x: Integer;").unwrap_err();

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::UnexpectedTokenDetailed { token, .. } if token == "VAR"
    ));
    assert_eq!(error.get_offset(), Some(37));
}

#[test]
fn test_parse_declarations() {
    let source = parse_source(
        "FUN main(): Integer DO LET a; LET b: Integer; LET c = 1; LET d: Integer = 2; RETURN 0; END",
    )
    .unwrap();

    let body = &source.functions[0].body;
    let shapes: Vec<(bool, bool)> = body[..4]
        .iter()
        .map(|stmt| match &stmt.kind {
            StmtKind::Declaration {
                type_name,
                initializer,
                ..
            } => (type_name.is_some(), initializer.is_some()),
            other => panic!("expected declaration, found {:?}", other),
        })
        .collect();

    assert_eq!(shapes, vec![(false, false), (true, false), (false, true), (true, true)]);
}

#[test]
fn test_parse_assignment() {
    let source = parse_source("FUN main(): Integer DO x = 42; l[0] = 1; RETURN 0; END").unwrap();

    let body = &source.functions[0].body;
    match &body[0].kind {
        StmtKind::Assignment { receiver, value } => {
            assert!(matches!(&receiver.kind, ExprKind::Access { name, offset: None, .. } if name == "x"));
            assert!(matches!(value.kind, ExprKind::Literal(Literal::Integer(42))));
        }
        other => panic!("expected assignment, found {:?}", other),
    }
    assert!(matches!(
        &body[1].kind,
        StmtKind::Assignment { receiver, .. }
            if matches!(&receiver.kind, ExprKind::Access { offset: Some(_), .. })
    ));
}

#[test]
fn test_assignment_target_must_be_access() {
    let error = parse_source("FUN main(): Integer DO f() = 1; RETURN 0; END").unwrap_err();

    assert_eq!(error.get_impl(), &ErrorImpl::InvalidAssignmentTarget);
    assert_eq!(error.get_phase(), Phase::Parse);
    assert_eq!(error.get_offset(), Some(23));
}

#[test]
fn test_parse_if_else() {
    let source = parse_source(
        "FUN main(): Integer DO IF x > 0 DO print(1); ELSE print(2); print(3); END RETURN 0; END",
    )
    .unwrap();

    match &source.functions[0].body[0].kind {
        StmtKind::If {
            then_body,
            else_body,
            ..
        } => {
            assert_eq!(then_body.len(), 1);
            assert_eq!(else_body.len(), 2);
        }
        other => panic!("expected if, found {:?}", other),
    }
}

#[test]
fn test_parse_if_without_else() {
    let source = parse_source("FUN main(): Integer DO IF TRUE DO END RETURN 0; END").unwrap();

    match &source.functions[0].body[0].kind {
        StmtKind::If {
            then_body,
            else_body,
            ..
        } => {
            assert!(then_body.is_empty());
            assert!(else_body.is_empty());
        }
        other => panic!("expected if, found {:?}", other),
    }
}

#[test]
fn test_parse_switch() {
    let source = parse_source(
        "FUN main(): Integer DO SWITCH c CASE 'y': print(1); CASE 'n': print(2); print(3); DEFAULT print(4); END RETURN 0; END",
    )
    .unwrap();

    match &source.functions[0].body[0].kind {
        StmtKind::Switch { cases, .. } => {
            assert_eq!(cases.len(), 3);
            assert!(matches!(
                cases[0].value.as_ref().map(|v| &v.kind),
                Some(ExprKind::Literal(Literal::Character('y')))
            ));
            assert_eq!(cases[1].body.len(), 2);
            assert!(cases[2].value.is_none());
        }
        other => panic!("expected switch, found {:?}", other),
    }
}

#[test]
fn test_switch_requires_default() {
    let error = parse_source("FUN main(): Integer DO SWITCH 1 CASE 1: print(1); END RETURN 0; END").unwrap_err();

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::UnexpectedTokenDetailed { token, .. } if token == "END"
    ));
}

#[test]
fn test_default_must_be_last() {
    assert!(parse_source("FUN main(): Integer DO SWITCH 1 DEFAULT print(0); CASE 1: print(1); END RETURN 0; END").is_err());
}

#[test]
fn test_parse_while() {
    let source = parse_source("FUN main(): Integer DO WHILE i < 10 DO i = i + 1; END RETURN 0; END").unwrap();

    match &source.functions[0].body[0].kind {
        StmtKind::While { condition, body } => {
            assert_eq!(binary_parts(condition).0, BinaryOperator::Less);
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected while, found {:?}", other),
    }
}

#[test]
fn test_precedence() {
    let expr = parse_expression("1 + 2 * 3");

    let (operator, left, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Add);
    assert!(matches!(left.kind, ExprKind::Literal(Literal::Integer(1))));
    assert_eq!(binary_parts(right).0, BinaryOperator::Multiply);
}

#[test]
fn test_left_associativity() {
    let expr = parse_expression("10 - 4 - 3");

    let (operator, left, right) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Subtract);
    assert_eq!(binary_parts(left).0, BinaryOperator::Subtract);
    assert!(matches!(right.kind, ExprKind::Literal(Literal::Integer(3))));
}

#[test]
fn test_logical_binds_loosest() {
    let expr = parse_expression("a < 1 && b == 2 || c");

    let (operator, left, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Or);

    let (operator, left, right) = binary_parts(left);
    assert_eq!(operator, BinaryOperator::And);
    assert_eq!(binary_parts(left).0, BinaryOperator::Less);
    assert_eq!(binary_parts(right).0, BinaryOperator::Equal);
}

#[test]
fn test_comparison_with_equals() {
    assert_eq!(binary_parts(&parse_expression("a <= b")).0, BinaryOperator::LessEqual);
    assert_eq!(binary_parts(&parse_expression("a >= b")).0, BinaryOperator::GreaterEqual);
}

#[test]
fn test_separated_comparison_and_equals_is_error() {
    assert!(parse_source("VAL x: Any = a < = b;").is_err());
}

#[test]
fn test_power_shares_multiplicative_level() {
    let expr = parse_expression("2 * 3 ^ 2");

    let (operator, left, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Power);
    assert_eq!(binary_parts(left).0, BinaryOperator::Multiply);
}

#[test]
fn test_group() {
    let expr = parse_expression("(1 + 2) * 3");

    let (operator, left, _) = binary_parts(&expr);
    assert_eq!(operator, BinaryOperator::Multiply);
    match &left.kind {
        ExprKind::Group(inner) => assert_eq!(binary_parts(inner).0, BinaryOperator::Add),
        other => panic!("expected group, found {:?}", other),
    }
}

#[test]
fn test_literals() {
    assert!(matches!(parse_expression("NIL").kind, ExprKind::Literal(Literal::Nil)));
    assert!(matches!(parse_expression("TRUE").kind, ExprKind::Literal(Literal::Boolean(true))));
    assert!(matches!(parse_expression("FALSE").kind, ExprKind::Literal(Literal::Boolean(false))));
    assert!(matches!(parse_expression("-7").kind, ExprKind::Literal(Literal::Integer(-7))));

    match parse_expression("3.140").kind {
        ExprKind::Literal(Literal::Decimal(value)) => {
            assert_eq!(value, Decimal::new(3140, 3));
            assert_eq!(value.scale(), 3);
        }
        other => panic!("expected decimal, found {:?}", other),
    }
}

#[test]
fn test_escape_resolution() {
    match parse_expression(r#""a\tb\"c\\""#).kind {
        ExprKind::Literal(Literal::String(value)) => assert_eq!(value, "a\tb\"c\\"),
        other => panic!("expected string, found {:?}", other),
    }

    assert!(matches!(
        parse_expression(r"'\n'").kind,
        ExprKind::Literal(Literal::Character('\n'))
    ));
    assert!(matches!(
        parse_expression(r"'\''").kind,
        ExprKind::Literal(Literal::Character('\''))
    ));
}

#[test]
fn test_integer_out_of_range() {
    let error = parse_source("VAL x: Integer = 99999999999999999999;").unwrap_err();

    assert!(matches!(error.get_impl(), ErrorImpl::NumberParseError { .. }));
    assert_eq!(error.get_offset(), Some(17));
}

#[test]
fn test_calls_and_access() {
    match parse_expression("f(1, g(), x[2])").kind {
        ExprKind::Call { name, arguments, .. } => {
            assert_eq!(name, "f");
            assert_eq!(arguments.len(), 3);
            assert!(matches!(&arguments[1].kind, ExprKind::Call { arguments, .. } if arguments.is_empty()));
            assert!(matches!(&arguments[2].kind, ExprKind::Access { offset: Some(_), .. }));
        }
        other => panic!("expected call, found {:?}", other),
    }
}

#[test]
fn test_spans() {
    let expr = parse_expression("abc + f(1)");

    assert_eq!(expr.span.start.0, 13);
    assert_eq!(expr.span.end.0, 23);
}

#[test]
fn test_missing_semicolon_at_end_of_input() {
    let error = parse_source("VAL x: Integer = 42").unwrap_err();

    assert!(matches!(error.get_impl(), ErrorImpl::UnexpectedEndOfInput { .. }));
    assert_eq!(error.get_offset(), Some(19));
}

#[test]
fn test_unterminated_block() {
    let error = parse_source("FUN main(): Integer DO RETURN 0;").unwrap_err();

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::UnexpectedEndOfInput { expected } if expected == "`END`"
    ));
    assert_eq!(error.get_offset(), Some(32));
}

#[test]
fn test_unexpected_token() {
    let error = parse_source("VAR = 42;").unwrap_err();

    assert!(matches!(
        error.get_impl(),
        ErrorImpl::UnexpectedTokenDetailed { token, .. } if token == "="
    ));
    assert_eq!(error.get_offset(), Some(4));
}

#[test]
fn test_stray_tokens_after_functions() {
    assert!(parse_source("FUN main(): Integer DO RETURN 0; END ;").is_err());
}
