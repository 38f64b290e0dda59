use crate::{
    ast::{
        ast::{Function, Global},
        statements::{Case, Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{
    expr::parse_list_expr,
    parser::{parse_type_name, Parser},
};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let handler = parser
        .current_token()
        .filter(|token| token.kind == TokenKind::Identifier)
        .and_then(|token| parser.get_stmt_lookup().get(token.value.as_str()).copied());

    if let Some(handler) = handler {
        return handler(parser);
    }

    let start = parser.get_position();
    let expr = parse_expr(parser, BindingPower::Default)?;

    if parser.match_literal("=") {
        if !expr.is_access() {
            return Err(Error::new(ErrorImpl::InvalidAssignmentTarget, expr.span.start.clone()));
        }

        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect_literal(";")?;

        return Ok(Stmt::new(
            StmtKind::Assignment {
                receiver: expr,
                value,
            },
            parser.span_from(start),
        ));
    }

    parser.expect_literal(";")?;

    Ok(Stmt::new(StmtKind::Expression(expr), parser.span_from(start)))
}

/// Parses statements until one of `terminators` is next, without consuming it.
pub fn parse_block(parser: &mut Parser, terminators: &[&str]) -> Result<Vec<Stmt>, Error> {
    let mut statements = Vec::new();

    while !parser.peek_any_literal(terminators) {
        if !parser.has_tokens() {
            let expected = terminators
                .iter()
                .map(|terminator| format!("`{}`", terminator))
                .collect::<Vec<String>>()
                .join(" or ");
            return Err(parser.unexpected(&expected));
        }
        statements.push(parse_stmt(parser)?);
    }

    Ok(statements)
}

/// Parses `LIST`, `VAR` or `VAL` globals.
pub fn parse_global(parser: &mut Parser) -> Result<Global, Error> {
    let start_token = parser.advance()?;
    let keyword = start_token.value.as_str();

    let name = parser
        .expect_kind(TokenKind::Identifier, "expected identifier during global declaration")?
        .value;
    parser.expect_literal(":")?;
    let type_name = parse_type_name(parser)?;

    let (mutable, initializer) = match keyword {
        "LIST" => {
            parser.expect_literal("=")?;
            (true, Some(parse_list_expr(parser)?))
        }
        "VAR" => {
            let initializer = if parser.match_literal("=") {
                Some(parse_expr(parser, BindingPower::Default)?)
            } else {
                None
            };
            (true, initializer)
        }
        _ => {
            parser.expect_literal("=")?;
            (false, Some(parse_expr(parser, BindingPower::Default)?))
        }
    };

    parser.expect_literal(";")?;

    Ok(Global {
        name,
        type_name,
        mutable,
        initializer,
        span: parser.span_from(start_token.span.start),
        variable: None,
    })
}

pub fn parse_function(parser: &mut Parser) -> Result<Function, Error> {
    let start = parser.expect_literal("FUN")?.span.start;

    let name = parser
        .expect_kind(TokenKind::Identifier, "expected function name")?
        .value;

    parser.expect_literal("(")?;

    let mut parameters = Vec::new();
    let mut parameter_type_names = Vec::new();
    if !parser.peek_literal(")") {
        loop {
            let parameter = parser
                .expect_kind(TokenKind::Identifier, "expected parameter name")?
                .value;
            parser.expect_literal(":")?;
            parameters.push(parameter);
            parameter_type_names.push(parse_type_name(parser)?);

            if !parser.match_literal(",") {
                break;
            }
        }
    }

    parser.expect_literal(")")?;

    let return_type_name = if parser.match_literal(":") {
        Some(parse_type_name(parser)?)
    } else {
        None
    };

    parser.expect_literal("DO")?;
    let body = parse_block(parser, &["END"])?;
    parser.expect_literal("END")?;

    Ok(Function {
        name,
        parameters,
        parameter_type_names,
        return_type_name,
        body,
        span: parser.span_from(start),
        function: None,
    })
}

pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_literal("LET")?.span.start;

    let name = parser
        .expect_kind(TokenKind::Identifier, "expected identifier during variable declaration")?
        .value;

    let type_name = if parser.match_literal(":") {
        Some(parse_type_name(parser)?)
    } else {
        None
    };

    let initializer = if parser.match_literal("=") {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect_literal(";")?;

    Ok(Stmt::new(
        StmtKind::Declaration {
            name,
            type_name,
            initializer,
            variable: None,
        },
        parser.span_from(start),
    ))
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_literal("IF")?.span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_literal("DO")?;
    let then_body = parse_block(parser, &["ELSE", "END"])?;

    let else_body = if parser.match_literal("ELSE") {
        parse_block(parser, &["END"])?
    } else {
        Vec::new()
    };

    parser.expect_literal("END")?;

    Ok(Stmt::new(
        StmtKind::If {
            condition,
            then_body,
            else_body,
        },
        parser.span_from(start),
    ))
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_literal("SWITCH")?.span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;

    let mut cases = Vec::new();
    while parser.peek_literal("CASE") {
        let case_start = parser.advance()?.span.start;
        let value = parse_expr(parser, BindingPower::Default)?;
        parser.expect_literal(":")?;
        let body = parse_block(parser, &["CASE", "DEFAULT", "END"])?;

        cases.push(Case {
            value: Some(value),
            body,
            span: parser.span_from(case_start),
        });
    }

    let default_start = parser.expect_literal("DEFAULT")?.span.start;
    let body = parse_block(parser, &["END"])?;
    cases.push(Case {
        value: None,
        body,
        span: parser.span_from(default_start),
    });

    parser.expect_literal("END")?;

    Ok(Stmt::new(
        StmtKind::Switch { condition, cases },
        parser.span_from(start),
    ))
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_literal("WHILE")?.span.start;

    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect_literal("DO")?;
    let body = parse_block(parser, &["END"])?;
    parser.expect_literal("END")?;

    Ok(Stmt::new(
        StmtKind::While { condition, body },
        parser.span_from(start),
    ))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect_literal("RETURN")?.span.start;

    let value = parse_expr(parser, BindingPower::Default)?;
    parser.expect_literal(";")?;

    Ok(Stmt::new(StmtKind::Return(value), parser.span_from(start)))
}
