use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{
    ast::expressions::{BinaryOperator, Expr, ExprKind, Literal},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind, ESCAPE_LOOKUP},
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    let mut left = parse_primary_expr(parser)?;

    // While the next infix operator binds tighter than `bp`, keep extending the lhs
    while let Some((symbol, _)) = parser.current_infix() {
        let binding_power = *parser
            .get_bp_lookup()
            .get(symbol)
            .unwrap_or(&BindingPower::Default);
        if binding_power <= bp {
            break;
        }

        let Some(handler) = parser.get_led_lookup().get(symbol).copied() else {
            break;
        };
        left = handler(parser, left, binding_power)?;
    }

    Ok(left)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let Some((symbol, width)) = parser.current_infix() else {
        return Err(parser.unexpected("expected operator"));
    };
    let operator = BinaryOperator::from_symbol(symbol)
        .ok_or_else(|| parser.unexpected("expected binary operator"))?;
    parser.skip(width);

    let right = parse_expr(parser, bp)?;

    let span = left.span.to(&right.span);

    Ok(Expr::new(
        ExprKind::Binary {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    ))
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let Some(token) = parser.current_token().cloned() else {
        return Err(parser.unexpected("expected expression"));
    };

    match token.kind {
        TokenKind::Integer => {
            parser.advance()?;
            let value = token.value.parse::<i64>().map_err(|_| number_error(&token))?;
            Ok(literal(Literal::Integer(value), &token))
        }
        TokenKind::Decimal => {
            parser.advance()?;
            let value = Decimal::from_str(&token.value).map_err(|_| number_error(&token))?;
            Ok(literal(Literal::Decimal(value), &token))
        }
        TokenKind::Character => {
            parser.advance()?;
            let text = resolve_escapes(strip_quotes(&token.value));
            let mut resolved = text.chars();
            match (resolved.next(), resolved.next()) {
                (Some(c), None) => Ok(literal(Literal::Character(c), &token)),
                _ => Err(Error::new(
                    ErrorImpl::UnexpectedTokenDetailed {
                        token: token.value.clone(),
                        message: String::from("expected a single character"),
                    },
                    token.span.start.clone(),
                )),
            }
        }
        TokenKind::String => {
            parser.advance()?;
            let value = resolve_escapes(strip_quotes(&token.value));
            Ok(literal(Literal::String(value), &token))
        }
        TokenKind::Identifier => parse_identifier_expr(parser),
        TokenKind::Operator if token.value == "(" => parse_grouping_expr(parser),
        TokenKind::Operator => Err(parser.unexpected("expected expression")),
    }
}

fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance()?;

    match token.value.as_str() {
        "NIL" => return Ok(literal(Literal::Nil, &token)),
        "TRUE" => return Ok(literal(Literal::Boolean(true), &token)),
        "FALSE" => return Ok(literal(Literal::Boolean(false), &token)),
        _ => {}
    }

    if parser.match_literal("(") {
        let mut arguments = vec![];
        if !parser.peek_literal(")") {
            loop {
                arguments.push(parse_expr(parser, BindingPower::Default)?);
                if !parser.match_literal(",") {
                    break;
                }
            }
        }
        parser.expect_literal(")")?;

        return Ok(Expr::new(
            ExprKind::Call {
                name: token.value,
                arguments,
                binding: None,
            },
            parser.span_from(token.span.start),
        ));
    }

    if parser.match_literal("[") {
        let offset = parse_expr(parser, BindingPower::Default)?;
        parser.expect_literal("]")?;

        return Ok(Expr::new(
            ExprKind::Access {
                offset: Some(Box::new(offset)),
                name: token.value,
                binding: None,
            },
            parser.span_from(token.span.start),
        ));
    }

    Ok(Expr::new(
        ExprKind::Access {
            offset: None,
            name: token.value,
            binding: None,
        },
        token.span,
    ))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect_literal("(")?.span.start;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect_literal(")")?;

    Ok(Expr::new(ExprKind::Group(Box::new(expr)), parser.span_from(start)))
}

/// Parses `[ (expr (, expr)*)? ]`.
pub fn parse_list_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.expect_literal("[")?.span.start;

    let mut elements = vec![];
    if !parser.peek_literal("]") {
        loop {
            elements.push(parse_expr(parser, BindingPower::Default)?);
            if !parser.match_literal(",") {
                break;
            }
        }
    }
    parser.expect_literal("]")?;

    Ok(Expr::new(ExprKind::List(elements), parser.span_from(start)))
}

fn literal(value: Literal, token: &Token) -> Expr {
    Expr::new(ExprKind::Literal(value), token.span.clone())
}

fn number_error(token: &Token) -> Error {
    Error::new(
        ErrorImpl::NumberParseError {
            token: token.value.clone(),
        },
        token.span.start.clone(),
    )
}

fn strip_quotes(text: &str) -> &str {
    if text.len() >= 2 {
        &text[1..text.len() - 1]
    } else {
        text
    }
}

/// Replaces `\b \n \r \t \' \" \\` with the characters they denote.
pub fn resolve_escapes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(resolved) = chars.peek().and_then(|next| ESCAPE_LOOKUP.get(next)) {
                result.push(*resolved);
                chars.next();
                continue;
            }
        }
        result.push(ch);
    }

    result
}
