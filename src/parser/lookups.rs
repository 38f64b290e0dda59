use std::collections::HashMap;

use crate::{ast::{expressions::Expr, statements::Stmt}, errors::errors::Error};

use super::{expr::parse_binary_expr, parser::Parser, stmt::*};

/// Precedence levels, lowest first. All binary levels are left-associative.
#[derive(PartialEq, PartialOrd, Clone, Copy, Debug)]
pub enum BindingPower {
    Default,
    Logical,
    Equality,
    Relational,
    Additive,
    Multiplicative,
    Primary,
}

pub type StmtHandler = fn(&mut Parser) -> Result<Stmt, Error>;
pub type LEDHandler = fn(&mut Parser, Expr, BindingPower) -> Result<Expr, Error>;

pub fn create_token_lookups(parser: &mut Parser) {
    // Logical
    parser.led("&&", BindingPower::Logical, parse_binary_expr);
    parser.led("||", BindingPower::Logical, parse_binary_expr);

    // Equality
    parser.led("==", BindingPower::Equality, parse_binary_expr);
    parser.led("!=", BindingPower::Equality, parse_binary_expr);

    // Relational
    parser.led("<", BindingPower::Relational, parse_binary_expr);
    parser.led("<=", BindingPower::Relational, parse_binary_expr);
    parser.led(">", BindingPower::Relational, parse_binary_expr);
    parser.led(">=", BindingPower::Relational, parse_binary_expr);

    // Additive and multiplicative
    parser.led("+", BindingPower::Additive, parse_binary_expr);
    parser.led("-", BindingPower::Additive, parse_binary_expr);
    parser.led("*", BindingPower::Multiplicative, parse_binary_expr);
    parser.led("/", BindingPower::Multiplicative, parse_binary_expr);
    parser.led("^", BindingPower::Multiplicative, parse_binary_expr);

    // Statements
    parser.stmt("LET", parse_declaration_stmt);
    parser.stmt("IF", parse_if_stmt);
    parser.stmt("SWITCH", parse_switch_stmt);
    parser.stmt("WHILE", parse_while_stmt);
    parser.stmt("RETURN", parse_return_stmt);
}

// Lookup tables inside parser struct, so it's easier
pub type StmtLookup = HashMap<&'static str, StmtHandler>;
pub type LEDLookup = HashMap<&'static str, LEDHandler>;
pub type BPLookup = HashMap<&'static str, BindingPower>;
