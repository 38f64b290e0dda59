//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the recursive-descent parser that transforms a
//! stream of tokens into a `Source`. Expressions use precedence climbing
//! driven by a binding-power table and handle:
//!
//! - Globals and functions at the top level
//! - Statements: declarations, assignments, IF, SWITCH, WHILE, RETURN
//! - Binary expressions, calls, indexed access and literals
//!
//! There is no error recovery: the first unexpected token aborts the parse.

pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;

#[cfg(test)]
mod tests;
