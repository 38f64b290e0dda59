//! Static analysis module.
//!
//! This module resolves names and types over a parsed `Source`:
//! - Globals and functions are defined into the top-level scope
//! - Every block gets its own child scope
//! - Expressions are annotated with their `Type`, accesses and calls with
//!   the binding they resolve to
//!
//! A program must declare `main/0` returning `Integer`.

pub mod analyzer;
pub mod expr;
pub mod stmt;
