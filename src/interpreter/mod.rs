//! Tree-walking interpreter.
//!
//! Evaluates an analyzed `Source`: globals in order, then `main/0`. `RETURN`
//! travels back to the calling function as a `Flow` value rather than an
//! error.

pub mod expr;
pub mod interpreter;
pub mod stdlib;
pub mod stmt;
pub mod value;
