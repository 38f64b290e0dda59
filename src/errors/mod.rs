//! Error types and error handling for every phase.
//!
//! This module defines the single error type used from lexing through
//! evaluation. It includes:
//!
//! - Error structures with optional source position information
//! - Specific error variants, classified by the phase that raises them
//! - Error naming and suggestion tips for the host's diagnostics

pub mod errors;

#[cfg(test)]
mod tests;
