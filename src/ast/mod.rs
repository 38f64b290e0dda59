/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: Source, globals, functions and the binding annotations
/// - expressions: Definitions for the expression variants
/// - statements: Definitions for the statement variants
/// - types: The type system shared by the analyzer and the annotations
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
