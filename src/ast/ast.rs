use crate::Span;

use super::{expressions::Expr, statements::Stmt, types::Type};

/// A whole program: globals first, then functions.
#[derive(Debug, Clone)]
pub struct Source {
    pub globals: Vec<Global>,
    pub functions: Vec<Function>,
}

/// A `LIST`, `VAR` or `VAL` declaration at the top of a source.
#[derive(Debug, Clone)]
pub struct Global {
    pub name: String,
    pub type_name: String,
    pub mutable: bool,
    pub initializer: Option<Expr>,
    pub span: Span,
    pub variable: Option<VariableBinding>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub name: String,
    pub parameters: Vec<String>,
    pub parameter_type_names: Vec<String>,
    pub return_type_name: Option<String>,
    pub body: Vec<Stmt>,
    pub span: Span,
    pub function: Option<FunctionBinding>,
}

/// Resolved variable a name refers to, as recorded by the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableBinding {
    pub name: String,
    pub ty: Type,
    pub mutable: bool,
}

/// Resolved function signature a call refers to, as recorded by the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionBinding {
    pub name: String,
    pub parameter_types: Vec<Type>,
    pub return_type: Type,
}

impl FunctionBinding {
    pub fn arity(&self) -> usize {
        self.parameter_types.len()
    }
}

impl Function {
    pub fn arity(&self) -> usize {
        self.parameters.len()
    }
}
