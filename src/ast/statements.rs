use crate::Span;

use super::{ast::VariableBinding, expressions::Expr};

#[derive(Debug, Clone)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub enum StmtKind {
    Expression(Expr),
    Declaration {
        name: String,
        type_name: Option<String>,
        initializer: Option<Expr>,
        variable: Option<VariableBinding>,
    },
    /// `receiver = value;` where the receiver is always an access expression.
    Assignment { receiver: Expr, value: Expr },
    If {
        condition: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    Switch { condition: Expr, cases: Vec<Case> },
    While { condition: Expr, body: Vec<Stmt> },
    Return(Expr),
}

/// A `CASE value:` arm, or the trailing `DEFAULT` arm when `value` is `None`.
#[derive(Debug, Clone)]
pub struct Case {
    pub value: Option<Expr>,
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}
