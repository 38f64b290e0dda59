use crate::{
    ast::{
        ast::VariableBinding,
        expressions::ExprKind,
        statements::{Stmt, StmtKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    analyzer::{check_assignable, Analyzer},
    expr::analyze_expression,
};

pub fn analyze_statement(analyzer: &mut Analyzer, statement: &mut Stmt) -> Result<(), Error> {
    match &mut statement.kind {
        StmtKind::Expression(expr) => {
            if !matches!(expr.kind, ExprKind::Call { .. }) {
                return Err(Error::new(ErrorImpl::ExpressionNotCall, expr.span.start.clone()));
            }
            analyze_expression(analyzer, expr)?;
        }
        StmtKind::Declaration {
            name,
            type_name,
            initializer,
            variable,
        } => {
            let declared = match type_name {
                Some(type_name) => Some(analyzer.resolve_type(type_name, &statement.span.start)?),
                None => None,
            };

            let ty = match (declared, initializer.as_mut()) {
                (Some(declared), Some(initializer)) => {
                    analyze_expression(analyzer, initializer)?;
                    check_assignable(&declared, initializer)?;
                    declared
                }
                (Some(declared), None) => declared,
                (None, Some(initializer)) => analyze_expression(analyzer, initializer)?,
                (None, None) => {
                    return Err(Error::new(
                        ErrorImpl::ExpectedExplicitValue {
                            variable: name.clone(),
                        },
                        statement.span.start.clone(),
                    ))
                }
            };

            let binding = VariableBinding {
                name: name.clone(),
                ty,
                mutable: true,
            };
            let scope = analyzer.current_scope;
            analyzer
                .scopes
                .define_variable(scope, name, binding.clone(), statement.span.start.clone())?;
            *variable = Some(binding);
        }
        StmtKind::Assignment { receiver, value } => {
            let receiver_type = analyze_expression(analyzer, receiver)?;

            if let ExprKind::Access {
                binding: Some(binding),
                ..
            } = &receiver.kind
            {
                if !binding.mutable {
                    return Err(Error::new(
                        ErrorImpl::ImmutableAssignment {
                            variable: binding.name.clone(),
                        },
                        receiver.span.start.clone(),
                    ));
                }
            }

            analyze_expression(analyzer, value)?;
            check_assignable(&receiver_type, value)?;
        }
        StmtKind::If {
            condition,
            then_body,
            else_body,
        } => {
            analyze_expression(analyzer, condition)?;
            check_assignable(&Type::Boolean, condition)?;

            analyze_block(analyzer, then_body)?;
            analyze_block(analyzer, else_body)?;
        }
        StmtKind::Switch { condition, cases } => {
            let subject = analyze_expression(analyzer, condition)?;

            for case in cases.iter_mut() {
                if let Some(value) = case.value.as_mut() {
                    analyze_expression(analyzer, value)?;
                    check_assignable(&subject, value)?;
                }
                analyze_block(analyzer, &mut case.body)?;
            }
        }
        StmtKind::While { condition, body } => {
            analyze_expression(analyzer, condition)?;
            check_assignable(&Type::Boolean, condition)?;

            analyze_block(analyzer, body)?;
        }
        StmtKind::Return(value) => {
            analyze_expression(analyzer, value)?;
            let return_type = analyzer.return_type.clone();
            check_assignable(&return_type, value)?;
        }
    }

    Ok(())
}

/// Analyzes `statements` in the current scope.
pub fn analyze_statements(analyzer: &mut Analyzer, statements: &mut [Stmt]) -> Result<(), Error> {
    for statement in statements.iter_mut() {
        analyze_statement(analyzer, statement)?;
    }

    Ok(())
}

/// Analyzes `statements` in a fresh child scope, released afterwards.
pub fn analyze_block(analyzer: &mut Analyzer, statements: &mut [Stmt]) -> Result<(), Error> {
    let scope = analyzer.enter_scope();
    let result = analyze_statements(analyzer, statements);
    analyzer.exit_scope(scope);

    result
}
