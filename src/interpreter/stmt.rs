use std::{io::Write, rc::Rc};

use crate::{
    ast::{
        expressions::ExprKind,
        statements::{Stmt, StmtKind},
    },
    errors::errors::{Error, ErrorImpl},
};

use super::{
    expr::{
        check_deferred, checked_index, evaluate_condition, evaluate_expression, evaluate_index,
        type_error, undefined_variable,
    },
    interpreter::{Interpreter, Variable},
    value::Value,
};

/// What the enclosing statement list should do after a statement ran.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Next,
    /// Unwind to the nearest function call, which yields the value.
    Return(Value),
}

pub fn execute_statement<W: Write>(
    interpreter: &mut Interpreter<W>,
    statement: &Stmt,
) -> Result<Flow, Error> {
    match &statement.kind {
        StmtKind::Expression(expr) => {
            evaluate_expression(interpreter, expr)?;
        }
        StmtKind::Declaration {
            name,
            initializer,
            variable,
            ..
        } => {
            let value = match initializer {
                Some(initializer) => {
                    let value = evaluate_expression(interpreter, initializer)?;
                    let declared = variable.as_ref().map(|binding| &binding.ty);
                    check_deferred(initializer, declared, &value)?;
                    value
                }
                None => Value::Nil,
            };

            let scope = interpreter.current_scope;
            interpreter.scopes.define_variable(
                scope,
                name,
                Variable {
                    value,
                    mutable: true,
                },
                statement.span.start.clone(),
            )?;
        }
        StmtKind::Assignment { receiver, value } => {
            let ExprKind::Access { offset, name, .. } = &receiver.kind else {
                return Err(Error::new(
                    ErrorImpl::InvalidAssignmentTarget,
                    receiver.span.start.clone(),
                ));
            };

            let index = match offset {
                Some(offset) => Some(evaluate_index(interpreter, offset)?),
                None => None,
            };
            let assigned = evaluate_expression(interpreter, value)?;
            check_deferred(value, receiver.ty.as_ref(), &assigned)?;

            let position = &receiver.span.start;
            let scope = interpreter.current_scope;
            let variable = interpreter
                .scopes
                .lookup_variable_mut(scope, name)
                .ok_or_else(|| undefined_variable(name, position))?;

            if !variable.mutable {
                return Err(Error::new(
                    ErrorImpl::ImmutableVariable {
                        variable: name.clone(),
                    },
                    position.clone(),
                ));
            }

            match index {
                Some(index) => match &mut variable.value {
                    Value::List(values) => {
                        let slot = checked_index(index, values.len(), position)?;
                        // Copies the elements first when another value still shares them.
                        Rc::make_mut(values)[slot] = assigned;
                    }
                    other => return Err(type_error("List", other, position)),
                },
                None => variable.value = assigned,
            }
        }
        StmtKind::If {
            condition,
            then_body,
            else_body,
        } => {
            let body = if evaluate_condition(interpreter, condition)? {
                then_body
            } else {
                else_body
            };
            return execute_block(interpreter, body);
        }
        StmtKind::Switch { condition, cases } => {
            let subject = evaluate_expression(interpreter, condition)?;

            // Cases are tried in order; the first match wins and the default runs otherwise.
            for case in cases {
                let matches = match &case.value {
                    Some(value) => evaluate_expression(interpreter, value)? == subject,
                    None => true,
                };
                if matches {
                    return execute_block(interpreter, &case.body);
                }
            }
        }
        StmtKind::While { condition, body } => {
            while evaluate_condition(interpreter, condition)? {
                if let Flow::Return(value) = execute_block(interpreter, body)? {
                    return Ok(Flow::Return(value));
                }
            }
        }
        StmtKind::Return(value) => {
            let evaluated = evaluate_expression(interpreter, value)?;
            check_deferred(value, interpreter.return_type.as_ref(), &evaluated)?;
            return Ok(Flow::Return(evaluated));
        }
    }

    Ok(Flow::Next)
}

/// Executes `statements` in the current scope, stopping at the first `RETURN`.
pub fn execute_statements<W: Write>(
    interpreter: &mut Interpreter<W>,
    statements: &[Stmt],
) -> Result<Flow, Error> {
    for statement in statements {
        if let Flow::Return(value) = execute_statement(interpreter, statement)? {
            return Ok(Flow::Return(value));
        }
    }

    Ok(Flow::Next)
}

/// Executes `statements` in a fresh child scope, released afterwards.
pub fn execute_block<W: Write>(
    interpreter: &mut Interpreter<W>,
    statements: &[Stmt],
) -> Result<Flow, Error> {
    let scope = interpreter.enter_scope();
    let result = execute_statements(interpreter, statements);
    interpreter.exit_scope(scope);

    result
}
