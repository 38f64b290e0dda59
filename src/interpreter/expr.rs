use std::{cmp::Ordering, io::Write};

use rust_decimal::{Decimal, RoundingStrategy};

use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, ExprKind},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::{interpreter::Interpreter, value::Value};

pub fn evaluate_expression<W: Write>(
    interpreter: &mut Interpreter<W>,
    expr: &Expr,
) -> Result<Value, Error> {
    match &expr.kind {
        ExprKind::Literal(literal) => Ok(Value::from(literal)),
        ExprKind::Group(inner) => evaluate_expression(interpreter, inner),
        ExprKind::Binary {
            operator,
            left,
            right,
        } => evaluate_binary(interpreter, *operator, left, right, &expr.span.start),
        ExprKind::Access { offset, name, .. } => {
            let index = match offset {
                Some(offset) => Some(evaluate_index(interpreter, offset)?),
                None => None,
            };

            let variable = interpreter
                .scopes
                .lookup_variable(interpreter.current_scope, name)
                .ok_or_else(|| undefined_variable(name, &expr.span.start))?;

            match index {
                Some(index) => match &variable.value {
                    Value::List(values) => {
                        let slot = checked_index(index, values.len(), &expr.span.start)?;
                        Ok(values[slot].clone())
                    }
                    other => Err(type_error("List", other, &expr.span.start)),
                },
                None => Ok(variable.value.clone()),
            }
        }
        ExprKind::Call {
            name,
            arguments,
            binding,
        } => {
            let parameter_types = binding
                .as_ref()
                .map(|binding| binding.parameter_types.as_slice());

            let mut values = Vec::with_capacity(arguments.len());
            for (i, argument) in arguments.iter().enumerate() {
                let value = evaluate_expression(interpreter, argument)?;
                check_deferred(argument, parameter_types.and_then(|types| types.get(i)), &value)?;
                values.push(value);
            }

            interpreter.call_function(name, values, Some(&expr.span.start))
        }
        ExprKind::List(elements) => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(evaluate_expression(interpreter, element)?);
            }

            Ok(Value::list(values))
        }
    }
}

/// Evaluates a list offset, which must be an `Integer`.
pub fn evaluate_index<W: Write>(
    interpreter: &mut Interpreter<W>,
    offset: &Expr,
) -> Result<i64, Error> {
    match evaluate_expression(interpreter, offset)? {
        Value::Integer(index) => Ok(index),
        other => Err(type_error("Integer", &other, &offset.span.start)),
    }
}

/// Converts `index` into a slot of a list of `length` elements.
pub fn checked_index(index: i64, length: usize, position: &Position) -> Result<usize, Error> {
    usize::try_from(index)
        .ok()
        .filter(|slot| *slot < length)
        .ok_or_else(|| Error::new(ErrorImpl::IndexOutOfBounds { index, length }, position.clone()))
}

/// Checks `value` against `target` when `expr` was typed `Any` by the analyzer.
///
/// The analyzer lets `Any` values into typed slots, so their type is only
/// known once evaluated. Without a target (an unanalyzed tree) nothing is checked.
pub fn check_deferred(expr: &Expr, target: Option<&Type>, value: &Value) -> Result<(), Error> {
    match target {
        Some(target) if expr.ty == Some(Type::Any) && !value.fits(target) => {
            Err(type_error(&target.name(), value, &expr.span.start))
        }
        _ => Ok(()),
    }
}

/// Evaluates a condition, which must be a `Boolean`.
pub fn evaluate_condition<W: Write>(
    interpreter: &mut Interpreter<W>,
    condition: &Expr,
) -> Result<bool, Error> {
    match evaluate_expression(interpreter, condition)? {
        Value::Boolean(value) => Ok(value),
        other => Err(type_error("Boolean", &other, &condition.span.start)),
    }
}

fn evaluate_binary<W: Write>(
    interpreter: &mut Interpreter<W>,
    operator: BinaryOperator,
    left: &Expr,
    right: &Expr,
    position: &Position,
) -> Result<Value, Error> {
    // `&&` and `||` only evaluate the right side when the left side does not decide the result
    if let BinaryOperator::And | BinaryOperator::Or = operator {
        let decided = operator == BinaryOperator::Or;
        let left = evaluate_condition(interpreter, left)?;
        if left == decided {
            return Ok(Value::Boolean(decided));
        }
        let right = evaluate_expression(interpreter, right)?;
        return apply_binary(operator, Value::Boolean(left), right, position);
    }

    let left = evaluate_expression(interpreter, left)?;
    let right = evaluate_expression(interpreter, right)?;

    apply_binary(operator, left, right, position)
}

/// Applies a non-logical binary operator to two evaluated operands.
pub fn apply_binary(
    operator: BinaryOperator,
    left: Value,
    right: Value,
    position: &Position,
) -> Result<Value, Error> {
    let illegal = |left: &Value, right: &Value| {
        Error::new(
            ErrorImpl::IllegalOperation {
                operator: operator.to_string(),
                left: left.type_name().to_string(),
                right: right.type_name().to_string(),
            },
            position.clone(),
        )
    };
    let overflow = |error: ErrorImpl| Error::new(error, position.clone());

    match operator {
        BinaryOperator::Equal => Ok(Value::Boolean(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Boolean(left != right)),
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => {
            let ordering = left.compare(&right).ok_or_else(|| illegal(&left, &right))?;
            let result = match operator {
                BinaryOperator::Less => ordering == Ordering::Less,
                BinaryOperator::LessEqual => ordering != Ordering::Greater,
                BinaryOperator::Greater => ordering == Ordering::Greater,
                _ => ordering != Ordering::Less,
            };
            Ok(Value::Boolean(result))
        }
        BinaryOperator::Add => match (&left, &right) {
            (Value::String(_), _) | (_, Value::String(_)) => {
                Ok(Value::String(format!("{}{}", left, right)))
            }
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_add(*b)
                .map(Value::Integer)
                .ok_or_else(|| overflow(ErrorImpl::IntegerOverflow)),
            (Value::Decimal(a), Value::Decimal(b)) => a
                .checked_add(*b)
                .map(Value::Decimal)
                .ok_or_else(|| overflow(ErrorImpl::DecimalOverflow)),
            _ => Err(illegal(&left, &right)),
        },
        BinaryOperator::Subtract => match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_sub(*b)
                .map(Value::Integer)
                .ok_or_else(|| overflow(ErrorImpl::IntegerOverflow)),
            (Value::Decimal(a), Value::Decimal(b)) => a
                .checked_sub(*b)
                .map(Value::Decimal)
                .ok_or_else(|| overflow(ErrorImpl::DecimalOverflow)),
            _ => Err(illegal(&left, &right)),
        },
        BinaryOperator::Multiply => match (&left, &right) {
            (Value::Integer(a), Value::Integer(b)) => a
                .checked_mul(*b)
                .map(Value::Integer)
                .ok_or_else(|| overflow(ErrorImpl::IntegerOverflow)),
            (Value::Decimal(a), Value::Decimal(b)) => a
                .checked_mul(*b)
                .map(Value::Decimal)
                .ok_or_else(|| overflow(ErrorImpl::DecimalOverflow)),
            _ => Err(illegal(&left, &right)),
        },
        BinaryOperator::Divide => match (&left, &right) {
            (Value::Integer(_), Value::Integer(0)) => {
                Err(Error::new(ErrorImpl::DivideByZero, position.clone()))
            }
            (Value::Decimal(_), Value::Decimal(b)) if b.is_zero() => {
                Err(Error::new(ErrorImpl::DivideByZero, position.clone()))
            }
            // Integer division is carried out on decimals and rounded half-even to a whole number.
            (Value::Integer(a), Value::Integer(b)) => {
                divide(Decimal::from(*a), Decimal::from(*b), 0)
                    .ok_or_else(|| overflow(ErrorImpl::DecimalOverflow))
            }
            (Value::Decimal(a), Value::Decimal(b)) => {
                divide(*a, *b, a.scale()).ok_or_else(|| overflow(ErrorImpl::DecimalOverflow))
            }
            _ => Err(illegal(&left, &right)),
        },
        BinaryOperator::Power => match (&left, &right) {
            (Value::Integer(base), Value::Integer(exponent)) => {
                let exponent = u32::try_from(*exponent).map_err(|_| illegal(&left, &right))?;
                base.checked_pow(exponent)
                    .map(Value::Integer)
                    .ok_or_else(|| overflow(ErrorImpl::IntegerOverflow))
            }
            _ => Err(illegal(&left, &right)),
        },
        BinaryOperator::And | BinaryOperator::Or => match (&left, &right) {
            (Value::Boolean(a), Value::Boolean(b)) => {
                let result = if operator == BinaryOperator::And {
                    *a && *b
                } else {
                    *a || *b
                };
                Ok(Value::Boolean(result))
            }
            _ => Err(illegal(&left, &right)),
        },
    }
}

/// `dividend / divisor` rounded half-even to exactly `scale` decimal places.
fn divide(dividend: Decimal, divisor: Decimal, scale: u32) -> Option<Value> {
    let mut quotient = dividend
        .checked_div(divisor)?
        .round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);
    quotient.rescale(scale);
    Some(Value::Decimal(quotient))
}

pub fn type_error(expected: &str, received: &Value, position: &Position) -> Error {
    Error::new(
        ErrorImpl::RuntimeTypeError {
            expected: expected.to_string(),
            received: received.type_name().to_string(),
        },
        position.clone(),
    )
}

pub fn undefined_variable(name: &str, position: &Position) -> Error {
    Error::new(
        ErrorImpl::UndefinedVariable {
            variable: name.to_string(),
        },
        position.clone(),
    )
}
