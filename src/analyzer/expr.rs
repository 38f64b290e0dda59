use crate::{
    ast::{
        expressions::{BinaryOperator, Expr, ExprKind, Literal},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
};

use super::analyzer::{accepts, check_assignable, Analyzer};

/// Analyzes `expr`, annotating it (and every sub-expression) with its type.
pub fn analyze_expression(analyzer: &mut Analyzer, expr: &mut Expr) -> Result<Type, Error> {
    let ty = match &mut expr.kind {
        ExprKind::Literal(literal) => literal_type(literal),
        ExprKind::Group(inner) => {
            if !matches!(inner.kind, ExprKind::Binary { .. }) {
                return Err(Error::new(ErrorImpl::GroupWithoutBinary, expr.span.start.clone()));
            }
            analyze_expression(analyzer, inner)?
        }
        ExprKind::Binary {
            operator,
            left,
            right,
        } => {
            let left_type = analyze_expression(analyzer, left)?;
            let right_type = analyze_expression(analyzer, right)?;
            binary_type(*operator, &left_type, &right_type).ok_or_else(|| {
                Error::new(
                    ErrorImpl::InvalidOperands {
                        operator: operator.to_string(),
                        left: left_type.name(),
                        right: right_type.name(),
                    },
                    left.span.start.clone(),
                )
            })?
        }
        ExprKind::Access {
            offset,
            name,
            binding,
        } => {
            let variable = analyzer
                .scopes
                .lookup_variable(analyzer.current_scope, name)
                .cloned()
                .ok_or_else(|| {
                    Error::new(
                        ErrorImpl::VariableNotDeclared {
                            variable: name.clone(),
                        },
                        expr.span.start.clone(),
                    )
                })?;

            let ty = match offset {
                Some(offset) => {
                    analyze_expression(analyzer, offset)?;
                    check_assignable(&Type::Integer, offset)?;

                    variable.ty.element().ok_or_else(|| {
                        Error::new(
                            ErrorImpl::TypeMatchError {
                                expected: Type::list_of(Type::Any).name(),
                                received: variable.ty.name(),
                            },
                            expr.span.start.clone(),
                        )
                    })?
                }
                None => variable.ty.clone(),
            };

            *binding = Some(variable);
            ty
        }
        ExprKind::Call {
            name,
            arguments,
            binding,
        } => {
            for argument in arguments.iter_mut() {
                analyze_expression(analyzer, argument)?;
            }

            let function = analyzer
                .scopes
                .lookup_function(analyzer.current_scope, name, arguments.len())
                .cloned()
                .ok_or_else(|| {
                    Error::new(
                        ErrorImpl::FunctionNotDeclared {
                            function: name.clone(),
                            arity: arguments.len(),
                        },
                        expr.span.start.clone(),
                    )
                })?;

            for (argument, parameter_type) in arguments.iter().zip(&function.parameter_types) {
                let received = argument.ty.clone().unwrap_or(Type::Any);
                if !accepts(parameter_type, &received) {
                    return Err(Error::new(
                        ErrorImpl::ArgumentTypeMatchError {
                            expected: parameter_type.name(),
                            received: received.name(),
                        },
                        argument.span.start.clone(),
                    ));
                }
            }

            let ty = function.return_type.clone();
            *binding = Some(function);
            ty
        }
        ExprKind::List(elements) => {
            let mut element_types = Vec::with_capacity(elements.len());
            for element in elements.iter_mut() {
                element_types.push(analyze_expression(analyzer, element)?);
            }

            // One shared element type gives `List<T>`, anything else is `List<Any>`.
            let element = match element_types.split_first() {
                Some((first, rest)) if rest.iter().all(|ty| ty == first) => first.clone(),
                _ => Type::Any,
            };
            Type::list_of(element)
        }
    };

    expr.ty = Some(ty.clone());
    Ok(ty)
}

pub fn literal_type(literal: &Literal) -> Type {
    match literal {
        Literal::Nil => Type::Nil,
        Literal::Boolean(_) => Type::Boolean,
        Literal::Character(_) => Type::Character,
        Literal::String(_) => Type::String,
        Literal::Integer(_) => Type::Integer,
        Literal::Decimal(_) => Type::Decimal,
    }
}

/// Result type of `left operator right`, or `None` when the operands do not fit.
///
/// `Any` operands are only known at run time and are let through wherever a
/// concrete type could be.
pub fn binary_type(operator: BinaryOperator, left: &Type, right: &Type) -> Option<Type> {
    let is_any = |ty: &Type| *ty == Type::Any;
    let is_numeric = |ty: &Type| matches!(ty, Type::Integer | Type::Decimal | Type::Any);

    match operator {
        BinaryOperator::And | BinaryOperator::Or => {
            let logical = accepts(&Type::Boolean, left) && accepts(&Type::Boolean, right);
            logical.then_some(Type::Boolean)
        }
        BinaryOperator::Equal | BinaryOperator::NotEqual => Some(Type::Boolean),
        BinaryOperator::Less
        | BinaryOperator::LessEqual
        | BinaryOperator::Greater
        | BinaryOperator::GreaterEqual => {
            let ordered = if is_any(left) || is_any(right) {
                (is_any(left) || left.is_comparable()) && (is_any(right) || right.is_comparable())
            } else {
                left.is_comparable() && left == right
            };
            ordered.then_some(Type::Boolean)
        }
        BinaryOperator::Add if *left == Type::String || *right == Type::String => {
            Some(Type::String)
        }
        BinaryOperator::Add
        | BinaryOperator::Subtract
        | BinaryOperator::Multiply
        | BinaryOperator::Divide => match (left, right) {
            (Type::Integer, Type::Integer) => Some(Type::Integer),
            (Type::Decimal, Type::Decimal) => Some(Type::Decimal),
            (left, right)
                if (is_any(left) || is_any(right)) && is_numeric(left) && is_numeric(right) =>
            {
                Some(Type::Any)
            }
            _ => None,
        },
        BinaryOperator::Power => {
            let integral = |ty: &Type| matches!(ty, Type::Integer | Type::Any);
            (integral(left) && integral(right)).then_some(Type::Integer)
        }
    }
}
