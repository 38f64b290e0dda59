use std::{cmp::Ordering, fmt::Display, rc::Rc};

use rust_decimal::Decimal;

use crate::ast::{expressions::Literal, types::Type};

/// A runtime value.
///
/// Lists share their backing vector until one of the holders writes to it,
/// at which point the writer gets its own copy.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    Character(char),
    String(String),
    List(Rc<Vec<Value>>),
}

impl Value {
    pub fn list(values: Vec<Value>) -> Value {
        Value::List(Rc::new(values))
    }

    /// Name of the runtime type, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Boolean(_) => "Boolean",
            Value::Integer(_) => "Integer",
            Value::Decimal(_) => "Decimal",
            Value::Character(_) => "Character",
            Value::String(_) => "String",
            Value::List(_) => "List",
        }
    }

    /// Whether this value may be stored where `ty` is expected.
    ///
    /// Follows the static assignability rules: `NIL` only fits `Any` and a
    /// list fits `List<T>` when every element fits `T`.
    pub fn fits(&self, ty: &Type) -> bool {
        match (ty, self) {
            (Type::Any, _) => true,
            (_, Value::Nil) => false,
            (Type::Comparable, value) => value.compare(value).is_some(),
            (Type::Boolean, Value::Boolean(_))
            | (Type::Integer, Value::Integer(_))
            | (Type::Decimal, Value::Decimal(_))
            | (Type::Character, Value::Character(_))
            | (Type::String, Value::String(_)) => true,
            (Type::List(element), Value::List(values)) => {
                values.iter().all(|value| value.fits(element))
            }
            _ => false,
        }
    }

    /// Orders two values of the same comparable kind.
    ///
    /// Returns `None` for booleans, `NIL`, lists and mixed kinds.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => Some(a.cmp(b)),
            (Value::Decimal(a), Value::Decimal(b)) => Some(a.cmp(b)),
            (Value::Character(a), Value::Character(b)) => Some(a.cmp(b)),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self {
        match literal {
            Literal::Nil => Value::Nil,
            Literal::Boolean(value) => Value::Boolean(*value),
            Literal::Character(value) => Value::Character(*value),
            Literal::String(value) => Value::String(value.clone()),
            Literal::Integer(value) => Value::Integer(*value),
            Literal::Decimal(value) => Value::Decimal(*value),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "NIL"),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::Decimal(value) => write!(f, "{}", value),
            Value::Character(value) => write!(f, "{}", value),
            Value::String(value) => write!(f, "{}", value),
            Value::List(values) => {
                write!(f, "[")?;
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{cmp::Ordering, rc::Rc};

    use rust_decimal::Decimal;

    use super::Value;
    use crate::ast::types::Type;

    #[test]
    fn test_display() {
        assert_eq!(Value::Nil.to_string(), "NIL");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Decimal(Decimal::new(150, 2)).to_string(), "1.50");
        assert_eq!(Value::Character('c').to_string(), "c");
        assert_eq!(
            Value::list(vec![Value::Integer(1), Value::String("two".to_string())]).to_string(),
            "[1, two]"
        );
    }

    #[test]
    fn test_value_equality() {
        assert_eq!(Value::String("a".to_string()), Value::String("a".to_string()));
        assert_ne!(Value::Integer(1), Value::Decimal(Decimal::ONE));
        assert_eq!(
            Value::list(vec![Value::Integer(1)]),
            Value::List(Rc::new(vec![Value::Integer(1)]))
        );
    }

    #[test]
    fn test_compare() {
        assert_eq!(Value::Integer(1).compare(&Value::Integer(2)), Some(Ordering::Less));
        assert_eq!(
            Value::String("b".to_string()).compare(&Value::String("a".to_string())),
            Some(Ordering::Greater)
        );
        assert_eq!(Value::Integer(1).compare(&Value::Decimal(Decimal::ONE)), None);
        assert_eq!(Value::Boolean(true).compare(&Value::Boolean(false)), None);
    }

    #[test]
    fn test_fits() {
        assert!(Value::Integer(1).fits(&Type::Integer));
        assert!(Value::Integer(1).fits(&Type::Comparable));
        assert!(!Value::Integer(1).fits(&Type::String));
        assert!(!Value::Boolean(true).fits(&Type::Comparable));
        assert!(Value::Nil.fits(&Type::Any));
        assert!(!Value::Nil.fits(&Type::Integer));

        let integers = Value::list(vec![Value::Integer(1), Value::Integer(2)]);
        assert!(integers.fits(&Type::list_of(Type::Integer)));
        assert!(!integers.fits(&Type::list_of(Type::String)));
        assert!(!Value::list(vec![Value::Nil]).fits(&Type::list_of(Type::Integer)));
    }
}
