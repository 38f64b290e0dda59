//! Type system definitions.
//!
//! The language has a small fixed set of named types, two reference types
//! (`Any` and `Comparable`) and a structural `List<T>`. Types are identified
//! by name: two values with the same name are interchangeable.

use std::fmt::Display;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Nil,
    Boolean,
    Integer,
    Decimal,
    Character,
    String,
    Any,
    Comparable,
    List(Box<Type>),
}

impl Type {
    pub fn list_of(element: Type) -> Type {
        Type::List(Box::new(element))
    }

    /// Resolves a type name written in source.
    pub fn from_name(name: &str) -> Option<Type> {
        match name {
            "Nil" => Some(Type::Nil),
            "Boolean" => Some(Type::Boolean),
            "Integer" => Some(Type::Integer),
            "Decimal" => Some(Type::Decimal),
            "Character" => Some(Type::Character),
            "String" => Some(Type::String),
            "Any" => Some(Type::Any),
            "Comparable" => Some(Type::Comparable),
            _ => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            Type::Nil => String::from("Nil"),
            Type::Boolean => String::from("Boolean"),
            Type::Integer => String::from("Integer"),
            Type::Decimal => String::from("Decimal"),
            Type::Character => String::from("Character"),
            Type::String => String::from("String"),
            Type::Any => String::from("Any"),
            Type::Comparable => String::from("Comparable"),
            Type::List(element) => format!("List<{}>", element.name()),
        }
    }

    pub fn is_comparable(&self) -> bool {
        matches!(
            self,
            Type::Integer | Type::Decimal | Type::Character | Type::String
        )
    }

    /// Element type of a list, or `Any` for an `Any` receiver.
    pub fn element(&self) -> Option<Type> {
        match self {
            Type::List(element) => Some((**element).clone()),
            Type::Any => Some(Type::Any),
            _ => None,
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Whether a value of type `value` may be stored where `target` is expected.
///
/// `Nil` only fits `Any`; `Comparable` accepts the four ordered types; lists
/// compare their element types by the same rule; everything else needs equality.
pub fn is_assignable(target: &Type, value: &Type) -> bool {
    match (target, value) {
        (Type::Any, _) => true,
        (_, Type::Nil) => false,
        (Type::Comparable, value) => value.is_comparable(),
        (Type::List(target), Type::List(value)) => is_assignable(target, value),
        (target, value) => target == value,
    }
}

#[cfg(test)]
mod tests {
    use super::{is_assignable, Type};

    #[test]
    fn test_comparable_lattice() {
        assert!(is_assignable(&Type::Comparable, &Type::Integer));
        assert!(is_assignable(&Type::Comparable, &Type::Decimal));
        assert!(is_assignable(&Type::Comparable, &Type::Character));
        assert!(is_assignable(&Type::Comparable, &Type::String));
        assert!(!is_assignable(&Type::Comparable, &Type::Boolean));
        assert!(!is_assignable(&Type::Comparable, &Type::Nil));
    }

    #[test]
    fn test_nil_only_fits_any() {
        assert!(is_assignable(&Type::Any, &Type::Nil));
        assert!(!is_assignable(&Type::Integer, &Type::Nil));
        assert!(!is_assignable(&Type::Nil, &Type::Nil));
    }

    #[test]
    fn test_exact_and_any() {
        assert!(is_assignable(&Type::Integer, &Type::Integer));
        assert!(!is_assignable(&Type::Integer, &Type::Decimal));
        assert!(is_assignable(&Type::Any, &Type::list_of(Type::String)));
        assert!(!is_assignable(&Type::String, &Type::Any));
    }

    #[test]
    fn test_list_types() {
        let integers = Type::list_of(Type::Integer);

        assert!(is_assignable(&integers, &Type::list_of(Type::Integer)));
        assert!(!is_assignable(&integers, &Type::list_of(Type::String)));
        assert!(is_assignable(&Type::list_of(Type::Any), &integers));
        assert_eq!(integers.name(), "List<Integer>");
        assert_eq!(integers.element(), Some(Type::Integer));
    }

    #[test]
    fn test_names_round_trip() {
        let names = [
            "Nil", "Boolean", "Integer", "Decimal", "Character", "String", "Any", "Comparable",
        ];
        for name in names {
            assert_eq!(Type::from_name(name).unwrap().name(), name);
        }
        assert!(Type::from_name("Float").is_none());
    }
}
