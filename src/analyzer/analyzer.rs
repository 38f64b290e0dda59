//! Main analyzer module.
//!
//! The analyzer walks a parsed `Source`, resolves every name against a chain
//! of scopes and writes the resolved `Type` and binding into the tree. It
//! stops at the first violation.

use crate::{
    ast::{
        ast::{Function, FunctionBinding, Global, Source, VariableBinding},
        expressions::{Expr, ExprKind},
        types::{is_assignable, Type},
    },
    errors::errors::{Error, ErrorImpl},
    scope::{ScopeId, Scopes},
    Position,
};

use super::{expr::analyze_expression, stmt::analyze_statements};

/// Static analysis state.
///
/// Holds the analyzer's own scope arena, the scope currently being checked
/// and the return type of the function whose body is being checked.
pub struct Analyzer {
    pub scopes: Scopes<VariableBinding, FunctionBinding>,
    pub current_scope: ScopeId,
    pub return_type: Type,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer {
    /// Creates an analyzer whose top-level scope holds the built-in functions.
    pub fn new() -> Self {
        let scopes = Scopes::with_functions(
            builtin_functions()
                .into_iter()
                .map(|binding| ((binding.name.clone(), binding.arity()), binding)),
        );
        let root = scopes.root();

        Analyzer {
            scopes,
            current_scope: root,
            return_type: Type::Nil,
        }
    }

    /// Opens a child of the current scope and makes it current.
    pub fn enter_scope(&mut self) -> ScopeId {
        self.current_scope = self.scopes.push(self.current_scope);
        self.current_scope
    }

    /// Closes `scope`, returning to its parent.
    pub fn exit_scope(&mut self, scope: ScopeId) {
        self.current_scope = self.scopes.parent(scope).unwrap_or(self.scopes.root());
        self.scopes.release(scope);
    }

    pub fn resolve_type(&self, name: &str, position: &Position) -> Result<Type, Error> {
        Type::from_name(name).ok_or_else(|| {
            Error::new(
                ErrorImpl::UnknownType {
                    type_: name.to_string(),
                },
                position.clone(),
            )
        })
    }

    /// Analyzes a whole source: globals, then function signatures, then bodies.
    ///
    /// Every signature is registered before any body is checked, so functions
    /// may call themselves and each other regardless of order. Running this
    /// twice over the same tree leaves every annotation unchanged.
    pub fn analyze_source(&mut self, source: &mut Source) -> Result<(), Error> {
        for global in source.globals.iter_mut() {
            self.analyze_global(global)?;
        }

        for function in source.functions.iter_mut() {
            self.declare_function(function)?;
        }

        for function in source.functions.iter_mut() {
            self.analyze_function(function)?;
        }

        let root = self.scopes.root();
        match self.scopes.lookup_function(root, "main", 0) {
            None => Err(Error::unpositioned(ErrorImpl::MissingMain)),
            Some(main) if main.return_type != Type::Integer => {
                let position = source
                    .functions
                    .iter()
                    .find(|function| function.name == "main" && function.arity() == 0)
                    .map(|function| function.span.start.clone())
                    .unwrap_or_else(Position::null);
                Err(Error::new(
                    ErrorImpl::InvalidMainReturn {
                        received: main.return_type.name(),
                    },
                    position,
                ))
            }
            Some(_) => Ok(()),
        }
    }

    fn analyze_global(&mut self, global: &mut Global) -> Result<(), Error> {
        let declared = self.resolve_type(&global.type_name, &global.span.start)?;

        let ty = match global.initializer.as_mut() {
            // `LIST name: T = [...]` declares a `List<T>` whose elements must all fit `T`.
            Some(initializer) if matches!(initializer.kind, ExprKind::List(_)) => {
                analyze_expression(self, initializer)?;
                if let ExprKind::List(elements) = &initializer.kind {
                    for element in elements {
                        check_assignable(&declared, element)?;
                    }
                }

                let ty = Type::list_of(declared);
                initializer.ty = Some(ty.clone());
                ty
            }
            Some(initializer) => {
                analyze_expression(self, initializer)?;
                check_assignable(&declared, initializer)?;
                declared
            }
            None => declared,
        };

        let binding = VariableBinding {
            name: global.name.clone(),
            ty,
            mutable: global.mutable,
        };

        let root = self.scopes.root();
        let defined = self.scopes.lookup_variable(root, &global.name);
        if global.variable.is_none() || defined != global.variable.as_ref() {
            self.scopes
                .define_variable(root, &global.name, binding.clone(), global.span.start.clone())?;
        }
        global.variable = Some(binding);

        Ok(())
    }

    fn declare_function(&mut self, function: &mut Function) -> Result<(), Error> {
        let parameter_types = function
            .parameter_type_names
            .iter()
            .map(|name| self.resolve_type(name, &function.span.start))
            .collect::<Result<Vec<Type>, Error>>()?;

        let return_type = match &function.return_type_name {
            Some(name) => self.resolve_type(name, &function.span.start)?,
            None => Type::Nil,
        };

        let binding = FunctionBinding {
            name: function.name.clone(),
            parameter_types,
            return_type,
        };

        let root = self.scopes.root();
        let arity = function.arity();
        let defined = self.scopes.lookup_function(root, &function.name, arity);
        if function.function.is_none() || defined != function.function.as_ref() {
            self.scopes.define_function(
                root,
                &function.name,
                arity,
                binding.clone(),
                function.span.start.clone(),
            )?;
        }
        function.function = Some(binding);

        Ok(())
    }

    fn analyze_function(&mut self, function: &mut Function) -> Result<(), Error> {
        self.return_type = function
            .function
            .as_ref()
            .map(|binding| binding.return_type.clone())
            .unwrap_or(Type::Nil);

        let scope = self.enter_scope();
        let result = self
            .define_parameters(scope, function)
            .and_then(|_| analyze_statements(self, &mut function.body));
        self.exit_scope(scope);

        result
    }

    /// Parameters are visible in the body as mutable `Any` variables.
    fn define_parameters(&mut self, scope: ScopeId, function: &Function) -> Result<(), Error> {
        for parameter in &function.parameters {
            let binding = VariableBinding {
                name: parameter.clone(),
                ty: Type::Any,
                mutable: true,
            };
            self.scopes.define_variable(scope, parameter, binding, function.span.start.clone())?;
        }

        Ok(())
    }
}

/// Signatures of the functions every program can call without declaring them.
pub fn builtin_functions() -> Vec<FunctionBinding> {
    vec![FunctionBinding {
        name: String::from("print"),
        parameter_types: vec![Type::Any],
        return_type: Type::Nil,
    }]
}

/// Whether a value statically typed `value` is accepted where `target` is expected.
///
/// An `Any` value is only known at run time, so it is accepted here; the
/// interpreter checks it against `target` when it is stored, passed or returned.
pub fn accepts(target: &Type, value: &Type) -> bool {
    *value == Type::Any || is_assignable(target, value)
}

/// Fails with a `TypeMatchError` at `expr` unless its type is accepted by `target`.
pub fn check_assignable(target: &Type, expr: &Expr) -> Result<(), Error> {
    let received = expr.ty.clone().unwrap_or(Type::Any);
    if accepts(target, &received) {
        Ok(())
    } else {
        Err(Error::new(
            ErrorImpl::TypeMatchError {
                expected: target.name(),
                received: received.name(),
            },
            expr.span.start.clone(),
        ))
    }
}

/// Analyzes `source` in place with a fresh top-level scope.
pub fn analyze(source: &mut Source) -> Result<(), Error> {
    let mut analyzer = Analyzer::new();
    analyzer.analyze_source(source)
}
