//! Main interpreter module.
//!
//! The interpreter walks an analyzed `Source` directly. It keeps its own
//! scope arena, separate from the analyzer's, and writes `print` output to a
//! sink chosen by the caller.

use std::{
    io::{self, Stdout, Write},
    rc::Rc,
};

use crate::{
    ast::{
        ast::{Function, Source},
        types::Type,
    },
    errors::errors::{Error, ErrorImpl},
    scope::{ScopeId, Scopes},
    Position,
};

use super::{
    expr::{check_deferred, evaluate_expression},
    stdlib::{get_native_funcs, NativeFn},
    stmt::{execute_statements, Flow},
    value::Value,
};

/// A runtime variable cell.
#[derive(Debug, Clone)]
pub struct Variable {
    pub value: Value,
    pub mutable: bool,
}

/// Something a call can resolve to.
#[derive(Debug, Clone)]
pub enum Callable {
    Native(Rc<NativeFn>),
    /// A source function together with the scope it was defined in.
    Declared {
        declaration: Rc<Function>,
        closure: ScopeId,
    },
}

pub struct Interpreter<W: Write> {
    pub scopes: Scopes<Variable, Callable>,
    pub current_scope: ScopeId,
    /// Declared return type of the function being executed, when known.
    pub return_type: Option<Type>,
    output: W,
}

impl Interpreter<Stdout> {
    /// Creates an interpreter printing to standard output.
    pub fn new() -> Self {
        Interpreter::with_output(io::stdout())
    }
}

impl Default for Interpreter<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter printing to `output`, with the native functions defined.
    pub fn with_output(output: W) -> Self {
        let scopes = Scopes::with_functions(get_native_funcs().into_iter().map(|native| {
            let key = (native.name.clone(), native.arity);
            (key, Callable::Native(Rc::new(native)))
        }));
        let root = scopes.root();

        Interpreter {
            scopes,
            current_scope: root,
            return_type: None,
            output,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Defines a top-level variable before a source is evaluated.
    pub fn define_global(&mut self, name: &str, value: Value, mutable: bool) -> Result<(), Error> {
        let root = self.scopes.root();
        self.scopes
            .define_variable(root, name, Variable { value, mutable }, Position::null())
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

    /// Evaluates globals, defines every function and returns the result of `main/0`.
    pub fn evaluate_source(&mut self, source: &Source) -> Result<Value, Error> {
        let root = self.scopes.root();

        for global in &source.globals {
            let value = match &global.initializer {
                Some(initializer) => {
                    let value = evaluate_expression(self, initializer)?;
                    let declared = global.variable.as_ref().map(|binding| &binding.ty);
                    check_deferred(initializer, declared, &value)?;
                    value
                }
                None => Value::Nil,
            };

            self.scopes.define_variable(
                root,
                &global.name,
                Variable {
                    value,
                    mutable: true,
                },
                global.span.start.clone(),
            )?;
        }

        for function in &source.functions {
            let callable = Callable::Declared {
                declaration: Rc::new(function.clone()),
                closure: root,
            };
            self.scopes.define_function(
                root,
                &function.name,
                function.arity(),
                callable,
                function.span.start.clone(),
            )?;
        }

        self.call_function("main", Vec::new(), None)
    }

    /// Calls `name` with `arguments`, resolving it from the current scope.
    ///
    /// A declared function runs in a fresh scope whose parent is the scope
    /// it was defined in, not the caller's.
    pub fn call_function(
        &mut self,
        name: &str,
        arguments: Vec<Value>,
        position: Option<&Position>,
    ) -> Result<Value, Error> {
        let callable = self
            .scopes
            .lookup_function(self.current_scope, name, arguments.len())
            .cloned()
            .ok_or_else(|| {
                let error = ErrorImpl::UndefinedFunction {
                    function: name.to_string(),
                    arity: arguments.len(),
                };
                match position {
                    Some(position) => Error::new(error, position.clone()),
                    None => Error::unpositioned(error),
                }
            })?;

        match callable {
            Callable::Native(native) => {
                let result = native.execute(&mut self.output, arguments);
                match position {
                    Some(position) => result.map_err(|error| error.with_position(position)),
                    None => result,
                }
            }
            Callable::Declared {
                declaration,
                closure,
            } => {
                let caller_scope = self.current_scope;
                let return_type = declaration
                    .function
                    .as_ref()
                    .map(|binding| binding.return_type.clone());
                let caller_return_type = std::mem::replace(&mut self.return_type, return_type);
                self.current_scope = closure;
                let scope = self.enter_scope();

                let result = self
                    .bind_parameters(scope, &declaration, arguments)
                    .and_then(|_| execute_statements(self, &declaration.body));

                self.scopes.release(scope);
                self.current_scope = caller_scope;
                self.return_type = caller_return_type;

                match result? {
                    Flow::Return(value) => Ok(value),
                    Flow::Next => Ok(Value::Nil),
                }
            }
        }
    }

    fn bind_parameters(
        &mut self,
        scope: ScopeId,
        function: &Function,
        arguments: Vec<Value>,
    ) -> Result<(), Error> {
        for (parameter, value) in function.parameters.iter().zip(arguments) {
            self.scopes.define_variable(
                scope,
                parameter,
                Variable {
                    value,
                    mutable: true,
                },
                function.span.start.clone(),
            )?;
        }

        Ok(())
    }
}

/// Evaluates `source` with a fresh interpreter printing to standard output.
pub fn evaluate(source: &Source) -> Result<Value, Error> {
    let mut interpreter = Interpreter::new();
    interpreter.evaluate_source(source)
}
