//! Lexical scope chains.
//!
//! Scopes live in an arena and refer to their parent by index. The analyzer
//! and the interpreter each own a separate arena, so their chains never share
//! bindings. Scopes are pushed on block entry and released on exit, which
//! keeps the arena in stack order; a function closure only ever holds the id
//! of the top-level scope it was defined in, which outlives every block.

use std::collections::HashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

pub type ScopeId = usize;

#[derive(Debug)]
struct Environment<V, F> {
    parent: Option<ScopeId>,
    variables: HashMap<String, V>,
    functions: HashMap<(String, usize), F>,
}

impl<V, F> Environment<V, F> {
    fn new(parent: Option<ScopeId>) -> Self {
        Environment {
            parent,
            variables: HashMap::new(),
            functions: HashMap::new(),
        }
    }
}

/// Arena of parent-linked scopes holding variables of type `V` and functions of type `F`.
#[derive(Debug)]
pub struct Scopes<V, F> {
    environments: Vec<Environment<V, F>>,
}

impl<V, F> Default for Scopes<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, F> Scopes<V, F> {
    /// Creates an arena holding only the root scope.
    pub fn new() -> Self {
        Scopes {
            environments: vec![Environment::new(None)],
        }
    }

    /// Creates an arena whose root scope already holds `functions`, keyed by name and arity.
    pub fn with_functions(functions: impl IntoIterator<Item = ((String, usize), F)>) -> Self {
        let mut root = Environment::new(None);
        root.functions.extend(functions);

        Scopes {
            environments: vec![root],
        }
    }

    pub fn root(&self) -> ScopeId {
        0
    }

    /// Number of scopes currently open, the root included.
    pub fn depth(&self) -> usize {
        self.environments.len()
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.environments[scope].parent
    }

    /// Opens a new scope whose parent is `parent`.
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        self.environments.push(Environment::new(Some(parent)));
        self.environments.len() - 1
    }

    /// Releases `scope` together with every scope opened after it.
    pub fn release(&mut self, scope: ScopeId) {
        if scope > self.root() {
            self.environments.truncate(scope);
        }
    }

    pub fn define_variable(
        &mut self,
        scope: ScopeId,
        name: &str,
        variable: V,
        position: Position,
    ) -> Result<(), Error> {
        let variables = &mut self.environments[scope].variables;
        if variables.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::VariableAlreadyDeclared {
                    variable: name.to_string(),
                },
                position,
            ));
        }

        variables.insert(name.to_string(), variable);
        Ok(())
    }

    pub fn define_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        arity: usize,
        function: F,
        position: Position,
    ) -> Result<(), Error> {
        let key = (name.to_string(), arity);
        let functions = &mut self.environments[scope].functions;
        if functions.contains_key(&key) {
            return Err(Error::new(
                ErrorImpl::FunctionAlreadyDeclared {
                    function: name.to_string(),
                    arity,
                },
                position,
            ));
        }

        functions.insert(key, function);
        Ok(())
    }

    /// Walks outward from `scope` to the scope that defines `name`.
    fn owner_of_variable(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            if self.environments[id].variables.contains_key(name) {
                return Some(id);
            }
            current = self.environments[id].parent;
        }
        None
    }

    pub fn lookup_variable(&self, scope: ScopeId, name: &str) -> Option<&V> {
        let owner = self.owner_of_variable(scope, name)?;
        self.environments[owner].variables.get(name)
    }

    pub fn lookup_variable_mut(&mut self, scope: ScopeId, name: &str) -> Option<&mut V> {
        let owner = self.owner_of_variable(scope, name)?;
        self.environments[owner].variables.get_mut(name)
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str, arity: usize) -> Option<&F> {
        let key = (name.to_string(), arity);
        let mut current = Some(scope);
        while let Some(id) = current {
            if let Some(function) = self.environments[id].functions.get(&key) {
                return Some(function);
            }
            current = self.environments[id].parent;
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::Scopes;
    use crate::Position;

    #[test]
    fn test_lookup_walks_parents() {
        let mut scopes: Scopes<i32, ()> = Scopes::new();
        let root = scopes.root();
        scopes.define_variable(root, "x", 1, Position::null()).unwrap();

        let child = scopes.push(root);
        let grandchild = scopes.push(child);

        assert_eq!(scopes.lookup_variable(grandchild, "x"), Some(&1));
        assert_eq!(scopes.lookup_variable(grandchild, "y"), None);
    }

    #[test]
    fn test_shadowing_and_mutation_hit_owner() {
        let mut scopes: Scopes<i32, ()> = Scopes::new();
        let root = scopes.root();
        scopes.define_variable(root, "x", 1, Position::null()).unwrap();
        let child = scopes.push(root);

        *scopes.lookup_variable_mut(child, "x").unwrap() = 5;
        assert_eq!(scopes.lookup_variable(root, "x"), Some(&5));

        scopes.define_variable(child, "x", 9, Position::null()).unwrap();
        assert_eq!(scopes.lookup_variable(child, "x"), Some(&9));
        assert_eq!(scopes.lookup_variable(root, "x"), Some(&5));
    }

    #[test]
    fn test_redefinition_in_same_scope_fails() {
        let mut scopes: Scopes<i32, ()> = Scopes::new();
        let root = scopes.root();
        scopes.define_variable(root, "x", 1, Position::null()).unwrap();

        assert!(scopes.define_variable(root, "x", 2, Position::null()).is_err());
    }

    #[test]
    fn test_functions_keyed_by_arity() {
        let mut scopes: Scopes<(), &str> = Scopes::new();
        let root = scopes.root();
        scopes.define_function(root, "f", 0, "zero", Position::null()).unwrap();
        scopes.define_function(root, "f", 1, "one", Position::null()).unwrap();
        let child = scopes.push(root);

        assert_eq!(scopes.lookup_function(child, "f", 1), Some(&"one"));
        assert_eq!(scopes.lookup_function(child, "f", 2), None);
        assert!(scopes.define_function(root, "f", 0, "again", Position::null()).is_err());
    }

    #[test]
    fn test_release_discards_block_scopes() {
        let mut scopes: Scopes<i32, ()> = Scopes::new();
        let root = scopes.root();
        let child = scopes.push(root);
        scopes.push(child);

        scopes.release(child);
        assert_eq!(scopes.depth(), 1);

        scopes.release(root);
        assert_eq!(scopes.depth(), 1);
    }

    #[test]
    fn test_with_functions_fills_root() {
        let natives = vec![(("print".to_string(), 1), "native")];
        let scopes: Scopes<(), &str> = Scopes::with_functions(natives);

        assert_eq!(scopes.depth(), 1);
        assert_eq!(scopes.lookup_function(scopes.root(), "print", 1), Some(&"native"));
    }
}
