//! Environment for variable and function scoping.
//!
//! A chain of scopes, innermost last. The root scope is created with the
//! environment; every program run pushes exactly one top-level scope under it
//! and every block, call, and method pushes one more. Lookups walk the chain
//! outward. Function lookups fall back to the shared [`Globals`] registry
//! after the root.

use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

use fable_ir::FunctionDecl;
use fable_value::Value;
use rustc_hash::FxHashMap;

use crate::globals::Globals;
use crate::shared::SharedMutableRegistry;

/// A single-threaded, shared, interior-mutable scope handle.
///
/// Child scopes hold their parent through this handle so a scope stays alive
/// for as long as anything below it does.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Variable and function bindings of one scope.
#[derive(Debug, Default)]
pub struct Scope {
    variables: FxHashMap<String, Value>,
    functions: FxHashMap<String, Arc<FunctionDecl>>,
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            parent: Some(parent),
            ..Self::default()
        }
    }

    /// Bind `name` locally. Returns `true` if a local binding was shadowed.
    pub fn declare(&mut self, name: &str, value: Value) -> bool {
        self.variables.insert(name.to_string(), value).is_some()
    }

    pub fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.variables.get(name) {
            return Some(value.clone());
        }
        self.parent.as_ref()?.borrow().lookup(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
            || self
                .parent
                .as_ref()
                .is_some_and(|parent| parent.borrow().contains(name))
    }

    /// Overwrite the nearest binding of `name`. Returns `false` if none exists.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.variables.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.parent {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }

    pub fn declare_function(&mut self, decl: Arc<FunctionDecl>) {
        self.functions.insert(decl.name.clone(), decl);
    }

    pub fn lookup_function(&self, name: &str) -> Option<Arc<FunctionDecl>> {
        if let Some(decl) = self.functions.get(name) {
            return Some(Arc::clone(decl));
        }
        self.parent.as_ref()?.borrow().lookup_function(name)
    }

    /// Copy every visible variable into `out`, inner bindings last so they win.
    fn collect_into(&self, out: &mut FxHashMap<String, Value>) {
        if let Some(parent) = &self.parent {
            parent.borrow().collect_into(out);
        }
        for (name, value) in &self.variables {
            out.insert(name.clone(), value.clone());
        }
    }
}

/// Environment for one interpreter, using a scope stack.
pub struct Environment {
    /// Stack of scopes, current scope last. Never empty.
    scopes: Vec<LocalScope<Scope>>,
    /// Root scope, always at the bottom.
    root: LocalScope<Scope>,
    globals: SharedMutableRegistry<Globals>,
}

impl Environment {
    pub fn new(globals: SharedMutableRegistry<Globals>) -> Self {
        let root = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![root.clone()],
            root,
            globals,
        }
    }

    /// Number of scopes on the stack, root included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn globals(&self) -> &SharedMutableRegistry<Globals> {
        &self.globals
    }

    /// Push a child of the current scope.
    #[inline]
    pub fn push_scope(&mut self) {
        let parent = self.current_scope();
        self.scopes.push(LocalScope::new(Scope::with_parent(parent)));
    }

    /// Pop the current scope. The root is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    #[inline]
    fn current_scope(&self) -> LocalScope<Scope> {
        self.scopes.last().unwrap_or(&self.root).clone()
    }

    /// Declare `name` in the current scope, shadowing any local binding.
    pub fn declare(&mut self, name: &str, value: Value) {
        let shadowed = self.current_scope().borrow_mut().declare(name, value);
        if shadowed {
            tracing::warn!(variable = name, depth = self.depth(), "variable shadowed by new declaration");
        }
    }

    /// Look up a variable through the scope chain.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.current_scope().borrow().lookup(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.current_scope().borrow().contains(name)
    }

    /// Assign to the nearest scope declaring `name`, or declare it locally.
    pub fn set(&mut self, name: &str, value: Value) {
        let scope = self.current_scope();
        let mut scope = scope.borrow_mut();
        if scope.contains(name) {
            scope.assign(name, value);
        } else {
            scope.declare(name, value);
        }
    }

    /// Declare a function in the current scope.
    pub fn declare_function(&mut self, decl: Arc<FunctionDecl>) {
        self.current_scope().borrow_mut().declare_function(decl);
    }

    /// Resolve a function through the scope chain, then the globals.
    pub fn get_function(&self, name: &str) -> Option<Arc<FunctionDecl>> {
        self.current_scope()
            .borrow()
            .lookup_function(name)
            .or_else(|| self.globals.read().function(name))
    }

    /// Every visible variable, inner bindings shadowing outer ones.
    pub fn snapshot(&self) -> FxHashMap<String, Value> {
        let mut out = FxHashMap::default();
        self.current_scope().borrow().collect_into(&mut out);
        out
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.scopes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
