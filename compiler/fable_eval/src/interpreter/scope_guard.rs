//! RAII scope guard over the interpreter's environment.
//!
//! [`ScopedInterpreter`] pushes a scope on creation and pops it on drop, so an
//! early `?` return or a panic never leaves a stale scope on the stack. It
//! derefs to the interpreter, which keeps the whole `&mut Interpreter` API
//! available while the scope is open.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// Guard that owns one pushed scope for its lifetime.
pub struct ScopedInterpreter<'guard> {
    interpreter: &'guard mut Interpreter,
}

impl Drop for ScopedInterpreter<'_> {
    fn drop(&mut self) {
        self.interpreter.env.pop_scope();
    }
}

impl Deref for ScopedInterpreter<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for ScopedInterpreter<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Interpreter {
    /// Push a child scope, popped when the returned guard drops.
    pub fn scoped(&mut self) -> ScopedInterpreter<'_> {
        self.env.push_scope();
        ScopedInterpreter { interpreter: self }
    }

    /// Run `f` inside a child scope.
    pub fn with_env_scope<T>(&mut self, f: impl FnOnce(&mut Interpreter) -> T) -> T {
        let mut scoped = self.scoped();
        f(&mut scoped)
    }
}
