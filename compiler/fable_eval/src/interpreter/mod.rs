//! Tree-walking interpreter for Fable programs.
//!
//! An [`Interpreter`] owns everything one run mutates: the scope chain, the
//! call depth, and nothing else. Globals, host calls, and the library are
//! shared registries; several interpreters built from the same engine may
//! run side by side, each with its own execution state.
//!
//! Statement execution never unwinds for control flow. Each statement yields
//! a [`Flow`]: carry on, jump to a label in the current list, or leave the
//! list with an [`Exit`]. Errors are the only thing propagated with `?`.

mod builder;
mod display;
mod eval_expr;
mod exec_stmt;
mod function_call;
mod method_dispatch;
mod scope_guard;

pub use builder::InterpreterBuilder;
pub use scope_guard::ScopedInterpreter;

use fable_ir::Program;
use fable_value::{EvalResult, Value};

use crate::console::SharedConsole;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::globals::Globals;
use crate::host_calls::HostCallRegistry;
use crate::library::Library;
use crate::shared::SharedMutableRegistry;
use crate::stack::CallDepth;

/// Maximum number of jumps taken during one walk of a statement list.
pub const MAX_JUMP_COUNT: usize = 1000;

/// Why a statement list stopped before its end.
#[derive(Clone, Debug, PartialEq)]
pub enum Exit {
    /// `return` or `terminate`, carrying the returned value.
    Return(Value),
    Break,
    Continue,
}

/// Outcome of executing one statement.
#[derive(Clone, Debug, PartialEq)]
pub enum Flow<'s> {
    /// Proceed with the next statement.
    Next,
    /// Resume at the label with this id in the current list.
    Jump(&'s str),
    /// Leave the current list.
    Exit(Exit),
}

/// Interpreter state for one run.
pub struct Interpreter {
    pub(crate) env: Environment,
    globals: SharedMutableRegistry<Globals>,
    host_calls: SharedMutableRegistry<HostCallRegistry>,
    library: SharedMutableRegistry<Library>,
    console: SharedConsole,
    mode: EvalMode,
    call_depth: CallDepth,
}

impl Interpreter {
    /// An interpreter with fresh registries, built-in host calls, and the
    /// default mode.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn globals(&self) -> &SharedMutableRegistry<Globals> {
        &self.globals
    }

    pub fn host_calls(&self) -> &SharedMutableRegistry<HostCallRegistry> {
        &self.host_calls
    }

    pub fn library(&self) -> &SharedMutableRegistry<Library> {
        &self.library
    }

    /// Handle to the display collaborator.
    pub fn console(&self) -> SharedConsole {
        SharedConsole::clone(&self.console)
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    /// Current script call depth.
    pub fn call_depth(&self) -> usize {
        self.call_depth.depth()
    }

    /// Execute `program` under a fresh top-level scope.
    ///
    /// The program's declarations are not registered here; see
    /// [`Globals::register_program`]. A `return` or `terminate` ends the run
    /// with its value; falling off the end yields `Null`. Stray `break` and
    /// `continue` requests end the run as well.
    #[tracing::instrument(level = "debug", skip_all, fields(program = %program.name))]
    pub fn run_program(&mut self, program: &Program) -> EvalResult {
        let exit = self.exec_block(&program.statements)?;
        Ok(match exit {
            Some(Exit::Return(value)) => value.void_to_null(),
            Some(Exit::Break | Exit::Continue) | None => Value::Null,
        })
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("env", &self.env)
            .field("mode", &self.mode)
            .field("call_depth", &self.call_depth)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests;
