//! Host facade: load programs and compositions, then run them.
//!
//! An [`Engine`] owns the shared registries and hands out interpreters over
//! them. It is `Send + Sync`; interpreters are not, so each thread builds its
//! own with [`Engine::interpreter`].

use fable_compose::Composition;
use fable_ir::Program;
use fable_value::{undefined_program, EvalError, EvalResult, Value};

use crate::console::SharedConsole;
use crate::eval_mode::EvalMode;
use crate::globals::Globals;
use crate::host_calls::HostCallRegistry;
use crate::interpreter::Interpreter;
use crate::library::Library;
use crate::shared::SharedMutableRegistry;

/// Builder for [`Engine`].
#[derive(Default)]
#[must_use]
pub struct EngineBuilder {
    mode: EvalMode,
    console: Option<SharedConsole>,
    host_calls: Option<HostCallRegistry>,
    max_call_depth: Option<Option<usize>>,
}

impl EngineBuilder {
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn console(mut self, console: SharedConsole) -> Self {
        self.console = Some(console);
        self
    }

    /// Start from `host_calls` instead of the built-in primitives.
    pub fn host_calls(mut self, host_calls: HostCallRegistry) -> Self {
        self.host_calls = Some(host_calls);
        self
    }

    /// Override the mode's call-depth limit. `None` means unbounded.
    pub fn max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = Some(limit);
        self
    }

    pub fn build(self) -> Engine {
        let console = self.console.unwrap_or_else(|| self.mode.default_console());
        Engine {
            globals: SharedMutableRegistry::default(),
            host_calls: SharedMutableRegistry::new(
                self.host_calls.unwrap_or_else(HostCallRegistry::with_builtins),
            ),
            library: SharedMutableRegistry::default(),
            console,
            mode: self.mode,
            max_call_depth: self.max_call_depth,
        }
    }
}

/// Loaded programs, compositions, and the registries they populate.
#[derive(Clone, Debug)]
pub struct Engine {
    globals: SharedMutableRegistry<Globals>,
    host_calls: SharedMutableRegistry<HostCallRegistry>,
    library: SharedMutableRegistry<Library>,
    console: SharedConsole,
    mode: EvalMode,
    max_call_depth: Option<Option<usize>>,
}

impl Engine {
    /// An engine in the default mode with the built-in host calls.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn mode(&self) -> EvalMode {
        self.mode
    }

    pub fn console(&self) -> SharedConsole {
        SharedConsole::clone(&self.console)
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

    /// Add a program to the library and register its global functions and
    /// object types, making them visible to every program.
    pub fn load_program(&self, program: Program) -> Result<(), EvalError> {
        self.globals.write().register_program(&program)?;
        let name = program.name.clone();
        if self.library.write().add_program(program).is_some() {
            tracing::warn!(program = %name, "program replaced");
        }
        Ok(())
    }

    pub fn load_composition(&self, composition: Composition) {
        let name = composition.name.clone();
        if self.library.write().add_composition(composition).is_some() {
            tracing::warn!(composition = %name, "composition replaced");
        }
    }

    /// Register or replace a host call.
    pub fn register_host_call<F>(&self, name: impl Into<String>, call: F)
    where
        F: Fn(&mut Interpreter, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        self.host_calls.write().register(name, call);
    }

    /// A fresh interpreter over this engine's registries.
    pub fn interpreter(&self) -> Interpreter {
        let builder = Interpreter::builder()
            .mode(self.mode)
            .console(self.console())
            .globals(self.globals.clone())
            .host_calls(self.host_calls.clone())
            .library(self.library.clone());
        let builder = match self.max_call_depth {
            Some(limit) => builder.max_call_depth(limit),
            None => builder,
        };
        builder.build()
    }

    /// Run the loaded program `name` in a fresh interpreter.
    pub fn run(&self, name: &str) -> EvalResult {
        let program = self
            .library
            .read()
            .program(name)
            .ok_or_else(|| undefined_program(name))?;
        self.interpreter().run_program(&program)
    }

    /// Register the declarations of `program` and run it without adding it
    /// to the library.
    pub fn run_program(&self, program: &Program) -> EvalResult {
        self.globals.write().register_program(program)?;
        self.interpreter().run_program(program)
    }

    /// Forget every program, composition, global function, and user object
    /// type. Host calls are kept.
    pub fn reload(&self) {
        self.library.write().clear();
        self.globals.write().clear();
        tracing::debug!("engine reloaded");
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
