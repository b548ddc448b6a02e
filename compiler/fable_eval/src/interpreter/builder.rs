//! `InterpreterBuilder` for creating interpreters over shared or fresh registries.

use super::Interpreter;
use crate::console::SharedConsole;
use crate::environment::Environment;
use crate::eval_mode::EvalMode;
use crate::globals::Globals;
use crate::host_calls::HostCallRegistry;
use crate::library::Library;
use crate::shared::SharedMutableRegistry;
use crate::stack::CallDepth;

/// Builder for [`Interpreter`].
///
/// Registries left unset are created fresh; the host-call registry then
/// starts with the built-in primitives. The console defaults to the mode's.
#[derive(Default)]
pub struct InterpreterBuilder {
    mode: EvalMode,
    console: Option<SharedConsole>,
    globals: Option<SharedMutableRegistry<Globals>>,
    host_calls: Option<SharedMutableRegistry<HostCallRegistry>>,
    library: Option<SharedMutableRegistry<Library>>,
    max_call_depth: Option<Option<usize>>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the evaluation mode.
    ///
    /// Controls the default console and the call-depth limit.
    #[must_use]
    pub fn mode(mut self, mode: EvalMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the display collaborator. Overrides the mode-based default.
    #[must_use]
    pub fn console(mut self, console: SharedConsole) -> Self {
        self.console = Some(console);
        self
    }

    #[must_use]
    pub fn globals(mut self, globals: SharedMutableRegistry<Globals>) -> Self {
        self.globals = Some(globals);
        self
    }

    #[must_use]
    pub fn host_calls(mut self, host_calls: SharedMutableRegistry<HostCallRegistry>) -> Self {
        self.host_calls = Some(host_calls);
        self
    }

    #[must_use]
    pub fn library(mut self, library: SharedMutableRegistry<Library>) -> Self {
        self.library = Some(library);
        self
    }

    /// Override the mode's call-depth limit. `None` means unbounded.
    #[must_use]
    pub fn max_call_depth(mut self, limit: Option<usize>) -> Self {
        self.max_call_depth = Some(limit);
        self
    }

    pub fn build(self) -> Interpreter {
        let globals = self.globals.unwrap_or_default();
        let host_calls = self
            .host_calls
            .unwrap_or_else(|| SharedMutableRegistry::new(HostCallRegistry::with_builtins()));
        let console = self.console.unwrap_or_else(|| self.mode.default_console());
        let limit = self
            .max_call_depth
            .unwrap_or_else(|| self.mode.max_call_depth());
        Interpreter {
            env: Environment::new(globals.clone()),
            globals,
            host_calls,
            library: self.library.unwrap_or_default(),
            console,
            mode: self.mode,
            call_depth: CallDepth::new(limit),
        }
    }
}
