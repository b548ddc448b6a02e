//! Tree-walking interpreter for Fable narrative scripts.
//!
//! Programs arrive as fully built [`fable_ir::Program`] trees. An [`Engine`]
//! loads programs and text compositions into shared registries; each run
//! gets its own [`Interpreter`] holding the scope chain and call depth.
//!
//! # Architecture
//!
//! - [`Environment`]: scope chain; function lookups fall back to [`Globals`]
//! - [`Globals`]: global functions and object types, primitive pseudo-types included
//! - [`HostCallRegistry`]: host primitives reachable from `SystemCall` nodes
//! - [`Library`]: loaded programs and compositions
//! - [`ConsoleImpl`]: display collaborator for `Reference` statements and printing
//! - [`evaluate_binary`] / [`evaluate_unary`]: the value algebra

mod console;
mod engine;
mod environment;
mod eval_mode;
mod globals;
mod host_calls;
pub mod interpreter;
mod library;
mod operators;
mod shared;
mod stack;
mod unary_operators;

pub use console::{
    buffer_console, host_console, silent_console, stdout_console, BufferConsole, Console,
    ConsoleImpl, SharedConsole, StdoutConsole,
};
pub use engine::{Engine, EngineBuilder};
pub use environment::{Environment, LocalScope, Scope};
pub use eval_mode::EvalMode;
pub use globals::{to_string_method, Globals, PRIMITIVE_TYPES, TO_STRING};
pub use host_calls::{HostCallRegistry, HostFn, DEFAULT_INPUT_PROMPT};
pub use interpreter::{Exit, Flow, Interpreter, InterpreterBuilder, ScopedInterpreter, MAX_JUMP_COUNT};
pub use library::Library;
pub use operators::evaluate_binary;
pub use shared::SharedMutableRegistry;
pub use stack::{ensure_sufficient_stack, CallDepth};
pub use unary_operators::evaluate_unary;

pub use fable_value::{EvalError, EvalErrorKind, EvalResult, Value};
