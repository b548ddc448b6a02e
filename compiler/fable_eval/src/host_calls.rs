//! Host-call registry: primitives provided by the embedding application.
//!
//! Scripts reach these through `SystemCall` nodes. The registry is seeded with
//! the built-ins below and stays open for hosts to extend after loading.

use std::fmt;
use std::sync::Arc;

use fable_value::{arity_mismatch, host_io, script_error, type_mismatch, EvalResult, Value};
use rustc_hash::FxHashMap;

use crate::interpreter::Interpreter;

/// A host primitive. Receives the calling interpreter and evaluated arguments.
pub type HostFn = Arc<dyn Fn(&mut Interpreter, &[Value]) -> EvalResult + Send + Sync>;

/// Prompt shown by `wait_input` when the script supplies none.
pub const DEFAULT_INPUT_PROMPT: &str = "Press any key to continue...";

/// Name-to-function table of host primitives.
#[derive(Clone, Default)]
pub struct HostCallRegistry {
    calls: FxHashMap<String, HostFn>,
}

impl HostCallRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry seeded with the built-in primitives.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("except", except);
        registry.register("to_string", to_string);
        registry.register("print", print);
        registry.register("println", println);
        registry.register("printf", printf);
        registry.register("wait_input", wait_input);
        registry.register("exec_func", exec_func);
        registry
    }

    /// Register `call` under `name`, replacing any existing entry.
    pub fn register<F>(&mut self, name: impl Into<String>, call: F)
    where
        F: Fn(&mut Interpreter, &[Value]) -> EvalResult + Send + Sync + 'static,
    {
        let name = name.into();
        if self.calls.insert(name.clone(), Arc::new(call)).is_some() {
            tracing::debug!(host_call = %name, "host call replaced");
        }
    }

    /// Look up a host call. The handle is cloned so no lock is held while it runs.
    pub fn get(&self, name: &str) -> Option<HostFn> {
        self.calls.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.calls.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.calls.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for HostCallRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostCallRegistry")
            .field("calls", &self.names())
            .finish()
    }
}

fn join_display(args: &[Value]) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn except(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    Err(script_error(join_display(args)))
}

fn to_string(_: &mut Interpreter, args: &[Value]) -> EvalResult {
    match args {
        [value] => Ok(Value::string(value.to_string())),
        _ => Err(arity_mismatch("to_string", 1, args.len())),
    }
}

fn print(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.console().display(&join_display(args));
    Ok(Value::Null)
}

fn println(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    interpreter.console().display_line(&join_display(args));
    Ok(Value::Null)
}

fn printf(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let Some((format, rest)) = args.split_first() else {
        return Err(arity_mismatch("printf", 1, 0));
    };
    let text = format_args_into(&format.to_string(), rest);
    interpreter.console().display_line(&text);
    Ok(Value::Null)
}

/// Expand `%s` with successive arguments and `%%` with `%`.
///
/// A `%s` with no argument left is kept literally, as is any other `%` sequence.
fn format_args_into(format: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(format.len());
    let mut args = args.iter();
    let mut chars = format.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s') => {
                chars.next();
                match args.next() {
                    Some(arg) => out.push_str(&arg.to_string()),
                    None => out.push_str("%s"),
                }
            }
            _ => out.push('%'),
        }
    }
    out
}

fn wait_input(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let prompt = match args.first() {
        Some(prompt) => prompt.to_string(),
        None => DEFAULT_INPUT_PROMPT.to_string(),
    };
    let console = interpreter.console();
    console.display_line(&prompt);
    let line = console
        .wait_for_input("")
        .map_err(|e| host_io(e.to_string()))?;
    Ok(Value::string(line))
}

fn exec_func(interpreter: &mut Interpreter, args: &[Value]) -> EvalResult {
    let Some((name, rest)) = args.split_first() else {
        return Err(arity_mismatch("exec_func", 1, 0));
    };
    let Some(name) = name.as_str() else {
        return Err(type_mismatch("String", name.type_name()));
    };
    let name = name.to_string();
    interpreter.call_function_with_values(&name, rest.to_vec())
}
