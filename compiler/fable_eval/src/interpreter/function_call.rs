//! Script function calls and host calls.

use fable_ir::{Call, FunctionDecl};
use fable_value::{
    arity_mismatch, undefined_function, undefined_host_call, EvalError, EvalResult, Value,
};

use super::{Exit, Interpreter};
use crate::stack::ensure_sufficient_stack;

/// Fail unless `decl` takes exactly `got` arguments.
pub(super) fn check_arg_count(decl: &FunctionDecl, got: usize) -> Result<(), EvalError> {
    if decl.arity() == got {
        Ok(())
    } else {
        Err(arity_mismatch(&decl.name, decl.arity(), got))
    }
}

impl Interpreter {
    /// Evaluate a script function call.
    ///
    /// The function is resolved through the scope chain, then the globals.
    /// Arity is checked before any argument is evaluated.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %call.name))]
    pub(super) fn eval_function_call(&mut self, call: &Call) -> EvalResult {
        let decl = self
            .env
            .get_function(&call.name)
            .ok_or_else(|| undefined_function(&call.name))?;
        check_arg_count(&decl, call.args.len())?;
        let args = self.eval_args(&call.args)?;
        self.invoke(&decl, None, args)
    }

    /// Call the script function `name` with already evaluated arguments.
    pub fn call_function_with_values(&mut self, name: &str, args: Vec<Value>) -> EvalResult {
        let decl = self
            .env
            .get_function(name)
            .ok_or_else(|| undefined_function(name))?;
        check_arg_count(&decl, args.len())?;
        self.invoke(&decl, None, args)
    }

    /// Evaluate a host call. `Void` results reach the script as `Null`.
    #[tracing::instrument(level = "debug", skip_all, fields(host_call = %call.name))]
    pub(super) fn eval_host_call(&mut self, call: &Call) -> EvalResult {
        // Clone the handle out so the registry is unlocked while the call runs.
        let host = self
            .host_calls()
            .read()
            .get(&call.name)
            .ok_or_else(|| undefined_host_call(&call.name))?;
        let args = self.eval_args(&call.args)?;
        host(self, &args).map(Value::void_to_null)
    }

    /// Run a function or method body in a child of the caller's scope.
    ///
    /// `this` is bound first when present, then each parameter. Break and
    /// continue requests do not cross the call boundary.
    pub(super) fn invoke(
        &mut self,
        decl: &FunctionDecl,
        this: Option<Value>,
        args: Vec<Value>,
    ) -> EvalResult {
        self.call_depth.enter()?;
        let result = ensure_sufficient_stack(|| -> EvalResult {
            let mut scoped = self.scoped();
            if let Some(this) = this {
                scoped.env.declare("this", this);
            }
            for (param, arg) in decl.params.iter().zip(args) {
                scoped.env.declare(param, arg);
            }
            Ok(match scoped.exec_list(&decl.body)? {
                Some(Exit::Return(value)) => value.void_to_null(),
                Some(Exit::Break | Exit::Continue) | None => Value::Null,
            })
        });
        self.call_depth.leave();
        result
    }
}
