//! Method dispatch through the object-type registry.
//!
//! Every value has a type name: objects their declared type, everything else
//! its primitive pseudo-type. Methods are looked up on that type and run with
//! `this` bound to the receiver, in a child of the caller's scope.

use std::sync::Arc;

use fable_ir::{FunctionDecl, MethodCall};
use fable_value::{undefined_method, undefined_type, EvalError, EvalResult, Value};

use super::function_call::check_arg_count;
use super::Interpreter;

impl Interpreter {
    #[tracing::instrument(level = "debug", skip_all, fields(method = %call.method))]
    pub(super) fn eval_method_call(&mut self, call: &MethodCall) -> EvalResult {
        let receiver = self.eval_expr(&call.target)?;
        let method = self.resolve_method(&receiver, &call.method)?;
        check_arg_count(&method, call.args.len())?;
        let args = self.eval_args(&call.args)?;
        self.invoke(&method, Some(receiver), args)
    }

    /// Call `method` on `receiver` with already evaluated arguments.
    pub fn call_method_with_values(
        &mut self,
        receiver: Value,
        method: &str,
        args: Vec<Value>,
    ) -> EvalResult {
        let decl = self.resolve_method(&receiver, method)?;
        check_arg_count(&decl, args.len())?;
        self.invoke(&decl, Some(receiver), args)
    }

    fn resolve_method(
        &self,
        receiver: &Value,
        method: &str,
    ) -> Result<Arc<FunctionDecl>, EvalError> {
        let type_name = receiver.type_name();
        let decl = self
            .globals()
            .read()
            .object_type(type_name)
            .ok_or_else(|| undefined_type(type_name))?;
        decl.method(method)
            .cloned()
            .ok_or_else(|| undefined_method(type_name, method))
    }
}
