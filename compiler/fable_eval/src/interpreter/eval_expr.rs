//! Expression evaluation.

use fable_ir::Expr;
use fable_value::{
    field_count_mismatch, not_an_object, reserved_type, undefined_field, undefined_type,
    undefined_variable, EvalError, EvalResult, Value,
};
use indexmap::IndexMap;

use super::Interpreter;
use crate::globals::Globals;
use crate::operators::evaluate_binary;
use crate::unary_operators::evaluate_unary;

impl Interpreter {
    /// Evaluate an expression against the current scope chain.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult {
        match expr {
            Expr::Int32(n) => Ok(Value::int32(*n)),
            Expr::Int64(n) => Ok(Value::int64(*n)),
            Expr::Float(n) => Ok(Value::float(*n)),
            Expr::Str(s) => Ok(Value::string(s)),
            Expr::Bool(b) => Ok(Value::bool(*b)),
            Expr::Null => Ok(Value::Null),
            Expr::Variable(name) => self.env.get(name).ok_or_else(|| undefined_variable(name)),
            Expr::Binary { left, op, right } => {
                let left = self.eval_expr(left)?;
                let right = self.eval_expr(right)?;
                evaluate_binary(&left, &right, *op)
            }
            Expr::Unary { op, operand } => {
                let operand = self.eval_expr(operand)?;
                evaluate_unary(&operand, *op)
            }
            Expr::Paren(inner) => self.eval_expr(inner),
            Expr::Instantiate { type_name, fields } => self.instantiate(type_name, fields),
            Expr::Field { target, field } => {
                let target = self.eval_expr(target)?;
                let Value::Object(object) = &target else {
                    return Err(not_an_object(target.type_name()));
                };
                object
                    .get(field)
                    .ok_or_else(|| undefined_field(object.type_name(), field))
            }
            Expr::MethodCall(call) => self.eval_method_call(call),
            Expr::FunctionCall(call) => self.eval_function_call(call),
            Expr::SystemCall(call) => self.eval_host_call(call),
        }
    }

    /// Evaluate arguments left to right.
    pub(super) fn eval_args(&mut self, args: &[Expr]) -> Result<Vec<Value>, EvalError> {
        args.iter().map(|arg| self.eval_expr(arg)).collect()
    }

    /// `new Type(a, b, ...)`: one positional initializer per declared field.
    fn instantiate(&mut self, type_name: &str, fields: &[Expr]) -> EvalResult {
        if Globals::is_primitive(type_name) {
            return Err(reserved_type(type_name));
        }
        let decl = self
            .globals()
            .read()
            .object_type(type_name)
            .ok_or_else(|| undefined_type(type_name))?;
        if decl.fields.len() != fields.len() {
            return Err(field_count_mismatch(
                type_name,
                decl.fields.len(),
                fields.len(),
            ));
        }
        let mut values = IndexMap::with_capacity(fields.len());
        for (field, init) in decl.fields.iter().zip(fields) {
            let value = self.eval_expr(init)?;
            values.insert(field.name.clone(), value);
        }
        Ok(Value::object(type_name, values))
    }
}
