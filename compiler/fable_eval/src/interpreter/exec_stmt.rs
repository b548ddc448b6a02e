//! Statement execution: statement lists, labels and jumps, loops, assignment.

use std::sync::Arc;

use fable_ir::{AssignOp, BinaryOp, Expr, Stmt, VariableDecl};
use fable_value::{
    jump_limit_exceeded, jump_target_not_found, missing_initializer, not_an_object,
    undefined_field, undefined_program, undefined_variable, EvalError, Value,
};
use rustc_hash::FxHashMap;

use super::{Exit, Flow, Interpreter, MAX_JUMP_COUNT};
use crate::operators::evaluate_binary;
use crate::stack::ensure_sufficient_stack;

/// Map each label id to its index. A repeated id resolves to its last occurrence.
fn label_table(stmts: &[Stmt]) -> FxHashMap<&str, usize> {
    stmts
        .iter()
        .enumerate()
        .filter_map(|(index, stmt)| match stmt {
            Stmt::JumpMark { id } => Some((id.as_str(), index)),
            _ => None,
        })
        .collect()
}

fn flow_from(exit: Option<Exit>) -> Flow<'static> {
    match exit {
        Some(exit) => Flow::Exit(exit),
        None => Flow::Next,
    }
}

impl Interpreter {
    /// Walk `stmts` in the current scope.
    ///
    /// Labels are resolved against this list only. Returns the exit that
    /// stopped the walk, or `None` if it fell off the end.
    #[tracing::instrument(level = "trace", skip_all, fields(len = stmts.len()))]
    pub fn exec_list(&mut self, stmts: &[Stmt]) -> Result<Option<Exit>, EvalError> {
        let labels = label_table(stmts);
        let mut jumps = 0usize;
        let mut index = 0usize;

        while let Some(stmt) = stmts.get(index) {
            let flow = match self.exec_stmt(stmt) {
                Ok(flow) => flow,
                Err(err) => return Err(self.list_error(err, stmts.len())),
            };
            match flow {
                Flow::Next => index += 1,
                Flow::Exit(exit) => return Ok(Some(exit)),
                Flow::Jump(target) => {
                    jumps += 1;
                    if jumps > MAX_JUMP_COUNT {
                        let err = jump_limit_exceeded(MAX_JUMP_COUNT);
                        return Err(self.list_error(err, stmts.len()));
                    }
                    let Some(&resume) = labels.get(target) else {
                        let err = jump_target_not_found(target);
                        return Err(self.list_error(err, stmts.len()));
                    };
                    tracing::trace!(label = target, resume, jumps, "jump");
                    index = resume;
                }
            }
        }
        Ok(None)
    }

    /// Walk `stmts` in a fresh child scope.
    pub fn exec_block(&mut self, stmts: &[Stmt]) -> Result<Option<Exit>, EvalError> {
        self.scoped().exec_list(stmts)
    }

    /// Log an error leaving a statement list and attach scope context once,
    /// at the innermost list it escapes from.
    #[cold]
    fn list_error(&self, err: EvalError, len: usize) -> EvalError {
        if !err.notes.is_empty() {
            return err;
        }
        let depth = self.env.depth();
        tracing::warn!(error = %err.message, depth, statements = len, "script error");
        err.with_note(format!(
            "in statement list of {len} statements at scope depth {depth}"
        ))
    }

    /// Execute one statement.
    pub(super) fn exec_stmt<'s>(&mut self, stmt: &'s Stmt) -> Result<Flow<'s>, EvalError> {
        match stmt {
            Stmt::VariableDeclaration(decl) => self.exec_declaration(decl)?,
            Stmt::VariableAssignment { name, op, value } => {
                let value = self.eval_expr(value)?;
                self.assign_variable(name, op.binary_op(), value)?;
            }
            Stmt::VariableSelfOperation { name, op } => {
                self.assign_variable(name, Some(op.binary_op()), Value::int32(1))?;
            }
            Stmt::FieldAssignment {
                target,
                field,
                op,
                value,
            } => self.exec_field_assignment(target, field, *op, value)?,
            Stmt::FieldSelfOperation { target, field, op } => {
                let target = self.eval_expr(target)?;
                Self::assign_field(&target, field, Some(op.binary_op()), Value::int32(1))?;
            }
            Stmt::ObjectTypeDeclaration(decl) => {
                self.globals().write().declare_object_type(decl)?;
            }
            Stmt::FunctionDeclaration(decl) => self.env.declare_function(Arc::clone(decl)),
            Stmt::GlobalFunctionDeclaration(decl) => {
                self.globals().write().declare_function(Arc::clone(decl));
            }
            Stmt::Conditional(branches) => {
                for branch in branches {
                    if self.eval_expr(&branch.condition)?.is_truthy() {
                        return Ok(flow_from(self.exec_block(&branch.body)?));
                    }
                }
            }
            Stmt::Loop { condition, body } => return self.exec_loop(condition, body),
            Stmt::Break => return Ok(Flow::Exit(Exit::Break)),
            Stmt::Continue => return Ok(Flow::Exit(Exit::Continue)),
            Stmt::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval_expr(expr)?.void_to_null(),
                    None => Value::Null,
                };
                return Ok(Flow::Exit(Exit::Return(value)));
            }
            Stmt::Terminate => return Ok(Flow::Exit(Exit::Return(Value::Null))),
            Stmt::JumpMark { .. } => {}
            Stmt::Jump { target, condition } => {
                if self.eval_expr(condition)?.is_truthy() {
                    return Ok(Flow::Jump(target.as_str()));
                }
            }
            Stmt::CallProgram { program } => self.exec_call_program(program)?,
            Stmt::SystemCall(call) => {
                self.eval_host_call(call)?;
            }
            Stmt::FunctionCall(call) => {
                self.eval_function_call(call)?;
            }
            Stmt::MethodCall(call) => {
                self.eval_method_call(call)?;
            }
            Stmt::Reference(reference) => self.exec_reference(reference)?,
        }
        Ok(Flow::Next)
    }

    fn exec_declaration(&mut self, decl: &VariableDecl) -> Result<(), EvalError> {
        let value = match &decl.init {
            Some(init) => self.eval_expr(init)?,
            None => Value::default_for(decl.ty)
                .ok_or_else(|| missing_initializer(&decl.name, &decl.ty.to_string()))?,
        };
        self.env.declare(&decl.name, value);
        Ok(())
    }

    /// Plain assignment when `op` is `None`, read-modify-write otherwise.
    fn assign_variable(
        &mut self,
        name: &str,
        op: Option<BinaryOp>,
        value: Value,
    ) -> Result<(), EvalError> {
        let value = match op {
            None => value,
            Some(op) => {
                let current = self.env.get(name).ok_or_else(|| undefined_variable(name))?;
                evaluate_binary(&current, &value, op)?
            }
        };
        self.env.set(name, value);
        Ok(())
    }

    fn exec_field_assignment(
        &mut self,
        target: &Expr,
        field: &str,
        op: AssignOp,
        value: &Expr,
    ) -> Result<(), EvalError> {
        let target = self.eval_expr(target)?;
        let value = self.eval_expr(value)?;
        Self::assign_field(&target, field, op.binary_op(), value)
    }

    /// Mutate `field` of the object `target` in place.
    ///
    /// Plain assignment adds a missing field; compound forms require it.
    fn assign_field(
        target: &Value,
        field: &str,
        op: Option<BinaryOp>,
        value: Value,
    ) -> Result<(), EvalError> {
        let Value::Object(object) = target else {
            return Err(not_an_object(target.type_name()));
        };
        let value = match op {
            None => value,
            Some(op) => {
                let current = object
                    .get(field)
                    .ok_or_else(|| undefined_field(object.type_name(), field))?;
                evaluate_binary(&current, &value, op)?
            }
        };
        object.set(field, value);
        Ok(())
    }

    fn exec_loop<'s>(&mut self, condition: &Expr, body: &[Stmt]) -> Result<Flow<'s>, EvalError> {
        while self.eval_expr(condition)?.is_truthy() {
            match self.exec_block(body)? {
                Some(Exit::Return(value)) => return Ok(Flow::Exit(Exit::Return(value))),
                Some(Exit::Break) => break,
                Some(Exit::Continue) | None => {}
            }
        }
        Ok(Flow::Next)
    }

    /// Run another loaded program's statements as a nested block.
    ///
    /// Its `return`, `break`, and `continue` end that program only.
    fn exec_call_program(&mut self, name: &str) -> Result<(), EvalError> {
        let program = self
            .library()
            .read()
            .program(name)
            .ok_or_else(|| undefined_program(name))?;
        tracing::debug!(program = name, "call program");
        self.call_depth.enter()?;
        let result = ensure_sufficient_stack(|| self.exec_block(&program.statements));
        self.call_depth.leave();
        result.map(|_| ())
    }
}
