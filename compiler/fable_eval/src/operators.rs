//! Binary operator implementations for the evaluator.
//!
//! Provides direct enum-based dispatch for binary operations. The value set
//! is closed, so pattern matching is preferred over trait objects.
//!
//! # Numeric widening
//!
//! | left \ right | Int32 | Int64 | Float |
//! |--------------|-------|-------|-------|
//! | Int32        | Int32 | Int64 | Float |
//! | Int64        | Int64 | Int64 | Float |
//! | Float        | Float | Float | Float |
//!
//! Integer arithmetic wraps on overflow and integer division truncates toward
//! zero. `+` with a `String` on either side concatenates display forms.

use std::cmp::Ordering;

use fable_ir::BinaryOp;
use fable_value::{binary_type_mismatch, division_by_zero, modulo_by_zero, EvalResult, Value};

/// The arithmetic subset of [`BinaryOp`].
#[derive(Copy, Clone)]
enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

/// Operands after numeric widening.
enum Numeric {
    Int32(i32, i32),
    Int64(i64, i64),
    Float(f64, f64),
}

fn widen(left: &Value, right: &Value) -> Option<Numeric> {
    match (left, right) {
        (Value::Int32(a), Value::Int32(b)) => Some(Numeric::Int32(*a, *b)),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Some(Numeric::Float(left.as_f64()?, right.as_f64()?))
        }
        _ => Some(Numeric::Int64(left.as_i64()?, right.as_i64()?)),
    }
}

/// Evaluate a binary operation using direct pattern matching.
pub fn evaluate_binary(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match op {
        BinaryOp::Eq => Ok(Value::Bool(left == right)),
        BinaryOp::NotEq => Ok(Value::Bool(left != right)),
        BinaryOp::And | BinaryOp::Or => eval_logical(left, right, op),
        BinaryOp::Lt | BinaryOp::LtEq | BinaryOp::Gt | BinaryOp::GtEq => {
            eval_comparison(left, right, op)
        }
        BinaryOp::Add if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            Ok(Value::string(format!("{left}{right}")))
        }
        BinaryOp::Add => eval_arith(left, right, op, Arith::Add),
        BinaryOp::Sub => eval_arith(left, right, op, Arith::Sub),
        BinaryOp::Mul => eval_arith(left, right, op, Arith::Mul),
        BinaryOp::Div => eval_arith(left, right, op, Arith::Div),
        BinaryOp::Mod => eval_arith(left, right, op, Arith::Mod),
    }
}

fn eval_arith(left: &Value, right: &Value, op: BinaryOp, arith: Arith) -> EvalResult {
    match widen(left, right) {
        Some(Numeric::Int32(a, b)) => eval_int32_arith(a, b, arith),
        Some(Numeric::Int64(a, b)) => eval_int64_arith(a, b, arith),
        Some(Numeric::Float(a, b)) => Ok(Value::Float(eval_float_arith(a, b, arith))),
        None => Err(mismatch(left, right, op)),
    }
}

fn mismatch(left: &Value, right: &Value, op: BinaryOp) -> fable_value::EvalError {
    binary_type_mismatch(left.type_name(), op, right.type_name())
}

// Type-Specific Evaluation Functions

fn eval_int32_arith(a: i32, b: i32, arith: Arith) -> EvalResult {
    let result = match arith {
        Arith::Add => a.wrapping_add(b),
        Arith::Sub => a.wrapping_sub(b),
        Arith::Mul => a.wrapping_mul(b),
        Arith::Div if b == 0 => return Err(division_by_zero()),
        Arith::Div => a.wrapping_div(b),
        Arith::Mod if b == 0 => return Err(modulo_by_zero()),
        Arith::Mod => a.wrapping_rem(b),
    };
    Ok(Value::Int32(result))
}

fn eval_int64_arith(a: i64, b: i64, arith: Arith) -> EvalResult {
    let result = match arith {
        Arith::Add => a.wrapping_add(b),
        Arith::Sub => a.wrapping_sub(b),
        Arith::Mul => a.wrapping_mul(b),
        Arith::Div if b == 0 => return Err(division_by_zero()),
        Arith::Div => a.wrapping_div(b),
        Arith::Mod if b == 0 => return Err(modulo_by_zero()),
        Arith::Mod => a.wrapping_rem(b),
    };
    Ok(Value::Int64(result))
}

/// Float arithmetic follows IEEE 754: dividing by zero yields an infinity or NaN.
fn eval_float_arith(a: f64, b: f64, arith: Arith) -> f64 {
    match arith {
        Arith::Add => a + b,
        Arith::Sub => a - b,
        Arith::Mul => a * b,
        Arith::Div => a / b,
        Arith::Mod => a % b,
    }
}

/// Ordering comparisons: numbers after widening, strings lexicographically.
fn eval_comparison(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    let ordering = match (left, right) {
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => match widen(left, right) {
            Some(Numeric::Int32(a, b)) => Some(a.cmp(&b)),
            Some(Numeric::Int64(a, b)) => Some(a.cmp(&b)),
            Some(Numeric::Float(a, b)) => a.partial_cmp(&b),
            None => return Err(mismatch(left, right, op)),
        },
    };
    // NaN compares false under every ordering operator.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::LtEq => ordering != Ordering::Greater,
        BinaryOp::Gt => ordering == Ordering::Greater,
        _ => ordering != Ordering::Less,
    };
    Ok(Value::Bool(result))
}

/// `&&` and `||`; both operands are already evaluated and must be `Bool`.
fn eval_logical(left: &Value, right: &Value, op: BinaryOp) -> EvalResult {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(match op {
            BinaryOp::And => *a && *b,
            _ => *a || *b,
        })),
        _ => Err(mismatch(left, right, op)),
    }
}
