//! Unary operator implementations for the evaluator.

use fable_ir::UnaryOp;
use fable_value::{invalid_unary_op, EvalResult, Value};

/// Evaluate a unary operation using direct pattern matching.
///
/// Negation wraps for the most negative integer, matching binary arithmetic.
pub fn evaluate_unary(value: &Value, op: UnaryOp) -> EvalResult {
    match (value, op) {
        (Value::Int32(n), UnaryOp::Neg) => Ok(Value::Int32(n.wrapping_neg())),
        (Value::Int64(n), UnaryOp::Neg) => Ok(Value::Int64(n.wrapping_neg())),
        (Value::Float(f), UnaryOp::Neg) => Ok(Value::Float(-f)),
        (Value::Bool(b), UnaryOp::Not) => Ok(Value::Bool(!b)),
        _ => Err(invalid_unary_op(value.type_name(), op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_value::ErrorCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn negates_numbers() {
        assert!(matches!(
            evaluate_unary(&Value::int32(4), UnaryOp::Neg),
            Ok(Value::Int32(-4))
        ));
        assert!(matches!(
            evaluate_unary(&Value::int64(-9), UnaryOp::Neg),
            Ok(Value::Int64(9))
        ));
        assert!(matches!(
            evaluate_unary(&Value::int32(i32::MIN), UnaryOp::Neg),
            Ok(Value::Int32(i32::MIN))
        ));
        assert_eq!(
            evaluate_unary(&Value::float(2.5), UnaryOp::Neg).ok(),
            Some(Value::float(-2.5))
        );
    }

    #[test]
    fn not_flips_bools() {
        assert_eq!(
            evaluate_unary(&Value::Bool(true), UnaryOp::Not).ok(),
            Some(Value::Bool(false))
        );
    }

    #[test]
    fn invalid_combinations_fail() {
        for (value, op) in [
            (Value::string("x"), UnaryOp::Neg),
            (Value::Null, UnaryOp::Neg),
            (Value::int32(1), UnaryOp::Not),
            (Value::string(""), UnaryOp::Not),
        ] {
            let err = evaluate_unary(&value, op)
                .err()
                .unwrap_or_else(|| panic!("expected {op:?} on {value:?} to fail"));
            assert_eq!(err.category(), ErrorCategory::Type);
        }
    }
}
