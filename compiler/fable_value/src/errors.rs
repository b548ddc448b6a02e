//! Error types for script evaluation.
//!
//! # Structured Error Categories
//!
//! `EvalErrorKind` carries the structured data of each failure;
//! [`ErrorCategory`] groups kinds into the families hosts usually branch on.
//! Factory functions (e.g. [`division_by_zero`]) are the public constructors:
//! they fill in both `kind` and the rendered `message`.

use std::fmt;

use fable_ir::{BinaryOp, UnaryOp};

use crate::Value;

/// Result of evaluation.
pub type EvalResult = Result<Value, EvalError>;

/// Coarse error family.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Undefined variable, function, type, field, method, host call,
    /// program, composition, or paragraph.
    Lookup,
    /// Argument or field count mismatch.
    Arity,
    /// Operator or operation applied to incompatible values.
    Type,
    /// Division or remainder by zero.
    Arithmetic,
    /// Invalid declaration.
    Definition,
    /// Jump limit exceeded or jump target missing.
    ControlFlow,
    /// Raised explicitly by a script.
    Script,
    /// Call depth or host I/O exhaustion.
    Resource,
}

/// Typed error category for structured diagnostics.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Lookup
    UndefinedVariable { name: String },
    UndefinedFunction { name: String },
    UndefinedType { name: String },
    UndefinedField { type_name: String, field: String },
    UndefinedMethod { type_name: String, method: String },
    UndefinedHostCall { name: String },
    UndefinedProgram { name: String },
    UndefinedComposition { name: String },
    UndefinedParagraph { composition: String, selector: String },

    // Arity
    ArityMismatch { name: String, expected: usize, got: usize },
    FieldCountMismatch { type_name: String, expected: usize, got: usize },

    // Type
    BinaryTypeMismatch { left: String, op: BinaryOp, right: String },
    InvalidUnaryOp { type_name: String, op: UnaryOp },
    NotAnObject { type_name: String },
    TypeMismatch { expected: String, got: String },

    // Arithmetic
    DivisionByZero,
    ModuloByZero,

    // Definition
    ReservedType { name: String },
    MissingInitializer { name: String, declared: String },

    // Control flow
    JumpLimitExceeded { limit: usize },
    JumpTargetNotFound { target: String },

    // Script
    ScriptError { message: String },

    // Resource
    StackOverflow { depth: usize },
    HostIo { message: String },

    Custom { message: String },
}

impl EvalErrorKind {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UndefinedVariable { .. }
            | Self::UndefinedFunction { .. }
            | Self::UndefinedType { .. }
            | Self::UndefinedField { .. }
            | Self::UndefinedMethod { .. }
            | Self::UndefinedHostCall { .. }
            | Self::UndefinedProgram { .. }
            | Self::UndefinedComposition { .. }
            | Self::UndefinedParagraph { .. } => ErrorCategory::Lookup,
            Self::ArityMismatch { .. } | Self::FieldCountMismatch { .. } => ErrorCategory::Arity,
            Self::BinaryTypeMismatch { .. }
            | Self::InvalidUnaryOp { .. }
            | Self::NotAnObject { .. }
            | Self::TypeMismatch { .. } => ErrorCategory::Type,
            Self::DivisionByZero | Self::ModuloByZero => ErrorCategory::Arithmetic,
            Self::ReservedType { .. } | Self::MissingInitializer { .. } => {
                ErrorCategory::Definition
            }
            Self::JumpLimitExceeded { .. } | Self::JumpTargetNotFound { .. } => {
                ErrorCategory::ControlFlow
            }
            Self::ScriptError { .. } | Self::Custom { .. } => ErrorCategory::Script,
            Self::StackOverflow { .. } | Self::HostIo { .. } => ErrorCategory::Resource,
        }
    }
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedVariable { name } => write!(f, "undefined variable: {name}"),
            Self::UndefinedFunction { name } => write!(f, "undefined function: {name}"),
            Self::UndefinedType { name } => write!(f, "undefined object type: {name}"),
            Self::UndefinedField { type_name, field } => {
                write!(f, "field {field} not found in object {type_name}")
            }
            Self::UndefinedMethod { type_name, method } => {
                write!(f, "method {method} not found in type {type_name}")
            }
            Self::UndefinedHostCall { name } => write!(f, "host function not found: {name}"),
            Self::UndefinedProgram { name } => write!(f, "program not found: {name}"),
            Self::UndefinedComposition { name } => write!(f, "text composition not found: {name}"),
            Self::UndefinedParagraph {
                composition,
                selector,
            } => write!(f, "paragraph {selector} not found in composition {composition}"),
            Self::ArityMismatch {
                name,
                expected,
                got,
            } => write!(f, "{name} expects {expected} arguments, got {got}"),
            Self::FieldCountMismatch {
                type_name,
                expected,
                got,
            } => write!(f, "{type_name} has {expected} fields, got {got} initializers"),
            Self::BinaryTypeMismatch { left, op, right } => write!(
                f,
                "operator {} is not defined for {left} and {right}",
                op.as_symbol()
            ),
            Self::InvalidUnaryOp { type_name, op } => write!(
                f,
                "operator {} is not defined for {type_name}",
                op.as_symbol()
            ),
            Self::NotAnObject { type_name } => write!(f, "expected an object, got {type_name}"),
            Self::TypeMismatch { expected, got } => write!(f, "expected {expected}, got {got}"),
            Self::DivisionByZero => write!(f, "division by zero"),
            Self::ModuloByZero => write!(f, "modulo by zero"),
            Self::ReservedType { name } => write!(f, "cannot redefine reserved type {name}"),
            Self::MissingInitializer { name, declared } => {
                write!(f, "variable {name} of type {declared} requires an initializer")
            }
            Self::JumpLimitExceeded { limit } => write!(f, "jump limit exceeded ({limit})"),
            Self::JumpTargetNotFound { target } => write!(f, "jump target not found: {target}"),
            Self::ScriptError { message } => write!(f, "{message}"),
            Self::StackOverflow { depth } => {
                write!(f, "maximum call depth exceeded ({depth})")
            }
            Self::HostIo { message } => write!(f, "host I/O failed: {message}"),
            Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message; equals `kind.to_string()` for factory errors.
    pub message: String,
    /// Context added while the error propagates outward.
    pub notes: Vec<String>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        EvalError {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            notes: Vec::new(),
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Add a context note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {}

// Lookup Errors

#[cold]
pub fn undefined_variable(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedVariable {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_type(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedType {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_field(type_name: &str, field: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedField {
        type_name: type_name.to_string(),
        field: field.to_string(),
    })
}

#[cold]
pub fn undefined_method(type_name: &str, method: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedMethod {
        type_name: type_name.to_string(),
        method: method.to_string(),
    })
}

#[cold]
pub fn undefined_host_call(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedHostCall {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_program(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedProgram {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_composition(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedComposition {
        name: name.to_string(),
    })
}

#[cold]
pub fn undefined_paragraph(composition: &str, selector: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedParagraph {
        composition: composition.to_string(),
        selector: selector.to_string(),
    })
}

// Arity Errors

#[cold]
pub fn arity_mismatch(name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        name: name.to_string(),
        expected,
        got,
    })
}

#[cold]
pub fn field_count_mismatch(type_name: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FieldCountMismatch {
        type_name: type_name.to_string(),
        expected,
        got,
    })
}

// Type Errors

#[cold]
pub fn binary_type_mismatch(left: &str, op: BinaryOp, right: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BinaryTypeMismatch {
        left: left.to_string(),
        op,
        right: right.to_string(),
    })
}

#[cold]
pub fn invalid_unary_op(type_name: &str, op: UnaryOp) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidUnaryOp {
        type_name: type_name.to_string(),
        op,
    })
}

#[cold]
pub fn not_an_object(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotAnObject {
        type_name: type_name.to_string(),
    })
}

#[cold]
pub fn type_mismatch(expected: &str, got: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: got.to_string(),
    })
}

// Arithmetic Errors

#[cold]
pub fn division_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DivisionByZero)
}

#[cold]
pub fn modulo_by_zero() -> EvalError {
    EvalError::from_kind(EvalErrorKind::ModuloByZero)
}

// Definition Errors

#[cold]
pub fn reserved_type(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReservedType {
        name: name.to_string(),
    })
}

#[cold]
pub fn missing_initializer(name: &str, declared: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingInitializer {
        name: name.to_string(),
        declared: declared.to_string(),
    })
}

// Control Flow Errors

#[cold]
pub fn jump_limit_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::JumpLimitExceeded { limit })
}

#[cold]
pub fn jump_target_not_found(target: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::JumpTargetNotFound {
        target: target.to_string(),
    })
}

// Script and Resource Errors

/// Error raised by a script through the `except` host call.
#[cold]
pub fn script_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ScriptError {
        message: message.into(),
    })
}

#[cold]
pub fn stack_overflow(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::StackOverflow { depth })
}

#[cold]
pub fn host_io(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::HostIo {
        message: message.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn factory_message_matches_kind() {
        let err = arity_mismatch("greet", 2, 3);
        assert_eq!(err.message, err.kind.to_string());
        assert_eq!(err.message, "greet expects 2 arguments, got 3");
        assert_eq!(err.category(), ErrorCategory::Arity);
    }

    #[test]
    fn categories_cover_taxonomy() {
        assert_eq!(undefined_variable("x").category(), ErrorCategory::Lookup);
        assert_eq!(undefined_host_call("beep").category(), ErrorCategory::Lookup);
        assert_eq!(
            field_count_mismatch("Point", 2, 1).category(),
            ErrorCategory::Arity
        );
        assert_eq!(
            binary_type_mismatch("Bool", BinaryOp::Add, "Bool").category(),
            ErrorCategory::Type
        );
        assert_eq!(division_by_zero().category(), ErrorCategory::Arithmetic);
        assert_eq!(reserved_type("Int32").category(), ErrorCategory::Definition);
        assert_eq!(jump_limit_exceeded(1000).category(), ErrorCategory::ControlFlow);
        assert_eq!(jump_target_not_found("L").category(), ErrorCategory::ControlFlow);
        assert_eq!(script_error("boom").category(), ErrorCategory::Script);
        assert_eq!(stack_overflow(500).category(), ErrorCategory::Resource);
    }

    #[test]
    fn notes_render_after_message() {
        let err = undefined_variable("hp").with_note("in statement list of 3 statements");
        assert_eq!(
            err.to_string(),
            "undefined variable: hp\n  note: in statement list of 3 statements"
        );
    }

    #[test]
    fn binary_mismatch_shows_operator_symbol() {
        let err = binary_type_mismatch("Bool", BinaryOp::Mul, "String");
        assert_eq!(err.message, "operator * is not defined for Bool and String");
    }

    #[test]
    fn script_error_message_is_verbatim() {
        assert_eq!(script_error("door is locked").message, "door is locked");
    }
}
