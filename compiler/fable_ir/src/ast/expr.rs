//! Expression nodes.

use super::operators::{BinaryOp, UnaryOp};

/// Expression node.
///
/// Evaluation is pure with respect to the tree: an `Expr` is read, never
/// rewritten. Side effects flow only through calls into functions, methods,
/// and host primitives.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Expr {
    // Literals
    Int32(i32),
    Int64(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,

    /// Variable reference: `x`
    Variable(String),

    /// Binary operation: `left op right`
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// Unary operation: `op operand`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Parenthesized expression: `(inner)`
    Paren(Box<Expr>),

    /// Object instantiation with positional field initializers: `new Point(1, 2)`
    Instantiate {
        type_name: String,
        fields: Vec<Expr>,
    },

    /// Field access: `target.field`
    Field { target: Box<Expr>, field: String },

    /// Method call in expression position: `target.method(args)`
    MethodCall(MethodCall),

    /// Script function call in expression position: `name(args)`
    FunctionCall(Call),

    /// Host primitive call in expression position.
    SystemCall(Call),
}

impl Expr {
    pub fn int32(value: i32) -> Self {
        Expr::Int32(value)
    }

    pub fn int64(value: i64) -> Self {
        Expr::Int64(value)
    }

    pub fn float(value: f64) -> Self {
        Expr::Float(value)
    }

    pub fn string(value: impl Into<String>) -> Self {
        Expr::Str(value.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable(name.into())
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Paren(Box::new(inner))
    }

    pub fn instantiate(type_name: impl Into<String>, fields: Vec<Expr>) -> Self {
        Expr::Instantiate {
            type_name: type_name.into(),
            fields,
        }
    }

    pub fn field(target: Expr, field: impl Into<String>) -> Self {
        Expr::Field {
            target: Box::new(target),
            field: field.into(),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::FunctionCall(Call::new(name, args))
    }

    pub fn system_call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::SystemCall(Call::new(name, args))
    }

    pub fn method_call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Expr::MethodCall(MethodCall::new(target, method, args))
    }
}

/// A call by name with positional arguments.
///
/// Shared by script function calls and host primitive calls; which registry
/// resolves `name` depends on the enclosing node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    pub name: String,
    pub args: Vec<Expr>,
}

impl Call {
    pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Call {
            name: name.into(),
            args,
        }
    }
}

/// A method invocation on an object-valued target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct MethodCall {
    pub target: Box<Expr>,
    pub method: String,
    pub args: Vec<Expr>,
}

impl MethodCall {
    pub fn new(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        MethodCall {
            target: Box::new(target),
            method: method.into(),
            args,
        }
    }
}
