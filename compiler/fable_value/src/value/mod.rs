//! Runtime values for the Fable interpreter.
//!
//! Scalars are stored inline. Strings are `Rc<str>` routed through the
//! short-string [`pool`]. Objects go through [`Value::object`] so their field
//! maps are always shared handles.
//!
//! # Equality
//!
//! `==` is numeric-coercing across `Int32`, `Int64`, and `Float`: integers
//! compare after widening to `i64`, and any comparison involving a `Float`
//! widens both sides to `f64` and accepts an absolute difference below
//! [`FLOAT_EPSILON`]. Every other variant is equal only to itself with the
//! same content; objects compare by field contents.

mod object;
pub mod pool;

use std::fmt;
use std::rc::Rc;

use fable_ir::VariableType;
use indexmap::IndexMap;

pub use object::ObjectValue;

/// Tolerance for float equality.
pub const FLOAT_EPSILON: f64 = 0.00001;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    Int32(i32),
    Int64(i64),
    Float(f64),
    Bool(bool),
    Str(Rc<str>),
    Object(ObjectValue),
    Null,
    /// "Nothing was returned" marker inside a body. Never observable as the
    /// result of a call.
    Void,
}

impl Value {
    #[inline]
    pub fn int32(n: i32) -> Self {
        Value::Int32(n)
    }

    #[inline]
    pub fn int64(n: i64) -> Self {
        Value::Int64(n)
    }

    #[inline]
    pub fn float(n: f64) -> Self {
        Value::Float(n)
    }

    #[inline]
    pub fn bool(b: bool) -> Self {
        Value::Bool(b)
    }

    /// Create a string value, sharing storage for short strings.
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(pool::intern(s.as_ref()))
    }

    /// Create a fresh object instance with the given fields.
    pub fn object(type_name: &str, fields: IndexMap<String, Value>) -> Self {
        Value::Object(ObjectValue::new(type_name, fields))
    }

    /// Default value for a declared type, if it has one.
    ///
    /// `Object` and `Dynamic` have no default.
    pub fn default_for(ty: VariableType) -> Option<Self> {
        match ty {
            VariableType::Int32 => Some(Value::Int32(0)),
            VariableType::Int64 => Some(Value::Int64(0)),
            VariableType::Float => Some(Value::Float(0.0)),
            VariableType::Bool => Some(Value::Bool(false)),
            VariableType::String => Some(Value::string("")),
            VariableType::Object | VariableType::Dynamic => None,
        }
    }

    /// Type name used for method dispatch and error messages.
    ///
    /// Objects report their declared type; every other variant reports its
    /// primitive pseudo-type.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float(_) => "Float",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "String",
            Value::Object(obj) => obj.type_name(),
            Value::Null => "Null",
            Value::Void => "Void",
        }
    }

    /// Condition truthiness.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Int32(n) => *n != 0,
            Value::Int64(n) => *n != 0,
            Value::Float(n) => *n != 0.0,
            Value::Bool(b) => *b,
            Value::Str(s) => !s.is_empty(),
            Value::Object(_) | Value::Null | Value::Void => false,
        }
    }

    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int32(_) | Value::Int64(_) | Value::Float(_))
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        matches!(self, Value::Void)
    }

    /// Replace `Void` with `Null`; any other value passes through.
    #[inline]
    #[must_use]
    pub fn void_to_null(self) -> Self {
        match self {
            Value::Void => Value::Null,
            other => other,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectValue> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Numeric value widened to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int32(n) => Some(f64::from(*n)),
            Value::Int64(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Integer value widened to `i64`. Floats are not integers.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int32(n) => Some(i64::from(*n)),
            Value::Int64(n) => Some(*n),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Float(_), _) | (_, Value::Float(_)) => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => (a - b).abs() < FLOAT_EPSILON,
                _ => false,
            },
            (Value::Int32(_) | Value::Int64(_), Value::Int32(_) | Value::Int64(_)) => {
                self.as_i64() == other.as_i64()
            }
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => a == b,
            (Value::Null, Value::Null) | (Value::Void, Value::Void) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int32(n) => write!(f, "{n}"),
            Value::Int64(n) => write!(f, "{n}"),
            Value::Float(n) => {
                // Integral floats keep a trailing ".0" so they read as floats.
                if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e16 {
                    write!(f, "{n:.1}")
                } else {
                    write!(f, "{n}")
                }
            }
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
            Value::Object(obj) => write!(f, "{obj}"),
            Value::Null => f.write_str("null"),
            Value::Void => f.write_str("void"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int32(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int64(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}
