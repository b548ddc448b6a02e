//! Runtime values and evaluation errors for Fable.
//!
//! [`Value`] is the closed sum of everything a script can hold. Objects are
//! shared, interior-mutable field maps ([`ObjectValue`]); every other variant
//! is plain data. [`EvalError`] is the single error type produced while a
//! script runs.

mod errors;
mod value;

pub use errors::*;
pub use value::{pool, ObjectValue, Value};
