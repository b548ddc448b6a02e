//! Abstract syntax tree for Fable scripts.
//!
//! All node types derive `Clone, Debug, PartialEq` and, under the `cache`
//! feature, `serde::Serialize`/`serde::Deserialize` so a parsed [`Program`]
//! can be persisted and reloaded without re-parsing.

pub mod expr;
pub mod operators;
pub mod stmt;

pub use expr::{Call, Expr, MethodCall};
pub use operators::{AssignOp, BinaryOp, StepOp, UnaryOp};
pub use stmt::{
    ConditionalBranch, FieldDecl, FunctionDecl, ObjectTypeDecl, ParagraphSelector, Program,
    Reference, Stmt, VariableDecl, VariableType,
};

#[cfg(test)]
mod tests;
