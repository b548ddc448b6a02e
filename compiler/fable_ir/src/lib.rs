//! Fable IR - AST node definitions for the Fable narrative scripting engine.
//!
//! The tree is produced once by an external front end and handed to the
//! evaluator fully formed. Nothing in this crate mutates a tree after
//! construction; the evaluator only reads it.
//!
//! # Layout
//!
//! - [`ast::operators`]: binary, unary, assignment, and step operators
//! - [`ast::expr`]: expression nodes
//! - [`ast::stmt`]: statement nodes, declarations, and [`Program`]
//! - [`cache`] (feature `cache`): binary program cache keyed by source path

pub mod ast;
#[cfg(feature = "cache")]
pub mod cache;

pub use ast::{
    AssignOp, BinaryOp, Call, ConditionalBranch, Expr, FieldDecl, FunctionDecl, MethodCall,
    ObjectTypeDecl, ParagraphSelector, Program, Reference, StepOp, Stmt, UnaryOp, VariableDecl,
    VariableType,
};
