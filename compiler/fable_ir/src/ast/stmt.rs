//! Statement nodes, declarations, and programs.

use std::fmt;
use std::sync::Arc;

use super::expr::{Call, Expr, MethodCall};
use super::operators::{AssignOp, StepOp};

/// A named, loaded unit of statements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub name: String,
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn new(name: impl Into<String>, statements: Vec<Stmt>) -> Self {
        Program {
            name: name.into(),
            statements,
        }
    }

    /// Top-level global function declarations, in source order.
    pub fn global_functions(&self) -> impl Iterator<Item = &Arc<FunctionDecl>> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::GlobalFunctionDeclaration(decl) => Some(decl),
            _ => None,
        })
    }

    /// Top-level object type declarations, in source order.
    pub fn object_types(&self) -> impl Iterator<Item = &Arc<ObjectTypeDecl>> {
        self.statements.iter().filter_map(|stmt| match stmt {
            Stmt::ObjectTypeDeclaration(decl) => Some(decl),
            _ => None,
        })
    }
}

/// Statement node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Stmt {
    VariableDeclaration(VariableDecl),

    /// `name = value` or `name op= value`
    VariableAssignment {
        name: String,
        op: AssignOp,
        value: Expr,
    },

    /// `name++` / `name--`
    VariableSelfOperation { name: String, op: StepOp },

    /// `target.field = value` or `target.field op= value`
    FieldAssignment {
        target: Expr,
        field: String,
        op: AssignOp,
        value: Expr,
    },

    /// `target.field++` / `target.field--`
    FieldSelfOperation {
        target: Expr,
        field: String,
        op: StepOp,
    },

    ObjectTypeDeclaration(Arc<ObjectTypeDecl>),

    /// Function visible from the declaring scope and its children.
    FunctionDeclaration(Arc<FunctionDecl>),

    /// Function registered in the globals registry, visible from every program.
    GlobalFunctionDeclaration(Arc<FunctionDecl>),

    /// `if / else if / else`; an `else` branch has a literal `true` condition.
    Conditional(Vec<ConditionalBranch>),

    Loop { condition: Expr, body: Vec<Stmt> },

    Break,
    Continue,
    Return(Option<Expr>),
    Terminate,

    /// Jump label, local to the statement list that contains it.
    JumpMark { id: String },

    /// Jump to `target` in the current statement list when `condition` is truthy.
    Jump { target: String, condition: Expr },

    /// Run another loaded program as a nested scope.
    CallProgram { program: String },

    SystemCall(Call),
    FunctionCall(Call),
    MethodCall(MethodCall),

    /// Display a text composition, or a single paragraph of one.
    Reference(Reference),
}

impl Stmt {
    pub fn declare(name: impl Into<String>, ty: VariableType, init: Option<Expr>) -> Self {
        Stmt::VariableDeclaration(VariableDecl {
            name: name.into(),
            ty,
            init,
        })
    }

    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::VariableAssignment {
            name: name.into(),
            op: AssignOp::Assign,
            value,
        }
    }

    pub fn compound_assign(name: impl Into<String>, op: AssignOp, value: Expr) -> Self {
        Stmt::VariableAssignment {
            name: name.into(),
            op,
            value,
        }
    }

    pub fn field_assign(target: Expr, field: impl Into<String>, value: Expr) -> Self {
        Stmt::FieldAssignment {
            target,
            field: field.into(),
            op: AssignOp::Assign,
            value,
        }
    }

    pub fn increment(name: impl Into<String>) -> Self {
        Stmt::VariableSelfOperation {
            name: name.into(),
            op: StepOp::Increment,
        }
    }

    pub fn decrement(name: impl Into<String>) -> Self {
        Stmt::VariableSelfOperation {
            name: name.into(),
            op: StepOp::Decrement,
        }
    }

    /// Single-branch conditional.
    pub fn if_then(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::Conditional(vec![ConditionalBranch { condition, body }])
    }

    pub fn while_loop(condition: Expr, body: Vec<Stmt>) -> Self {
        Stmt::Loop { condition, body }
    }

    pub fn ret(value: Expr) -> Self {
        Stmt::Return(Some(value))
    }

    pub fn mark(id: impl Into<String>) -> Self {
        Stmt::JumpMark { id: id.into() }
    }

    pub fn jump(target: impl Into<String>, condition: Expr) -> Self {
        Stmt::Jump {
            target: target.into(),
            condition,
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Stmt::FunctionCall(Call::new(name, args))
    }

    pub fn system_call(name: impl Into<String>, args: Vec<Expr>) -> Self {
        Stmt::SystemCall(Call::new(name, args))
    }

    pub fn method_call(target: Expr, method: impl Into<String>, args: Vec<Expr>) -> Self {
        Stmt::MethodCall(MethodCall::new(target, method, args))
    }

    pub fn function(decl: FunctionDecl) -> Self {
        Stmt::FunctionDeclaration(Arc::new(decl))
    }

    pub fn global_function(decl: FunctionDecl) -> Self {
        Stmt::GlobalFunctionDeclaration(Arc::new(decl))
    }

    pub fn object_type(decl: ObjectTypeDecl) -> Self {
        Stmt::ObjectTypeDeclaration(Arc::new(decl))
    }

    pub fn reference(composition: impl Into<String>, selector: Option<ParagraphSelector>) -> Self {
        Stmt::Reference(Reference {
            composition: composition.into(),
            selector,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct VariableDecl {
    pub name: String,
    pub ty: VariableType,
    pub init: Option<Expr>,
}

/// Declared type of a variable or object field.
///
/// Only consulted for default values; values are checked dynamically.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableType {
    Int32,
    Int64,
    Float,
    Bool,
    String,
    Object,
    Dynamic,
}

impl VariableType {
    /// Whether a declaration of this type may omit its initializer.
    pub const fn has_default(self) -> bool {
        !matches!(self, Self::Object | Self::Dynamic)
    }
}

impl fmt::Display for VariableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int32 => "Int32",
            Self::Int64 => "Int64",
            Self::Float => "Float",
            Self::Bool => "Bool",
            Self::String => "String",
            Self::Object => "Object",
            Self::Dynamic => "Dynamic",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionalBranch {
    pub condition: Expr,
    pub body: Vec<Stmt>,
}

/// Function or method declaration.
///
/// For methods, `params` excludes the implicit `this` receiver.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<String>,
    pub return_type: Option<VariableType>,
    pub body: Vec<Stmt>,
}

impl FunctionDecl {
    pub fn new(name: impl Into<String>, params: &[&str], body: Vec<Stmt>) -> Self {
        FunctionDecl {
            name: name.into(),
            params: params.iter().map(|p| (*p).to_string()).collect(),
            return_type: None,
            body,
        }
    }

    #[must_use]
    pub fn returning(mut self, ty: VariableType) -> Self {
        self.return_type = Some(ty);
        self
    }

    pub fn arity(&self) -> usize {
        self.params.len()
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldDecl {
    pub name: String,
    pub ty: VariableType,
}

/// Object type declaration: ordered fields and methods.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectTypeDecl {
    pub name: String,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<Arc<FunctionDecl>>,
}

impl ObjectTypeDecl {
    pub fn new(name: impl Into<String>, fields: &[(&str, VariableType)]) -> Self {
        ObjectTypeDecl {
            name: name.into(),
            fields: fields
                .iter()
                .map(|(name, ty)| FieldDecl {
                    name: (*name).to_string(),
                    ty: *ty,
                })
                .collect(),
            methods: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_method(mut self, method: FunctionDecl) -> Self {
        self.methods.push(Arc::new(method));
        self
    }

    pub fn method(&self, name: &str) -> Option<&Arc<FunctionDecl>> {
        self.methods.iter().find(|m| m.name == name)
    }
}

/// A display statement target.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Reference {
    pub composition: String,
    pub selector: Option<ParagraphSelector>,
}

/// Selects one paragraph of a composition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ParagraphSelector {
    Index(usize),
    Name(String),
}

impl fmt::Display for ParagraphSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => write!(f, "#{index}"),
            Self::Name(name) => write!(f, "[{name}]"),
        }
    }
}
