//! Global registry: script-wide functions and object types.
//!
//! Seeded with the primitive pseudo-types so that every value, not just
//! objects, can dispatch methods such as `to_string`.

use std::sync::Arc;

use fable_ir::{Expr, FunctionDecl, ObjectTypeDecl, Program, Stmt};
use fable_value::{reserved_type, EvalError};
use rustc_hash::FxHashMap;

/// Names of the primitive pseudo-types. Script declarations may not reuse them.
pub const PRIMITIVE_TYPES: [&str; 7] = ["Int32", "Int64", "Float", "Bool", "String", "Null", "Void"];

/// Name of the method attached to every type that declares none.
pub const TO_STRING: &str = "to_string";

/// `to_string() { return to_string(this) }`
pub fn to_string_method() -> FunctionDecl {
    FunctionDecl::new(
        TO_STRING,
        &[],
        vec![Stmt::ret(Expr::system_call(TO_STRING, vec![Expr::var("this")]))],
    )
}

#[derive(Debug)]
pub struct Globals {
    functions: FxHashMap<String, Arc<FunctionDecl>>,
    object_types: FxHashMap<String, Arc<ObjectTypeDecl>>,
}

impl Globals {
    pub fn new() -> Self {
        let mut globals = Globals {
            functions: FxHashMap::default(),
            object_types: FxHashMap::default(),
        };
        globals.seed_primitives();
        globals
    }

    fn seed_primitives(&mut self) {
        let to_string = Arc::new(to_string_method());
        for name in PRIMITIVE_TYPES {
            let decl = ObjectTypeDecl {
                name: name.to_string(),
                fields: Vec::new(),
                methods: vec![Arc::clone(&to_string)],
            };
            self.object_types.insert(name.to_string(), Arc::new(decl));
        }
    }

    pub fn is_primitive(name: &str) -> bool {
        PRIMITIVE_TYPES.contains(&name)
    }

    /// Register a global function, replacing any function of the same name.
    pub fn declare_function(&mut self, decl: Arc<FunctionDecl>) {
        if let Some(previous) = self.functions.get(&decl.name) {
            if !Arc::ptr_eq(previous, &decl) && **previous != *decl {
                tracing::warn!(function = %decl.name, "global function replaced");
            }
        }
        self.functions.insert(decl.name.clone(), decl);
    }

    pub fn function(&self, name: &str) -> Option<Arc<FunctionDecl>> {
        self.functions.get(name).cloned()
    }

    /// Register an object type.
    ///
    /// Primitive pseudo-type names are rejected. A type declaring no methods
    /// gets the default `to_string`. Redeclaring a user type replaces it.
    pub fn declare_object_type(&mut self, decl: &Arc<ObjectTypeDecl>) -> Result<(), EvalError> {
        if Self::is_primitive(&decl.name) {
            return Err(reserved_type(&decl.name));
        }
        let effective = if decl.methods.is_empty() {
            let mut with_default = (**decl).clone();
            with_default.methods.push(Arc::new(to_string_method()));
            Arc::new(with_default)
        } else {
            Arc::clone(decl)
        };
        if let Some(previous) = self.object_types.get(&decl.name) {
            if **previous != *effective {
                tracing::warn!(object_type = %decl.name, "object type replaced");
            }
        }
        self.object_types.insert(decl.name.clone(), effective);
        Ok(())
    }

    pub fn object_type(&self, name: &str) -> Option<Arc<ObjectTypeDecl>> {
        self.object_types.get(name).cloned()
    }

    pub fn has_object_type(&self, name: &str) -> bool {
        self.object_types.contains_key(name)
    }

    /// Register every top-level global function and object type of `program`.
    pub fn register_program(&mut self, program: &Program) -> Result<(), EvalError> {
        for decl in program.object_types() {
            self.declare_object_type(decl)
                .map_err(|e| e.with_note(format!("while loading program {}", program.name)))?;
        }
        for decl in program.global_functions() {
            self.declare_function(Arc::clone(decl));
        }
        tracing::debug!(
            program = %program.name,
            functions = self.functions.len(),
            object_types = self.object_types.len(),
            "registered program declarations"
        );
        Ok(())
    }

    /// Drop all functions and user types; primitive pseudo-types are re-seeded.
    pub fn clear(&mut self) {
        self.functions.clear();
        self.object_types.clear();
        self.seed_primitives();
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new()
    }
}
