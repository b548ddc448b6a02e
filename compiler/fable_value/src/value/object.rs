//! Shared object instances.

// Objects are single-threaded shared state; Rc is the implementation.
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::Value;

/// An instance of a script-declared (or primitive pseudo-) object type.
///
/// Cloning an `ObjectValue` clones the handle, not the fields: every clone
/// observes mutations made through any other. Field order is declaration
/// order.
#[derive(Clone)]
pub struct ObjectValue {
    type_name: Rc<str>,
    fields: Rc<RefCell<IndexMap<String, Value>>>,
}

impl ObjectValue {
    pub(super) fn new(type_name: &str, fields: IndexMap<String, Value>) -> Self {
        ObjectValue {
            type_name: Rc::from(type_name),
            fields: Rc::new(RefCell::new(fields)),
        }
    }

    /// The declared type of this instance.
    #[inline]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Read a field, cloning its value.
    pub fn get(&self, field: &str) -> Option<Value> {
        self.fields.borrow().get(field).cloned()
    }

    /// Write a field, inserting it if the instance does not have it yet.
    pub fn set(&self, field: &str, value: Value) {
        let mut fields = self.fields.borrow_mut();
        if let Some(slot) = fields.get_mut(field) {
            *slot = value;
        } else {
            fields.insert(field.to_string(), value);
        }
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.borrow().contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.fields.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.borrow().is_empty()
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> Vec<String> {
        self.fields.borrow().keys().cloned().collect()
    }

    /// Whether both handles point at the same instance.
    #[inline]
    pub fn ptr_eq(&self, other: &ObjectValue) -> bool {
        Rc::ptr_eq(&self.fields, &other.fields)
    }
}

/// Structural equality over the field maps; the type name is not compared.
///
/// A pair already under comparison further up a cyclic path counts as
/// equal, so self-referencing objects compare without unbounded recursion.
impl PartialEq for ObjectValue {
    fn eq(&self, other: &Self) -> bool {
        self.eq_with(other, &mut Vec::new())
    }
}

impl ObjectValue {
    fn addr(&self) -> *const () {
        Rc::as_ptr(&self.fields).cast()
    }

    fn eq_with(&self, other: &ObjectValue, in_progress: &mut Vec<(*const (), *const ())>) -> bool {
        if self.ptr_eq(other) {
            return true;
        }
        let pair = (self.addr(), other.addr());
        if in_progress.contains(&pair) {
            return true;
        }
        let left = self.fields.borrow();
        let right = other.fields.borrow();
        if left.len() != right.len() {
            return false;
        }
        in_progress.push(pair);
        let equal = left.iter().all(|(name, value)| {
            right.get(name).is_some_and(|theirs| match (value, theirs) {
                (Value::Object(a), Value::Object(b)) => a.eq_with(b, in_progress),
                (mine, theirs) => mine == theirs,
            })
        });
        in_progress.pop();
        equal
    }

    /// Render as `{name=value, ...}`; an object that is already being
    /// rendered further up the path prints as `{...}`.
    fn fmt_with(&self, f: &mut fmt::Formatter<'_>, open: &mut Vec<*const ()>) -> fmt::Result {
        let addr = self.addr();
        if open.contains(&addr) {
            return write!(f, "{{...}}");
        }
        open.push(addr);
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.borrow().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}=")?;
            match value {
                Value::Object(obj) => obj.fmt_with(f, open)?,
                other => write!(f, "{other}")?,
            }
        }
        open.pop();
        write!(f, "}}")
    }
}

impl fmt::Debug for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectValue")
            .field("type_name", &&*self.type_name)
            .field("fields", &format_args!("{self}"))
            .finish()
    }
}

impl fmt::Display for ObjectValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with(f, &mut Vec::new())
    }
}
