// ABOUTME: Lexically-scoped environment: a chain of frames linked by Rc parent pointers

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{LError, LErrorKind};
use crate::value::Value;

#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// Creates a new global environment with no parent.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(None),
        })
    }

    /// Creates a new child environment with a parent.
    pub fn with_parent(parent: Rc<Environment>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(Some(parent)),
        })
    }

    /// Defines a binding in THIS scope (doesn't walk the parent chain).
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.bindings.borrow_mut().insert(name.into(), value);
    }

    /// Looks up a symbol in this scope, then recursively in parent scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.borrow().get(name) {
            return Some(value.clone());
        }
        if let Some(parent) = self.parent.borrow().as_ref() {
            return parent.get(name);
        }
        None
    }

    pub fn lookup(&self, name: &str) -> Result<Value, LError> {
        self.get(name)
            .ok_or_else(|| LError::with_message(LErrorKind::BadSymbol, format!("unbound symbol `{name}`")))
    }

    /// Updates an existing binding wherever in the chain it is defined.
    pub fn set(&self, name: &str, value: Value) -> Result<(), LError> {
        if self.bindings.borrow().contains_key(name) {
            self.bindings.borrow_mut().insert(name.to_string(), value);
            return Ok(());
        }
        if let Some(parent) = self.parent.borrow().as_ref() {
            return parent.set(name, value);
        }
        Err(LError::with_message(LErrorKind::BadSymbol, format!("unbound symbol `{name}`")))
    }

    /// Defines a binding at the root of the chain (the `def` contract:
    /// top-level definitions are always global, never scoped to the
    /// current call frame).
    pub fn put_global(&self, name: impl Into<String>, value: Value) {
        match self.parent.borrow().as_ref() {
            Some(parent) => parent.put_global(name, value),
            None => self.define(name, value),
        }
    }

    pub fn is_defined_locally(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    pub fn set_parent(&self, parent: Rc<Environment>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Deep-copies this frame's own bindings into a fresh environment that
    /// shares the same parent `Rc` (used when partially applying a
    /// user-defined function: the call gets its own frame, but still sees
    /// the same enclosing scope).
    pub fn copy(self: &Rc<Self>) -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn define_and_get() {
        let env = Environment::new();
        env.define("x", Value::Int(42));
        assert_eq!(env.get("x"), Some(Value::Int(42)));
    }

    #[test]
    fn undefined_symbol_is_none() {
        let env = Environment::new();
        assert!(env.get("undefined").is_none());
    }

    #[test]
    fn child_shadows_parent() {
        let parent = Environment::new();
        parent.define("x", Value::Int(42));
        let child = Environment::with_parent(parent);
        child.define("x", Value::Int(100));
        assert_eq!(child.get("x"), Some(Value::Int(100)));
    }

    #[test]
    fn child_sees_parent_bindings() {
        let parent = Environment::new();
        parent.define("x", Value::Int(42));
        let child = Environment::with_parent(parent);
        assert_eq!(child.get("x"), Some(Value::Int(42)));
    }

    #[test]
    fn put_global_climbs_to_the_root() {
        let root = Environment::new();
        let child = Environment::with_parent(root.clone());
        let grandchild = Environment::with_parent(child.clone());
        grandchild.put_global("x", Value::Int(7));
        assert!(root.is_defined_locally("x"));
        assert!(!child.is_defined_locally("x"));
        assert!(!grandchild.is_defined_locally("x"));
    }

    #[test]
    fn copy_shares_parent_but_not_local_bindings() {
        let parent = Environment::new();
        parent.define("shared", Value::Int(1));
        let frame = Environment::with_parent(parent.clone());
        frame.define("local", Value::Int(2));

        let copied = frame.copy();
        copied.define("local", Value::Int(99));

        assert_eq!(frame.get("local"), Some(Value::Int(2)));
        assert_eq!(copied.get("local"), Some(Value::Int(99)));
        assert_eq!(copied.get("shared"), Some(Value::Int(1)));
    }
}
