//! Environment for variable bindings in the Loris interpreter.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use smol_str::SmolStr;

use crate::Value;

/// An environment holds variable bindings and optionally a parent scope.
///
/// Environments form a tree rooted at the host-created outermost frame. Each
/// function call adds a child of the *captured* environment of the function
/// being called, which gives lexical scoping. Frames are shared through
/// `Rc<RefCell<_>>` and stay alive as long as any closure references them.
#[derive(Debug, Default)]
pub struct Environment {
    /// Variable bindings in this scope
    values: HashMap<SmolStr, Value>,

    /// Parent scope (for lexical scoping)
    parent: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    /// Create a new empty root environment.
    pub fn new() -> Self {
        Environment {
            values: HashMap::new(),
            parent: None,
        }
    }

    /// Create a new child environment with the given parent.
    pub fn with_parent(parent: Rc<RefCell<Environment>>) -> Self {
        Environment {
            values: HashMap::new(),
            parent: Some(parent),
        }
    }

    /// Define a variable in the current scope only.
    pub fn define(&mut self, name: SmolStr, value: Value) {
        self.values.insert(name, value);
    }

    /// Get the value of a variable, searching up through parent scopes.
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.values.get(name) {
            Some(value.clone())
        } else if let Some(parent) = &self.parent {
            parent.borrow().get(name)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x".into(), Value::Int(42));
        assert_eq!(env.get("x"), Some(Value::Int(42)));
    }

    #[test]
    fn test_undefined_variable() {
        let env = Environment::new();
        assert_eq!(env.get("x"), None);
    }

    #[test]
    fn test_scoping() {
        let root = Rc::new(RefCell::new(Environment::new()));
        root.borrow_mut().define("x".into(), Value::Int(10));

        let local = Environment::with_parent(root.clone());
        // Local can see the root binding
        assert_eq!(local.get("x"), Some(Value::Int(10)));
    }

    #[test]
    fn test_shadowing() {
        let root = Rc::new(RefCell::new(Environment::new()));
        root.borrow_mut().define("x".into(), Value::Int(10));

        let mut local = Environment::with_parent(root.clone());
        local.define("x".into(), Value::Int(20));

        // Local shadows root
        assert_eq!(local.get("x"), Some(Value::Int(20)));
        // Root unchanged
        assert_eq!(root.borrow().get("x"), Some(Value::Int(10)));
    }

    #[test]
    fn test_binding_writes_innermost_frame_only() {
        let root = Rc::new(RefCell::new(Environment::new()));
        let mut local = Environment::with_parent(root.clone());
        local.define("y".into(), Value::Int(1));

        assert_eq!(root.borrow().get("y"), None);
        assert_eq!(local.get("y"), Some(Value::Int(1)));
    }
}
