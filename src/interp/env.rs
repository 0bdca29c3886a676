//! Lexically scoped variable environment
//!
//! A stack of scope frames: frame 0 holds the globals, the last frame is the
//! innermost active scope. Name resolution walks from the innermost frame
//! outward. Child frames reference their parent by stack position rather
//! than an owning edge, and block execution pushes and pops frames in strict
//! LIFO order, so a parent frame always outlives the frames nested in it.

use std::collections::HashMap;

use super::value::Value;

/// The scope chain
#[derive(Debug, Clone)]
pub struct Environment {
    scopes: Vec<HashMap<String, Value>>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            scopes: vec![HashMap::new()],
        }
    }

    /// Enter a nested scope.
    pub fn push_scope(&mut self) {
        self.scopes.push(HashMap::new());
    }

    /// Leave the innermost scope, discarding its bindings. The global frame
    /// is never popped.
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Bind `name` in the innermost scope. Redefining an existing name
    /// silently replaces it.
    pub fn define(&mut self, name: String, value: Value) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name, value);
        }
    }

    /// Resolve `name`, walking from the innermost scope out to the globals.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).cloned())
    }

    /// Overwrite the nearest existing binding of `name`, walking outward.
    /// Returns `false` when no scope in the chain has the name; assignment
    /// never creates a binding.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(name) {
                *slot = value;
                return true;
            }
        }
        false
    }

    /// Current depth of the scope stack, globals included.
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_define_and_get() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Number(1.0));
        assert_eq!(env.get("x"), Some(Value::Number(1.0)));
        assert_eq!(env.get("y"), None);
    }

    #[test]
    fn test_redefinition_replaces() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Number(1.0));
        env.define("x".to_string(), Value::Str("two".to_string()));
        assert_eq!(env.get("x"), Some(Value::Str("two".to_string())));
    }

    #[test]
    fn test_inner_scope_shadows() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Number(1.0));
        env.push_scope();
        env.define("x".to_string(), Value::Number(2.0));
        assert_eq!(env.get("x"), Some(Value::Number(2.0)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(Value::Number(1.0)));
    }

    #[test]
    fn test_assign_mutates_nearest_binding() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Number(1.0));
        env.push_scope();
        assert!(env.assign("x", Value::Number(5.0)));
        env.pop_scope();
        assert_eq!(env.get("x"), Some(Value::Number(5.0)));
    }

    #[test]
    fn test_assign_never_creates() {
        let mut env = Environment::new();
        assert!(!env.assign("ghost", Value::Nil));
        assert_eq!(env.get("ghost"), None);
    }

    #[test]
    fn test_global_frame_never_popped() {
        let mut env = Environment::new();
        env.define("x".to_string(), Value::Bool(true));
        env.pop_scope();
        assert_eq!(env.depth(), 1);
        assert_eq!(env.get("x"), Some(Value::Bool(true)));
    }
}
