//! Scope stack
//!
//!     A stack of name sets. The bottom set is the root scope, which lives for the whole walk
//!     and can never be popped. Lookups search every active scope, so a name declared by an
//!     enclosing function or class still counts as a variable inside nested scopes. This is
//!     deliberately broader than real lexical shadowing.
//!
//!     The stack keeps a [`ScopeTrace`] of everything that happened to it, which is how the
//!     open/close balance of a walk is checked.

use serde::Serialize;
use std::collections::HashSet;

/// Counters recorded while a stack is in use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScopeTrace {
    pub opened: usize,
    pub closed: usize,
    pub max_depth: usize,
    pub declared: usize,
    /// Close events that found only the root scope left.
    pub unmatched_closes: usize,
}

impl ScopeTrace {
    /// Every open had its close and no close came without an open.
    pub fn is_balanced(&self) -> bool {
        self.opened == self.closed && self.unmatched_closes == 0
    }
}

#[derive(Debug, Clone)]
pub struct ScopeStack<'src> {
    scopes: Vec<HashSet<&'src str>>,
    trace: ScopeTrace,
}

impl<'src> ScopeStack<'src> {
    /// A stack holding only the root scope.
    pub fn new() -> Self {
        ScopeStack {
            scopes: vec![HashSet::new()],
            trace: ScopeTrace {
                max_depth: 1,
                ..ScopeTrace::default()
            },
        }
    }

    pub fn push(&mut self) {
        self.scopes.push(HashSet::new());
        self.trace.opened += 1;
        self.trace.max_depth = self.trace.max_depth.max(self.scopes.len());
    }

    /// Close the innermost scope. Returns false, and leaves the root in place, when only the
    /// root scope is left.
    pub fn pop(&mut self) -> bool {
        if self.scopes.len() > 1 {
            self.scopes.pop();
            self.trace.closed += 1;
            true
        } else {
            self.trace.unmatched_closes += 1;
            false
        }
    }

    /// Add `name` to the innermost scope. Declaring a name twice is a no-op.
    pub fn declare(&mut self, name: &'src str) {
        if let Some(scope) = self.scopes.last_mut() {
            if scope.insert(name) {
                self.trace.declared += 1;
            }
        }
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name))
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn trace(&self) -> ScopeTrace {
        self.trace
    }
}

impl Default for ScopeStack<'_> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_scope_always_present() {
        let mut stack = ScopeStack::new();
        assert_eq!(stack.depth(), 1);
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.trace().unmatched_closes, 1);
    }

    #[test]
    fn test_names_visible_in_nested_scopes() {
        let mut stack = ScopeStack::new();
        stack.declare("outer");
        stack.push();
        stack.declare("inner");
        assert!(stack.is_declared("outer"));
        assert!(stack.is_declared("inner"));

        assert!(stack.pop());
        assert!(stack.is_declared("outer"));
        assert!(!stack.is_declared("inner"));
    }

    #[test]
    fn test_redeclaration_is_idempotent() {
        let mut stack = ScopeStack::new();
        stack.declare("x");
        stack.declare("x");
        assert_eq!(stack.trace().declared, 1);

        // Shadowing in a nested scope is a separate entry
        stack.push();
        stack.declare("x");
        assert_eq!(stack.trace().declared, 2);
        stack.pop();
        assert!(stack.is_declared("x"));
    }

    #[test]
    fn test_trace_balance() {
        let mut stack = ScopeStack::new();
        stack.push();
        stack.push();
        stack.pop();
        assert!(!stack.trace().is_balanced());
        stack.pop();

        let trace = stack.trace();
        assert!(trace.is_balanced());
        assert_eq!(trace.opened, 2);
        assert_eq!(trace.max_depth, 3);
    }
}
