//! Parsing scopes.
//!
//! A small amount of state changes meaning as the parser moves into function
//! bodies and inline suites. Rather than keeping it in the parser as loose
//! flags, it's a [`Scope`] value on a stack, and a nested construct pushes a
//! modified copy then pops it when it's done.

/// The context a statement is being parsed in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    function: bool,
    suite: bool,
    after_semicolon: bool,
}

impl Scope {
    /// Are we in the body of a `def`?
    pub fn is_function(&self) -> bool {
        self.function
    }

    /// Are we in an inline suite, like the body of `if x: a; b`?
    pub fn is_suite(&self) -> bool {
        self.suite
    }

    /// Did the last statement on this line end with a `;`?
    pub fn is_after_semicolon(&self) -> bool {
        self.after_semicolon
    }

    pub fn with_suite(self) -> Scope {
        Scope {
            suite: true,
            ..self
        }
    }

    pub fn with_function(self) -> Scope {
        Scope {
            function: true,
            ..self
        }
    }
}

/// The stack of scopes. There's always at least the top-level scope.
#[derive(Debug)]
pub(crate) struct Scopes {
    stack: Vec<Scope>,
}

impl Scopes {
    pub(crate) fn new() -> Self {
        Scopes {
            stack: vec![Scope::default()],
        }
    }

    pub(crate) fn current(&self) -> Scope {
        self.stack.last().copied().unwrap_or_default()
    }

    pub(crate) fn set_after_semicolon(&mut self, after_semicolon: bool) {
        if let Some(scope) = self.stack.last_mut() {
            scope.after_semicolon = after_semicolon;
        }
    }

    pub(crate) fn push(&mut self, scope: Scope) {
        self.stack.push(scope);
    }

    pub(crate) fn pop(&mut self) {
        debug_assert!(self.stack.len() > 1, "popped the top-level scope");
        if self.stack.len() > 1 {
            self.stack.pop();
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_keep_other_flags() {
        let scope = Scope::default().with_function().with_suite();
        assert!(scope.is_function());
        assert!(scope.is_suite());
        assert!(!scope.is_after_semicolon());
    }

    #[test]
    fn push_and_pop() {
        let mut scopes = Scopes::new();
        scopes.push(scopes.current().with_suite());
        assert!(scopes.current().is_suite());
        assert_eq!(scopes.depth(), 2);

        scopes.set_after_semicolon(true);
        assert!(scopes.current().is_after_semicolon());

        scopes.pop();
        assert!(!scopes.current().is_suite());
        assert!(!scopes.current().is_after_semicolon());
    }
}
