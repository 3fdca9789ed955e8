//! The scope chain.
//!
//! A [`Context`] maps names to values and links to an optional parent for
//! lexical lookup. Function bodies, loop bodies, and block-scoped
//! constructs each evaluate in a fresh [`Context::child`], so declarations
//! never leak outward. Closures keep a handle to their defining context,
//! which is how they observe later mutation of outer bindings: `assign`
//! mutates the scope that owns the binding, never a shadowing copy.

use crate::{Shared, Value};
use rustc_hash::FxHashMap;

/// Whether a binding can be reassigned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutability {
    /// `var` binding.
    Mutable,
    /// `define` binding.
    Immutable,
}

/// Why a declaration failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclareError {
    /// The name is already bound to a constant in the current scope.
    AlreadyDeclared,
}

/// Why an assignment failed.
///
/// Typed so callers can produce the correct diagnostic without string
/// matching.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignError {
    /// Binding exists but is immutable.
    Immutable,
    /// Binding not found in any scope.
    Undefined,
}

#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    mutability: Mutability,
}

#[derive(Debug, Default)]
struct ScopeData {
    bindings: FxHashMap<String, Binding>,
    parent: Option<Context>,
}

/// A shared handle to one scope in the chain.
///
/// Cloning a `Context` clones the handle, not the scope: all clones observe
/// the same bindings.
#[derive(Clone, Debug, Default)]
pub struct Context {
    scope: Shared<ScopeData>,
}

impl Context {
    /// A fresh root scope.
    pub fn new() -> Self {
        Context::default()
    }

    /// A new empty scope whose parent is `self`.
    #[must_use]
    pub fn child(&self) -> Self {
        Context {
            scope: Shared::new(ScopeData {
                bindings: FxHashMap::default(),
                parent: Some(self.clone()),
            }),
        }
    }

    /// Declare a binding in this scope.
    ///
    /// Shadowing an outer binding is allowed; re-declaring over a constant
    /// in the *current* scope is not.
    pub fn declare(
        &self,
        name: impl Into<String>,
        value: Value,
        mutability: Mutability,
    ) -> Result<(), DeclareError> {
        let name = name.into();
        let mut scope = self.scope.borrow_mut();
        if let Some(existing) = scope.bindings.get(&name) {
            if existing.mutability == Mutability::Immutable {
                return Err(DeclareError::AlreadyDeclared);
            }
        }
        scope.bindings.insert(name, Binding { value, mutability });
        Ok(())
    }

    /// Look up a name through the parent chain.
    pub fn lookup(&self, name: &str) -> Option<Value> {
        let scope = self.scope.borrow();
        if let Some(binding) = scope.bindings.get(name) {
            return Some(binding.value.clone());
        }
        scope.parent.as_ref().and_then(|p| p.lookup(name))
    }

    /// Mutate an existing binding wherever it lives.
    ///
    /// Same search order as [`lookup`](Context::lookup); the binding is
    /// updated in the scope that owns it.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), AssignError> {
        let mut scope = self.scope.borrow_mut();
        if let Some(binding) = scope.bindings.get_mut(name) {
            if binding.mutability == Mutability::Immutable {
                return Err(AssignError::Immutable);
            }
            binding.value = value;
            return Ok(());
        }
        match &scope.parent {
            Some(parent) => parent.assign(name, value),
            None => Err(AssignError::Undefined),
        }
    }

    /// Remove a binding wherever it lives. Returns whether one was found.
    pub fn remove(&self, name: &str) -> bool {
        let mut scope = self.scope.borrow_mut();
        if scope.bindings.remove(name).is_some() {
            return true;
        }
        match &scope.parent {
            Some(parent) => parent.remove(name),
            None => false,
        }
    }
}
