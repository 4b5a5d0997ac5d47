//! Lexical scopes
//!
//! Scopes live in an arena addressed by [`ScopeId`], the global scope at index
//! 0. Each scope records the index of its enclosing scope; lookups walk that
//! chain from the starting scope outward and fail only after the global scope.
//!
//! Scopes are pushed and popped in stack order: blocks push a child of the
//! current scope, calls push a child of the global scope, and both pop what
//! they pushed before returning.

use super::symbol::{Binding, Symbol};
use rustc_hash::FxHashMap;

/// Index of a scope in the [`ScopeArena`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const GLOBAL: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone)]
struct Scope<'a> {
    symbols: FxHashMap<Symbol, Binding<'a>>,
    parent: Option<ScopeId>,
}

impl<'a> Scope<'a> {
    fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            symbols: FxHashMap::default(),
            parent,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScopeArena<'a> {
    scopes: Vec<Scope<'a>>,
}

impl<'a> ScopeArena<'a> {
    /// Arena holding only the global scope
    pub fn new() -> Self {
        ScopeArena {
            scopes: vec![Scope::new(None)],
        }
    }

    pub fn global(&self) -> ScopeId {
        ScopeId::GLOBAL
    }

    /// Number of live scopes, the global scope included
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Open a new scope chained to `parent`
    pub fn push(&mut self, parent: ScopeId) -> ScopeId {
        debug_assert!(parent.0 < self.scopes.len(), "parent scope is not live");
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(Some(parent)));
        log::trace!("push scope {} (parent {})", id.0, parent.0);
        id
    }

    /// Close `id`, which must be the most recently pushed scope
    pub fn pop(&mut self, id: ScopeId) {
        assert!(
            id.0 != 0 && id.0 + 1 == self.scopes.len(),
            "scope {} popped out of order",
            id.0
        );
        self.scopes.pop();
        log::trace!("pop scope {}", id.0);
    }

    /// Bind `symbol` in `scope` unless it is already bound there.
    ///
    /// Returns `false` and leaves the scope untouched on a duplicate. Bindings
    /// in enclosing scopes do not count; they are shadowed.
    pub fn add_symbol(&mut self, scope: ScopeId, symbol: Symbol, binding: Binding<'a>) -> bool {
        let symbols = &mut self.scopes[scope.0].symbols;
        if symbols.contains_key(&symbol) {
            return false;
        }
        symbols.insert(symbol, binding);
        true
    }

    /// Innermost scope at or above `scope` binding `symbol`
    fn find(&self, scope: ScopeId, symbol: &Symbol) -> Option<ScopeId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let record = &self.scopes[id.0];
            if record.symbols.contains_key(symbol) {
                return Some(id);
            }
            current = record.parent;
        }
        None
    }

    pub fn resolve(&self, scope: ScopeId, symbol: &Symbol) -> Option<&Binding<'a>> {
        let id = self.find(scope, symbol)?;
        self.scopes[id.0].symbols.get(symbol)
    }

    pub fn resolve_mut(&mut self, scope: ScopeId, symbol: &Symbol) -> Option<&mut Binding<'a>> {
        let id = self.find(scope, symbol)?;
        self.scopes[id.0].symbols.get_mut(symbol)
    }
}

impl Default for ScopeArena<'_> {
    fn default() -> Self {
        Self::new()
    }
}
