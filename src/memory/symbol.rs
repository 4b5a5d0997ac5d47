//! Symbols and the bindings they name
//!
//! Functions are keyed by name and parameter count, never by parameter types,
//! so `f()` and `f(int a)` are two distinct signatures while `f(int a)` and
//! `f(char c)` are the same one.

use super::value::Value;
use crate::parser::ast::{Param, Stmt};
use std::fmt;

/// Key of a scope entry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Variable(String),
    Function { name: String, arity: usize },
}

impl Symbol {
    pub fn variable(name: impl Into<String>) -> Self {
        Symbol::Variable(name.into())
    }

    pub fn function(name: impl Into<String>, arity: usize) -> Self {
        Symbol::Function {
            name: name.into(),
            arity,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Variable(name) => f.write_str(name),
            Symbol::Function { name, arity } => write!(f, "{}/{}", name, arity),
        }
    }
}

/// A bound variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub type_name: String,
    pub value: Value,
}

impl Variable {
    /// A freshly declared variable holding the uninitialized sentinel
    pub fn new(type_name: impl Into<String>) -> Self {
        Variable {
            type_name: type_name.into(),
            value: Value::Uninitialized,
        }
    }
}

/// A bound function signature. `body` is `None` until the definition is seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Function<'a> {
    pub return_type: String,
    pub params: &'a [Param],
    pub body: Option<&'a [Stmt]>,
}

impl<'a> Function<'a> {
    pub fn declared(return_type: impl Into<String>, params: &'a [Param]) -> Self {
        Function {
            return_type: return_type.into(),
            params,
            body: None,
        }
    }

    pub fn is_defined(&self) -> bool {
        self.body.is_some()
    }

    /// Attach the definition. Returns `false` if a body was already set.
    pub fn define(&mut self, params: &'a [Param], body: &'a [Stmt]) -> bool {
        if self.body.is_some() {
            return false;
        }
        self.params = params;
        self.body = Some(body);
        true
    }
}

/// What a symbol is bound to
#[derive(Debug, Clone, PartialEq)]
pub enum Binding<'a> {
    Variable(Variable),
    Function(Function<'a>),
}
