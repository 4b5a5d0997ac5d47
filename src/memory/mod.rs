//! Memory model for the interpreter
//!
//! This module provides the core memory abstractions:
//! - [`value`]: Runtime value representation (Int, Char, Str, Array, Void)
//! - [`symbol`]: Scope keys and the variables/functions they bind
//! - [`scope`]: Index-addressed arena of lexical scopes
//!
//! # Function Signatures
//!
//! Functions are bound under `(name, arity)`. Overloading on parameter count
//! is therefore allowed; overloading on parameter types is not.

pub mod scope;
pub mod symbol;
pub mod value;

pub use scope::{ScopeArena, ScopeId};
pub use symbol::{Binding, Function, Symbol, Variable};
pub use value::Value;
