//! Tree-walking interpreter
//!
//! This module provides the core execution logic:
//! - [`engine`]: [`Interpreter`], its configuration and the [`ControlFlow`] result
//! - [`errors`]: Runtime error types
//! - [`constants`]: Entry point, intrinsic names and default limits
//!
//! Execution methods are split across private modules with `impl Interpreter`
//! blocks: statements, loops, calls, expressions, operators and built-ins.
//!
//! # Execution Model
//!
//! The interpreter first runs every top-level statement in the global scope,
//! which binds function signatures, attaches bodies and initializes globals.
//! It then calls `main()` and returns its value.
//!
//! Every statement executor returns a [`ControlFlow`]; `break`, `continue`
//! and `return` travel upward as values until a loop or call frame handles
//! them. Nothing unwinds.
//!
//! # Built-in Functions
//!
//! `printf` is handled by the interpreter itself and writes to the
//! [`Terminal`](crate::terminal::Terminal) rather than to stdout.

pub mod constants;
pub mod engine;
pub mod errors;

mod builtins;
mod calls;
mod expressions;
mod loops;
mod ops;
mod statements;

pub use engine::{ControlFlow, Interpreter, InterpreterConfig};
pub use errors::RuntimeError;
