//! Runtime error types for the interpreter
//!
//! This module defines [`RuntimeError`], which represents all errors that can occur
//! during program execution (as opposed to lex or parse errors).
//!
//! All runtime errors are fatal - they halt execution immediately. Every variant
//! carries the location of the node that failed.

use crate::parser::ast::SourceLocation;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Variable name not bound in any enclosing scope
    #[error("Undefined variable '{name}' at {location}")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// No function with this name takes this many arguments
    #[error("Undefined function '{name}' taking {arity} argument(s) at {location}")]
    UndefinedFunction {
        name: String,
        arity: usize,
        location: SourceLocation,
    },

    /// Function declared but never given a body
    #[error("Function '{name}' taking {arity} argument(s) is declared but not defined at {location}")]
    FunctionNotDefined {
        name: String,
        arity: usize,
        location: SourceLocation,
    },

    /// Definition without a prior declaration of the same signature
    #[error("Definition of '{name}' taking {arity} argument(s) has no matching declaration at {location}")]
    UnmatchedDefinition {
        name: String,
        arity: usize,
        location: SourceLocation,
    },

    /// Second body for the same signature
    #[error("Function '{name}' taking {arity} argument(s) is already defined at {location}")]
    FunctionRedefinition {
        name: String,
        arity: usize,
        location: SourceLocation,
    },

    /// Name already bound in the current scope
    #[error("Redeclaration of '{name}' at {location}")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Attempted to read an uninitialized variable or array element
    #[error("Read from uninitialized variable '{name}' at {location}")]
    UninitializedRead {
        name: String,
        location: SourceLocation,
    },

    /// Operand of the wrong kind
    #[error("Type error at {location}: expected {expected}, got {got}")]
    TypeError {
        expected: String,
        got: String,
        location: SourceLocation,
    },

    /// Division or remainder by zero
    #[error("Division by zero in '{operation}' at {location}")]
    DivisionByZero {
        operation: String,
        location: SourceLocation,
    },

    /// Integer overflow in arithmetic operation
    #[error("Integer overflow in operation: {operation} at {location}")]
    IntegerOverflow {
        operation: String,
        location: SourceLocation,
    },

    /// Array index outside `0..len`
    #[error("Index {index} out of bounds for '{name}' of length {len} at {location}")]
    IndexOutOfBounds {
        name: String,
        index: i32,
        len: usize,
        location: SourceLocation,
    },

    /// Negative array size in a declaration
    #[error("Invalid array size {size} for '{name}' at {location}")]
    InvalidArraySize {
        name: String,
        size: i32,
        location: SourceLocation,
    },

    /// Array larger than `InterpreterConfig::max_array_len`
    #[error("Array '{name}' of {requested} elements exceeds the limit of {limit} at {location}")]
    ArrayTooLarge {
        name: String,
        requested: usize,
        limit: usize,
        location: SourceLocation,
    },

    /// Array value longer than the array variable it is stored in
    #[error("Cannot store {got} elements in '{name}' of length {len} at {location}")]
    ArrayLengthMismatch {
        name: String,
        len: usize,
        got: usize,
        location: SourceLocation,
    },

    /// Intrinsic called without its required first argument
    #[error("Intrinsic '{name}' requires at least one argument at {location}")]
    MissingIntrinsicArgument {
        name: String,
        location: SourceLocation,
    },

    /// Malformed printf format or missing argument
    #[error("Invalid printf format at {location}: {message}")]
    InvalidFormat {
        message: String,
        location: SourceLocation,
    },

    /// Call depth exceeded `InterpreterConfig::max_call_depth`
    #[error("Stack overflow calling '{name}' (limit {limit}) at {location}")]
    StackOverflow {
        name: String,
        limit: usize,
        location: SourceLocation,
    },
}

impl RuntimeError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::UndefinedFunction { location, .. }
            | RuntimeError::FunctionNotDefined { location, .. }
            | RuntimeError::UnmatchedDefinition { location, .. }
            | RuntimeError::FunctionRedefinition { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::UninitializedRead { location, .. }
            | RuntimeError::TypeError { location, .. }
            | RuntimeError::ArrayTooLarge { location, .. }
            | RuntimeError::ArrayLengthMismatch { location, .. }
            | RuntimeError::DivisionByZero { location, .. }
            | RuntimeError::IntegerOverflow { location, .. }
            | RuntimeError::IndexOutOfBounds { location, .. }
            | RuntimeError::InvalidArraySize { location, .. }
            | RuntimeError::MissingIntrinsicArgument { location, .. }
            | RuntimeError::InvalidFormat { location, .. }
            | RuntimeError::StackOverflow { location, .. } => Some(*location),
        }
    }
}
