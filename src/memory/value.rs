//! Runtime value representation
//!
//! This module defines the [`Value`] enum, which represents all possible runtime values
//! in the interpreter. Values are tagged and dynamically typed; there is no raw memory.
//!
//! # Value Types
//!
//! - [`Value::Int`]: 32-bit signed integer
//! - [`Value::Char`]: a single character, promoted to its code point in arithmetic
//! - [`Value::Str`]: string literal contents (only used as intrinsic arguments)
//! - [`Value::Array`]: array of values, copied on assignment
//! - [`Value::Void`]: result of a call or intrinsic that produces nothing
//! - [`Value::Uninitialized`]: Marker for a declared but never assigned variable
//!
//! # Initialization Tracking
//!
//! The `Uninitialized` variant enables detection of reads from uninitialized variables,
//! a common source of undefined behavior in C.

use std::fmt;

/// Runtime values in the interpreter
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    Int(i32),
    Char(char),
    Str(String),
    Array(Vec<Value>),
    Void,
    #[default]
    Uninitialized,
}

impl Value {
    /// Check if this value is initialized
    pub fn is_initialized(&self) -> bool {
        !matches!(self, Value::Uninitialized)
    }

    /// Numeric view: ints as-is, chars as their code point
    pub fn as_int(&self) -> Option<i32> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Char(c) => Some(*c as i32),
            _ => None,
        }
    }

    /// Short type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Array(_) => "array",
            Value::Void => "void",
            Value::Uninitialized => "uninitialized",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Char(c) => write!(f, "{}", c),
            Value::Str(s) => f.write_str(s),
            Value::Array(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Value::Void => f.write_str("void"),
            Value::Uninitialized => f.write_str("<uninitialized>"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_uninitialized() {
        assert_eq!(Value::default(), Value::Uninitialized);
        assert!(!Value::default().is_initialized());
        assert!(Value::Void.is_initialized());
    }

    #[test]
    fn test_char_promotes_to_code_point() {
        assert_eq!(Value::Char('A').as_int(), Some(65));
        assert_eq!(Value::Str("1".to_string()).as_int(), None);
    }

    #[test]
    fn test_display() {
        let nested = Value::Array(vec![
            Value::Int(1),
            Value::Char('x'),
            Value::Array(vec![Value::Int(-2)]),
        ]);
        assert_eq!(nested.to_string(), "[1, x, [-2]]");
        assert_eq!(Value::Array(vec![]).to_string(), "[]");
    }
}
