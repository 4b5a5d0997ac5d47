//! Built-in function implementations
//!
//! This module provides the intrinsics that are handled directly by the
//! interpreter rather than being defined in user code.
//!
//! # Supported Built-ins
//!
//! - `printf(format, ...)`: Formatted output to terminal
//!
//! # Format Strings
//!
//! - `{}` is replaced by the next unconsumed argument
//! - `{N}` is replaced by argument `N`, counting from 0 after the format;
//!   it does not move the implicit counter
//! - `{{` and `}}` are literal braces
//!
//! Arguments are rendered as ints in decimal, chars as the character, strings
//! verbatim and arrays as `[a, b, c]`. Unused arguments are ignored.

use crate::interpreter::constants::PRINTF;
use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{Expr, SourceLocation};

impl Interpreter<'_> {
    /// Run an intrinsic call statement
    pub(crate) fn call_intrinsic(
        &mut self,
        name: &str,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        if args.is_empty() {
            return Err(RuntimeError::MissingIntrinsicArgument {
                name: name.to_string(),
                location,
            });
        }

        // Every argument is evaluated before anything is printed
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate_expr(arg)?);
        }

        match name {
            PRINTF => self.builtin_printf(&values, location),
            _ => Err(RuntimeError::UndefinedFunction {
                name: name.to_string(),
                arity: args.len(),
                location,
            }),
        }
    }

    fn builtin_printf(&mut self, args: &[Value], location: SourceLocation) -> Result<(), RuntimeError> {
        let format = match &args[0] {
            Value::Str(s) => s,
            other => {
                return Err(RuntimeError::TypeError {
                    expected: "format string".to_string(),
                    got: other.type_name().to_string(),
                    location,
                })
            }
        };

        let text = format_printf(format, &args[1..], location)?;
        self.terminal.print(&text, location);
        Ok(())
    }
}

/// Expand the placeholders in `format` with `args`
fn format_printf(format: &str, args: &[Value], location: SourceLocation) -> Result<String, RuntimeError> {
    let invalid = |message: String| RuntimeError::InvalidFormat { message, location };

    let mut output = String::with_capacity(format.len());
    let mut next_arg = 0;
    let mut chars = format.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                output.push('{');
            }
            '{' => {
                let mut digits = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) if c.is_ascii_digit() => digits.push(c),
                        Some(c) => return Err(invalid(format!("unexpected '{}' in placeholder", c))),
                        None => return Err(invalid("unterminated placeholder".to_string())),
                    }
                }

                let index = if digits.is_empty() {
                    next_arg += 1;
                    next_arg - 1
                } else {
                    digits
                        .parse::<usize>()
                        .map_err(|_| invalid(format!("argument index {} is too large", digits)))?
                };

                let value = args.get(index).ok_or_else(|| {
                    invalid(format!(
                        "missing argument {} ({} supplied)",
                        index,
                        args.len()
                    ))
                })?;
                render(value, &mut output, location)?;
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                output.push('}');
            }
            '}' => return Err(invalid("unmatched '}'".to_string())),
            c => output.push(c),
        }
    }

    Ok(output)
}

/// Append the printed form of `value`
fn render(value: &Value, output: &mut String, location: SourceLocation) -> Result<(), RuntimeError> {
    match value {
        Value::Int(n) => output.push_str(&n.to_string()),
        Value::Char(c) => output.push(*c),
        Value::Str(s) => output.push_str(s),
        Value::Array(elements) => {
            output.push('[');
            for (i, element) in elements.iter().enumerate() {
                if i > 0 {
                    output.push_str(", ");
                }
                render(element, output, location)?;
            }
            output.push(']');
        }
        Value::Void | Value::Uninitialized => {
            return Err(RuntimeError::TypeError {
                expected: "printable value".to_string(),
                got: value.type_name().to_string(),
                location,
            })
        }
    }
    Ok(())
}
