//! Operator evaluation
//!
//! Arithmetic is checked 32-bit signed integer arithmetic; `char` operands
//! promote to their code point first. Comparisons produce `Int(1)` or `Int(0)`.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::Value;
use crate::parser::ast::{BinOp, SourceLocation, UnOp};

impl Interpreter<'_> {
    /// Apply a binary operator to two evaluated operands
    pub(crate) fn binary_op(
        op: BinOp,
        left: &Value,
        right: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let a = Self::coerce_to_int(op.symbol(), left, location)?;
        let b = Self::coerce_to_int(op.symbol(), right, location)?;

        let checked = match op {
            BinOp::Add => a.checked_add(b),
            BinOp::Sub => a.checked_sub(b),
            BinOp::Mul => a.checked_mul(b),
            BinOp::Div | BinOp::Mod => {
                if b == 0 {
                    return Err(RuntimeError::DivisionByZero {
                        operation: format!("{} {} {}", a, op.symbol(), b),
                        location,
                    });
                }
                // Only i32::MIN / -1 can fail here
                if op == BinOp::Div {
                    a.checked_div(b)
                } else {
                    a.checked_rem(b)
                }
            }
            BinOp::Eq => Some((a == b) as i32),
            BinOp::Ne => Some((a != b) as i32),
            BinOp::Lt => Some((a < b) as i32),
            BinOp::Le => Some((a <= b) as i32),
            BinOp::Gt => Some((a > b) as i32),
            BinOp::Ge => Some((a >= b) as i32),
        };

        checked
            .map(Value::Int)
            .ok_or_else(|| RuntimeError::IntegerOverflow {
                operation: format!("{} {} {}", a, op.symbol(), b),
                location,
            })
    }

    /// Apply a unary operator to an evaluated operand
    pub(crate) fn unary_op(
        op: UnOp,
        operand: &Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Neg => {
                let n = Self::coerce_to_int("-", operand, location)?;
                n.checked_neg()
                    .map(Value::Int)
                    .ok_or_else(|| RuntimeError::IntegerOverflow {
                        operation: format!("-({})", n),
                        location,
                    })
            }
        }
    }

    /// Helper to coerce numeric types (Char, Int) to i32
    #[inline]
    fn coerce_to_int(
        operator: &str,
        value: &Value,
        location: SourceLocation,
    ) -> Result<i32, RuntimeError> {
        value.as_int().ok_or_else(|| RuntimeError::TypeError {
            expected: format!("int or char operand for '{}'", operator),
            got: value.type_name().to_string(),
            location,
        })
    }
}
