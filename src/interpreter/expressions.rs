//! Expression evaluation
//!
//! Literals, variable reads and writes, array literals and element access.
//! Operators are in `ops` and calls in `calls`; this module only dispatches.

use crate::interpreter::engine::Interpreter;
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Binding, Symbol, Value, Variable};
use crate::parser::ast::{Expr, SourceLocation};

impl<'a> Interpreter<'a> {
    /// Evaluate an expression to a value
    pub(crate) fn evaluate_expr(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::IntLiteral(n, _) => Ok(Value::Int(*n)),

            Expr::CharLiteral(c, _) => Ok(Value::Char(*c)),

            Expr::StringLiteral(s, _) => Ok(Value::Str(s.clone())),

            Expr::Variable(name, location) => self.read_variable(name, *location),

            Expr::BinaryOp {
                op,
                left,
                right,
                location,
            } => {
                let left = self.evaluate_expr(left)?;
                let right = self.evaluate_expr(right)?;
                Self::binary_op(*op, &left, &right, *location)
            }

            Expr::UnaryOp {
                op,
                operand,
                location,
            } => {
                let operand = self.evaluate_expr(operand)?;
                Self::unary_op(*op, &operand, *location)
            }

            Expr::Assignment {
                name,
                value,
                location,
            } => {
                let value = self.evaluate_expr(value)?;
                self.assign_variable(name, value, *location)
            }

            Expr::ArrayAssignment {
                name,
                index,
                value,
                location,
            } => {
                let index = self.evaluate_int(index)?;
                let value = self.evaluate_expr(value)?;
                Self::check_assignable(&value, *location)?;
                *self.element_mut(name, index, *location)? = value.clone();
                Ok(value)
            }

            Expr::FunctionCall {
                name,
                args,
                location,
            } => self.call_function(name, args, *location),

            Expr::ArrayLiteral { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    let value = self.evaluate_expr(element)?;
                    Self::check_assignable(&value, element.location())?;
                    values.push(value);
                }
                Ok(Value::Array(values))
            }

            Expr::ArrayAccess {
                name,
                index,
                location,
            } => {
                let index = self.evaluate_int(index)?;
                self.read_element(name, index, *location)
            }
        }
    }

    /// Evaluate an expression that must produce an int (chars promote)
    pub(crate) fn evaluate_int(&mut self, expr: &Expr) -> Result<i32, RuntimeError> {
        let value = self.evaluate_expr(expr)?;
        value.as_int().ok_or_else(|| RuntimeError::TypeError {
            expected: "int".to_string(),
            got: value.type_name().to_string(),
            location: expr.location(),
        })
    }

    /// Store `value` in `name`.
    ///
    /// A variable holding an array keeps its length: a shorter array fills the
    /// leading elements and leaves the rest uninitialized, a longer one is an
    /// error.
    fn assign_variable(
        &mut self,
        name: &str,
        mut value: Value,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        Self::check_assignable(&value, location)?;
        let variable = self.variable_mut(name, location)?;

        if let (Value::Array(current), Value::Array(elements)) = (&variable.value, &mut value) {
            let len = current.len();
            if elements.len() > len {
                return Err(RuntimeError::ArrayLengthMismatch {
                    name: name.to_string(),
                    len,
                    got: elements.len(),
                    location,
                });
            }
            elements.resize(len, Value::Uninitialized);
        }

        variable.value = value.clone();
        Ok(value)
    }

    fn read_variable(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        let variable = self.variable(name, location)?;
        if !variable.value.is_initialized() {
            return Err(RuntimeError::UninitializedRead {
                name: name.to_string(),
                location,
            });
        }
        Ok(variable.value.clone())
    }

    fn variable(&self, name: &str, location: SourceLocation) -> Result<&Variable, RuntimeError> {
        match self.scopes.resolve(self.current_scope, &Symbol::variable(name)) {
            Some(Binding::Variable(variable)) => Ok(variable),
            _ => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            }),
        }
    }

    fn variable_mut(
        &mut self,
        name: &str,
        location: SourceLocation,
    ) -> Result<&mut Variable, RuntimeError> {
        match self
            .scopes
            .resolve_mut(self.current_scope, &Symbol::variable(name))
        {
            Some(Binding::Variable(variable)) => Ok(variable),
            _ => Err(RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            }),
        }
    }

    fn read_element(
        &self,
        name: &str,
        index: i32,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let elements = match &self.variable(name, location)?.value {
            Value::Array(elements) => elements,
            other => return Err(Self::not_an_array(name, other, location)),
        };
        let element = Self::checked_index(name, elements.len(), index, location)
            .map(|i| &elements[i])?;

        if !element.is_initialized() {
            return Err(RuntimeError::UninitializedRead {
                name: format!("{}[{}]", name, index),
                location,
            });
        }
        Ok(element.clone())
    }

    fn element_mut(
        &mut self,
        name: &str,
        index: i32,
        location: SourceLocation,
    ) -> Result<&mut Value, RuntimeError> {
        match &mut self.variable_mut(name, location)?.value {
            Value::Array(elements) => {
                let i = Self::checked_index(name, elements.len(), index, location)?;
                Ok(&mut elements[i])
            }
            other => Err(Self::not_an_array(name, other, location)),
        }
    }

    fn checked_index(
        name: &str,
        len: usize,
        index: i32,
        location: SourceLocation,
    ) -> Result<usize, RuntimeError> {
        usize::try_from(index)
            .ok()
            .filter(|&i| i < len)
            .ok_or_else(|| RuntimeError::IndexOutOfBounds {
                name: name.to_string(),
                index,
                len,
                location,
            })
    }

    fn not_an_array(name: &str, value: &Value, location: SourceLocation) -> RuntimeError {
        if value.is_initialized() {
            RuntimeError::TypeError {
                expected: "array".to_string(),
                got: value.type_name().to_string(),
                location,
            }
        } else {
            RuntimeError::UninitializedRead {
                name: name.to_string(),
                location,
            }
        }
    }

    /// A void call result cannot be stored
    fn check_assignable(value: &Value, location: SourceLocation) -> Result<(), RuntimeError> {
        match value {
            Value::Void => Err(RuntimeError::TypeError {
                expected: "value".to_string(),
                got: value.type_name().to_string(),
                location,
            }),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::interpreter::errors::RuntimeError;
    use crate::interpreter::Interpreter;
    use crate::memory::Value;
    use crate::parser::parse_source;

    fn run_main(body: &str) -> Result<Value, RuntimeError> {
        let program = parse_source(&format!("int main() {{ {} }}", body)).expect("parse failed");
        Interpreter::new(&program).interpret()
    }

    #[test]
    fn test_chained_assignment() {
        assert_eq!(
            run_main("int a; int b; a = b = 1; return a * 10 + b;"),
            Ok(Value::Int(11))
        );
    }

    #[test]
    fn test_assignment_is_an_expression() {
        assert_eq!(run_main("int x; return (x = 4) + x;"), Ok(Value::Int(8)));
    }

    #[test]
    fn test_undefined_variable() {
        match run_main("y = 3; return 0;") {
            Err(RuntimeError::UndefinedVariable { name, .. }) => assert_eq!(name, "y"),
            other => panic!("Expected UndefinedVariable, got {:?}", other),
        }
    }

    #[test]
    fn test_char_values() {
        assert_eq!(run_main("char c = 'A'; return c + 1;"), Ok(Value::Int(66)));
        assert_eq!(run_main("char c = 'z'; return c;"), Ok(Value::Char('z')));
    }

    #[test]
    fn test_array_literal_and_access() {
        assert_eq!(
            run_main("int xs[] = {4, 5, 6}; return xs[0] + xs[2];"),
            Ok(Value::Int(10))
        );
    }

    #[test]
    fn test_array_element_assignment() {
        assert_eq!(
            run_main("int xs[3]; xs[1] = 7; xs[0] = xs[1] * 2; return xs[0];"),
            Ok(Value::Int(14))
        );
    }

    #[test]
    fn test_index_out_of_bounds() {
        match run_main("int xs[] = {1, 2}; return xs[2];") {
            Err(RuntimeError::IndexOutOfBounds { name, index, len, .. }) => {
                assert_eq!(name, "xs");
                assert_eq!(index, 2);
                assert_eq!(len, 2);
            }
            other => panic!("Expected IndexOutOfBounds, got {:?}", other),
        }
        assert!(matches!(
            run_main("int xs[2]; xs[-1] = 0; return 0;"),
            Err(RuntimeError::IndexOutOfBounds { index: -1, .. })
        ));
    }

    #[test]
    fn test_uninitialized_element() {
        assert!(matches!(
            run_main("int xs[2]; xs[0] = 1; return xs[1];"),
            Err(RuntimeError::UninitializedRead { ref name, .. }) if name == "xs[1]"
        ));
    }

    #[test]
    fn test_indexing_a_scalar() {
        assert!(matches!(
            run_main("int x = 1; return x[0];"),
            Err(RuntimeError::TypeError { .. })
        ));
    }

    #[test]
    fn test_arrays_are_copied_on_assignment() {
        assert_eq!(
            run_main("int a[] = {1, 2}; int b[] = a; b[0] = 9; return a[0];"),
            Ok(Value::Int(1))
        );
    }

    #[test]
    fn test_arrays_are_copied_into_calls() {
        let source = "
            int clobber(int xs[]) { xs[0] = 0; return xs[0]; }
            int main() { int xs[] = {5}; clobber(xs); return xs[0]; }";
        let program = parse_source(source).unwrap();
        assert_eq!(Interpreter::new(&program).interpret(), Ok(Value::Int(5)));
    }

    #[test]
    fn test_sized_array_keeps_its_length() {
        assert_eq!(
            run_main("int xs[3] = {1, 2}; xs[2] = 5; return xs[0] + xs[2];"),
            Ok(Value::Int(6))
        );
        assert!(matches!(
            run_main("int xs[3] = {1, 2}; return xs[2];"),
            Err(RuntimeError::UninitializedRead { ref name, .. }) if name == "xs[2]"
        ));
        match run_main("int xs[2] = {1, 2, 3}; return 0;") {
            Err(RuntimeError::ArrayLengthMismatch { name, len, got, .. }) => {
                assert_eq!(name, "xs");
                assert_eq!(len, 2);
                assert_eq!(got, 3);
            }
            other => panic!("Expected ArrayLengthMismatch, got {:?}", other),
        }
    }
}
