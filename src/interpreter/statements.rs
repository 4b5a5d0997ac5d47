//! Statement execution implementation
//!
//! This module handles the execution of the statement forms that are not loops
//! or function bindings:
//!
//! - Variable declarations (scalars and arrays)
//! - Blocks and unscoped statement lists
//! - `if`/`else`
//! - `return`, `break` and `continue`
//! - Intrinsic calls and expression statements
//!
//! # Implementation
//!
//! All statement execution methods are implemented as `pub(crate)` methods
//! on the [`Interpreter`] struct, allowing them to access and modify the
//! interpreter's state (scopes, terminal, call depth).
//!
//! # Control Flow
//!
//! Every method returns a [`ControlFlow`]. `break`, `continue` and `return`
//! only produce a value here; the enclosing loop or call frame acts on it.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Binding, Symbol, Value, Variable};
use crate::parser::ast::*;

impl<'a> Interpreter<'a> {
    /// Execute a single statement
    pub(crate) fn execute_statement(&mut self, stmt: &'a Stmt) -> Result<ControlFlow, RuntimeError> {
        match stmt {
            Stmt::VarDecl {
                name,
                type_name,
                array_size,
                location,
            } => {
                self.execute_var_decl(name, type_name, array_size.as_ref(), *location)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::FunctionDecl {
                name,
                return_type,
                params,
                location,
            } => {
                self.declare_function(name, return_type, params, *location)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::FunctionDef {
                name,
                params,
                body,
                location,
                ..
            } => {
                self.define_function(name, params, body, *location)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Block { statements, .. } => self.execute_block(statements),

            // Declaration chains and declaration/definition pairs share the enclosing scope
            Stmt::Statements(statements) => self.execute_statements(statements),

            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => self.execute_if(condition, then_branch, else_branch),

            Stmt::While {
                condition, body, ..
            } => self.execute_while(condition, body),

            Stmt::For {
                init,
                condition,
                increment,
                body,
                ..
            } => self.execute_for(init, condition, increment, body),

            Stmt::Break { .. } => Ok(ControlFlow::Break),

            Stmt::Continue { .. } => Ok(ControlFlow::Continue),

            Stmt::Return { expr, .. } => {
                let value = match expr {
                    Some(expr) => self.evaluate_expr(expr)?,
                    None => Value::Void,
                };
                Ok(ControlFlow::Return(value))
            }

            Stmt::Intrinsic {
                name,
                args,
                location,
            } => {
                self.call_intrinsic(name, args, *location)?;
                Ok(ControlFlow::Normal)
            }

            Stmt::Expression(expr) => {
                self.evaluate_expr(expr)?;
                Ok(ControlFlow::Normal)
            }
        }
    }

    /// Bind a fresh variable in the current scope.
    ///
    /// Arrays with a size start as that many uninitialized elements, up to
    /// `max_array_len`; everything else starts uninitialized until its
    /// initializer (a separate assignment statement) runs.
    pub(crate) fn execute_var_decl(
        &mut self,
        name: &str,
        type_name: &str,
        array_size: Option<&Expr>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let mut variable = Variable::new(type_name);

        if let Some(size_expr) = array_size {
            let size = self.evaluate_int(size_expr)?;
            if size < 0 {
                return Err(RuntimeError::InvalidArraySize {
                    name: name.to_string(),
                    size,
                    location,
                });
            }
            let len = size as usize;
            if len > self.config.max_array_len {
                return Err(RuntimeError::ArrayTooLarge {
                    name: name.to_string(),
                    requested: len,
                    limit: self.config.max_array_len,
                    location,
                });
            }
            variable.value = Value::Array(vec![Value::Uninitialized; len]);
        }

        let bound = self.scopes.add_symbol(
            self.current_scope,
            Symbol::variable(name),
            Binding::Variable(variable),
        );
        if !bound {
            return Err(RuntimeError::Redeclaration {
                name: name.to_string(),
                location,
            });
        }
        Ok(())
    }

    /// Execute `{ ... }` in a child of the current scope
    pub(crate) fn execute_block(
        &mut self,
        statements: &'a [Stmt],
    ) -> Result<ControlFlow, RuntimeError> {
        let parent = self.current_scope;
        self.in_scope(parent, |this| this.execute_statements(statements))
    }

    pub(crate) fn execute_if(
        &mut self,
        condition: &'a Expr,
        then_branch: &'a Stmt,
        else_branch: &'a Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        if self.evaluate_condition(condition)? {
            self.execute_statement(then_branch)
        } else {
            self.execute_statement(else_branch)
        }
    }

    /// Evaluate `condition` and test it for truthiness
    pub(crate) fn evaluate_condition(&mut self, condition: &Expr) -> Result<bool, RuntimeError> {
        let value = self.evaluate_expr(condition)?;
        Self::value_to_bool(&value, condition.location())
    }
}
