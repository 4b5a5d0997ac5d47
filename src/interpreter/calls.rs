//! Function binding and call dispatch
//!
//! Functions are bound in the global scope under `(name, arity)`. A declaration
//! binds the signature; a definition attaches the body to an existing
//! declaration exactly once. Calls resolve the signature from the call site,
//! evaluate arguments in the caller's scope, and run the body in a fresh scope
//! chained to the global scope, so a callee never sees its caller's locals.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::memory::{Binding, Function, Symbol, Value, Variable};
use crate::parser::ast::{Expr, Param, SourceLocation, Stmt};

impl<'a> Interpreter<'a> {
    /// Bind a function signature. Repeated prototypes are accepted.
    pub(crate) fn declare_function(
        &mut self,
        name: &str,
        return_type: &str,
        params: &'a [Param],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let symbol = Symbol::function(name, params.len());
        let binding = Binding::Function(Function::declared(return_type, params));

        if !self.scopes.add_symbol(self.current_scope, symbol, binding) {
            log::debug!("repeated declaration of {}/{} at {}", name, params.len(), location);
        }
        Ok(())
    }

    /// Attach a body to the declared signature with the same name and arity
    pub(crate) fn define_function(
        &mut self,
        name: &str,
        params: &'a [Param],
        body: &'a [Stmt],
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let arity = params.len();
        let symbol = Symbol::function(name, arity);

        match self.scopes.resolve_mut(self.current_scope, &symbol) {
            Some(Binding::Function(function)) => {
                if function.define(params, body) {
                    Ok(())
                } else {
                    Err(RuntimeError::FunctionRedefinition {
                        name: name.to_string(),
                        arity,
                        location,
                    })
                }
            }
            _ => Err(RuntimeError::UnmatchedDefinition {
                name: name.to_string(),
                arity,
                location,
            }),
        }
    }

    /// Call the user function `name` with one value per argument expression
    pub(crate) fn call_function(
        &mut self,
        name: &str,
        args: &[Expr],
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        let arity = args.len();
        let (params, body) = match self
            .scopes
            .resolve(self.current_scope, &Symbol::function(name, arity))
        {
            Some(Binding::Function(function)) => (function.params, function.body),
            _ => {
                return Err(RuntimeError::UndefinedFunction {
                    name: name.to_string(),
                    arity,
                    location,
                })
            }
        };
        let Some(body) = body else {
            return Err(RuntimeError::FunctionNotDefined {
                name: name.to_string(),
                arity,
                location,
            });
        };

        // Arguments are evaluated left to right in the caller's scope
        let mut values = Vec::with_capacity(arity);
        for arg in args {
            values.push(self.evaluate_expr(arg)?);
        }

        if self.call_depth >= self.config.max_call_depth {
            return Err(RuntimeError::StackOverflow {
                name: name.to_string(),
                limit: self.config.max_call_depth,
                location,
            });
        }

        log::debug!("call {}/{} at {}", name, arity, location);
        self.call_depth += 1;
        let global = self.scopes.global();
        let result = self.in_scope(global, |this| {
            this.bind_arguments(params, values, location)?;
            this.execute_statements(body)
        });
        self.call_depth -= 1;

        match result? {
            ControlFlow::Return(value) => Ok(value),
            ControlFlow::Normal => Ok(Value::Void),
            flow @ (ControlFlow::Break | ControlFlow::Continue) => {
                unreachable!("{:?} escaped function '{}'", flow, name)
            }
        }
    }

    /// Bind each argument value to its parameter name in the current scope
    fn bind_arguments(
        &mut self,
        params: &[Param],
        values: Vec<Value>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        for (param, value) in params.iter().zip(values) {
            let variable = Variable {
                type_name: param.type_name.clone(),
                value,
            };
            let bound = self.scopes.add_symbol(
                self.current_scope,
                Symbol::variable(param.name.as_str()),
                Binding::Variable(variable),
            );
            if !bound {
                return Err(RuntimeError::Redeclaration {
                    name: param.name.clone(),
                    location,
                });
            }
        }
        Ok(())
    }
}
