//! Loop statement execution (`while`, `for`).
//!
//! Adds `impl Interpreter` methods for the two loop forms supported by the
//! C subset. `break` and `continue` are folded into a `LoopBodyResult` so
//! the loop driver can react without matching on every `ControlFlow` variant.
//!
//! `return` inside a loop body yields `LoopBodyResult::Exit`, which causes the
//! loop to unwind immediately and hand the `ControlFlow` to the enclosing
//! call frame.

use crate::interpreter::engine::{ControlFlow, Interpreter};
use crate::interpreter::errors::RuntimeError;
use crate::parser::ast::{Expr, Stmt};

/// Result returned by [`Interpreter::execute_loop_body`] to signal how the body ended.
pub(crate) enum LoopBodyResult {
    /// Body completed normally or via `continue`; the loop should iterate again.
    Continue,
    /// `break` was encountered; the loop should exit cleanly.
    Break,
    /// `return` was executed; the loop driver should unwind with this flow.
    Exit(ControlFlow),
}

impl<'a> Interpreter<'a> {
    /// Executes one iteration of `body` inside a fresh scope.
    pub(crate) fn execute_loop_body(
        &mut self,
        body: &'a Stmt,
    ) -> Result<LoopBodyResult, RuntimeError> {
        let parent = self.current_scope;
        let flow = self.in_scope(parent, |this| this.execute_statement(body))?;

        Ok(match flow {
            ControlFlow::Normal | ControlFlow::Continue => LoopBodyResult::Continue,
            ControlFlow::Break => LoopBodyResult::Break,
            flow @ ControlFlow::Return(_) => LoopBodyResult::Exit(flow),
        })
    }

    /// Executes a `while (condition) body` loop.
    ///
    /// The condition is evaluated before each iteration.
    pub(crate) fn execute_while(
        &mut self,
        condition: &'a Expr,
        body: &'a Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        while self.evaluate_condition(condition)? {
            match self.execute_loop_body(body)? {
                LoopBodyResult::Continue => {}
                LoopBodyResult::Break => break,
                LoopBodyResult::Exit(flow) => return Ok(flow),
            }
        }

        Ok(ControlFlow::Normal)
    }

    /// Executes a `for (init; condition; increment) body` loop.
    ///
    /// `init` runs once in the enclosing scope, so a counter declared there is
    /// still bound after the loop. The condition and increment run in that same
    /// scope; `continue` still runs the increment.
    pub(crate) fn execute_for(
        &mut self,
        init: &'a Stmt,
        condition: &'a Expr,
        increment: &'a Expr,
        body: &'a Stmt,
    ) -> Result<ControlFlow, RuntimeError> {
        self.execute_statement(init)?;

        while self.evaluate_condition(condition)? {
            match self.execute_loop_body(body)? {
                LoopBodyResult::Continue => {}
                LoopBodyResult::Break => break,
                LoopBodyResult::Exit(flow) => return Ok(flow),
            }
            self.evaluate_expr(increment)?;
        }

        Ok(ControlFlow::Normal)
    }
}
