// Execution engine for the interpreter

use crate::interpreter::constants::{DEFAULT_MAX_ARRAY_LEN, DEFAULT_MAX_CALL_DEPTH, ENTRY_POINT};
use crate::interpreter::errors::RuntimeError;
use crate::memory::{ScopeArena, ScopeId, Value};
use crate::parser::ast::{Program, SourceLocation, Stmt};
use crate::terminal::Terminal;

/// Interpreter limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterpreterConfig {
    /// Maximum number of nested function calls before `StackOverflow`
    pub max_call_depth: usize,
    /// Largest element count a single array may hold
    pub max_array_len: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            max_array_len: DEFAULT_MAX_ARRAY_LEN,
        }
    }
}

/// How a statement finished.
///
/// Loops intercept `Break` and `Continue`; call frames intercept `Return`.
/// Every statement-containing construct stops at the first non-`Normal` result
/// and hands it upward.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlFlow {
    Normal,
    Break,
    Continue,
    Return(Value),
}

/// Tree-walking interpreter over a parsed [`Program`]
pub struct Interpreter<'a> {
    /// Parsed program; function bodies are borrowed from it
    program: &'a Program,

    /// Every live scope, the global scope first
    pub(crate) scopes: ScopeArena<'a>,

    /// Scope that declarations and lookups start from
    pub(crate) current_scope: ScopeId,

    /// Mock terminal for printf output
    pub(crate) terminal: Terminal,

    pub(crate) config: InterpreterConfig,

    /// Number of user function calls in progress
    pub(crate) call_depth: usize,
}

impl<'a> Interpreter<'a> {
    /// Create a new interpreter for the parsed program
    pub fn new(program: &'a Program) -> Self {
        Self::with_config(program, InterpreterConfig::default())
    }

    pub fn with_config(program: &'a Program, config: InterpreterConfig) -> Self {
        Interpreter {
            program,
            scopes: ScopeArena::new(),
            current_scope: ScopeId::GLOBAL,
            terminal: Terminal::new(),
            config,
            call_depth: 0,
        }
    }

    /// Run the program: bind the top level, then call `main()`.
    ///
    /// Returns `main`'s return value. Each call starts from an empty global
    /// scope; output accumulates in [`Interpreter::terminal`].
    pub fn interpret(&mut self) -> Result<Value, RuntimeError> {
        self.scopes = ScopeArena::new();
        self.current_scope = self.scopes.global();
        self.call_depth = 0;

        let program = self.program;
        log::debug!("binding {} top-level statements", program.nodes.len());
        for node in &program.nodes {
            let flow = self.execute_statement(node)?;
            debug_assert_eq!(flow, ControlFlow::Normal);
        }

        log::debug!("calling {}()", ENTRY_POINT);
        let value = self.call_function(ENTRY_POINT, &[], SourceLocation::new(1, 1))?;
        log::debug!("{}() returned {}", ENTRY_POINT, value);
        Ok(value)
    }

    /// Captured intrinsic output
    pub fn terminal(&self) -> &Terminal {
        &self.terminal
    }

    pub fn terminal_mut(&mut self) -> &mut Terminal {
        &mut self.terminal
    }

    pub fn config(&self) -> &InterpreterConfig {
        &self.config
    }

    /// Run `f` inside a new scope chained to `parent`.
    ///
    /// The scope is popped and the previous current scope restored whether or
    /// not `f` succeeds.
    pub(crate) fn in_scope<T>(
        &mut self,
        parent: ScopeId,
        f: impl FnOnce(&mut Self) -> Result<T, RuntimeError>,
    ) -> Result<T, RuntimeError> {
        let scope = self.scopes.push(parent);
        let saved = std::mem::replace(&mut self.current_scope, scope);
        let result = f(self);
        self.current_scope = saved;
        self.scopes.pop(scope);
        result
    }

    /// Execute statements in order, stopping at the first control transfer
    pub(crate) fn execute_statements(
        &mut self,
        statements: &'a [Stmt],
    ) -> Result<ControlFlow, RuntimeError> {
        for stmt in statements {
            let flow = self.execute_statement(stmt)?;
            if flow != ControlFlow::Normal {
                return Ok(flow);
            }
        }
        Ok(ControlFlow::Normal)
    }

    /// Truthiness of a condition value: non-zero ints and chars
    pub(crate) fn value_to_bool(value: &Value, location: SourceLocation) -> Result<bool, RuntimeError> {
        match value.as_int() {
            Some(n) => Ok(n != 0),
            None => Err(RuntimeError::TypeError {
                expected: "int or char".to_string(),
                got: value.type_name().to_string(),
                location,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ast::Param;
    use crate::parser::parse_source;

    fn run(source: &str) -> Result<Value, RuntimeError> {
        let program = parse_source(source).expect("parse failed");
        Interpreter::new(&program).interpret()
    }

    #[test]
    fn test_main_return_value() {
        assert_eq!(run("int main() { return 42; }"), Ok(Value::Int(42)));
    }

    #[test]
    fn test_main_without_return_is_void() {
        assert_eq!(run("void main() { int x = 1; }"), Ok(Value::Void));
    }

    #[test]
    fn test_missing_main() {
        match run("int helper() { return 1; }") {
            Err(RuntimeError::UndefinedFunction { name, arity, .. }) => {
                assert_eq!(name, "main");
                assert_eq!(arity, 0);
            }
            other => panic!("Expected UndefinedFunction, got {:?}", other),
        }
    }

    #[test]
    fn test_main_with_parameters_is_not_the_entry_point() {
        assert!(matches!(
            run("int main(int argc) { return 0; }"),
            Err(RuntimeError::UndefinedFunction { .. })
        ));
    }

    #[test]
    fn test_globals_initialized_before_main() {
        let source = "int base = 10;\nint twice = base * 2;\nint main() { return twice + base; }";
        assert_eq!(run(source), Ok(Value::Int(30)));
    }

    #[test]
    fn test_interpret_can_run_twice() {
        let program = parse_source(
            "int counter = 0; int main() { counter = counter + 1; printf(\"{}\", counter); return counter; }",
        )
        .unwrap();
        let mut interpreter = Interpreter::new(&program);
        assert_eq!(interpreter.interpret(), Ok(Value::Int(1)));
        assert_eq!(interpreter.interpret(), Ok(Value::Int(1)));
        assert_eq!(interpreter.terminal().output(), "11");
    }

    #[test]
    fn test_definition_without_declaration() {
        // The parser always emits the declaration first, so build the tree by hand
        let location = SourceLocation::new(1, 1);
        let program = Program {
            nodes: vec![Stmt::FunctionDef {
                name: "main".to_string(),
                return_type: "int".to_string(),
                params: Vec::<Param>::new(),
                body: vec![],
                location,
            }],
        };
        assert!(matches!(
            Interpreter::new(&program).interpret(),
            Err(RuntimeError::UnmatchedDefinition { ref name, arity: 0, .. }) if name == "main"
        ));
    }

    #[test]
    fn test_scopes_are_released_after_errors() {
        let program = parse_source("int main() { { { return 1 / 0; } } }").unwrap();
        let mut interpreter = Interpreter::new(&program);
        assert!(matches!(
            interpreter.interpret(),
            Err(RuntimeError::DivisionByZero { .. })
        ));
        assert_eq!(interpreter.scopes.depth(), 1);
        assert_eq!(interpreter.current_scope, ScopeId::GLOBAL);
        assert_eq!(interpreter.call_depth, 0);
    }

    #[test]
    fn test_call_depth_limit() {
        let program = parse_source("int down(int n) { return down(n + 1); } int main() { return down(0); }")
            .unwrap();
        let config = InterpreterConfig {
            max_call_depth: 16,
            ..InterpreterConfig::default()
        };
        let mut interpreter = Interpreter::with_config(&program, config);
        assert_eq!(interpreter.config().max_call_depth, 16);
        match interpreter.interpret() {
            Err(RuntimeError::StackOverflow { name, limit, .. }) => {
                assert_eq!(name, "down");
                assert_eq!(limit, 16);
            }
            other => panic!("Expected StackOverflow, got {:?}", other),
        }
    }

    #[test]
    fn test_default_call_depth_stops_runaway_recursion() {
        // The recursive call sits under a loop and a block to cost extra host frames
        let program = parse_source(
            "int spin(int n) {
                while (n >= 0) {
                    {
                        if (n >= 0) return spin(n + 1);
                    }
                }
                return 0;
            }
            int main() { return spin(0); }",
        )
        .unwrap();
        let mut interpreter = Interpreter::new(&program);
        assert_eq!(*interpreter.config(), InterpreterConfig::default());
        match interpreter.interpret() {
            Err(RuntimeError::StackOverflow { name, limit, .. }) => {
                assert_eq!(name, "spin");
                assert_eq!(limit, DEFAULT_MAX_CALL_DEPTH);
            }
            other => panic!("Expected StackOverflow, got {:?}", other),
        }
    }
}
