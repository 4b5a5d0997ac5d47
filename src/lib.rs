//! # Introduction
//!
//! minic lexes, parses and directly executes a small subset of C. There is no
//! code generation: the interpreter walks the syntax tree, keeping lexical
//! scopes in an arena and dispatching calls by function name and arity.
//!
//! ## Execution pipeline
//!
//! ```text
//! Source → Lexer → TokenStream → Parser → AST → Interpreter → Value + output
//! ```
//!
//! 1. [`parser`]: tokenises the (already preprocessed) source and builds an AST.
//! 2. [`interpreter`]: binds the top level, calls `main()`, and propagates
//!    `return`/`break`/`continue` as [`interpreter::ControlFlow`] values.
//! 3. [`memory`]: tagged [`memory::Value`]s, scope symbols and the
//!    [`memory::ScopeArena`].
//! 4. [`terminal`]: the [`terminal::Terminal`] that records `printf` output.
//!
//! Every stage fails fast: the first lex, parse or runtime error aborts the run
//! and is returned as an [`Error`].
//!
//! ## Supported C subset
//!
//! Types: any identifier (`int`, `char`, `void`, ...) and one-dimensional arrays.
//! Control flow: `if/else`, `while`, `for`, `break`, `continue`, `return`.
//! Operators: `+ - * / %`, `< <= > >= == !=`, unary `-`, `=`.
//! Built-ins: `printf` with `{}` placeholders.
//!
//! ```
//! let run = minic::run_source(
//!     "int square(int n) { return n * n; }
//!      int main() { printf(\"{}\\n\", square(7)); return 0; }",
//! )
//! .unwrap();
//! assert_eq!(run.output, "49\n");
//! assert_eq!(run.value, minic::memory::Value::Int(0));
//! ```

pub mod error;
pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod terminal;

pub use error::Error;

use interpreter::Interpreter;
use memory::Value;

/// Result of running a whole program
#[derive(Debug, Clone, PartialEq)]
pub struct Execution {
    /// Value returned by `main`
    pub value: Value,
    /// Everything the program printed
    pub output: String,
}

/// Lex, parse and run `source`, returning `main`'s value and the printed output.
pub fn run_source(source: &str) -> Result<Execution, Error> {
    let program = parser::parse_source(source)?;
    let mut interpreter = Interpreter::new(&program);
    let value = interpreter.interpret()?;
    Ok(Execution {
        value,
        output: interpreter.terminal().output(),
    })
}
