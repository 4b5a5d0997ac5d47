//! C source code parser
//!
//! This module transforms preprocessed C source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`token_stream`]: Cursor with unbounded lookahead over the tokens
//! - [`parse`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported C Subset
//!
//! - Types: any identifier names a type (`int`, `char`, `void`, ...); one-dimensional arrays
//! - Statements: declarations, blocks, `if`/`else`, `while`, `for`, `break`, `continue`, `return`
//! - Expressions: `+ - * / %`, comparisons, unary minus, assignment, calls, array literals
//! - Intrinsics: `printf`
//! - No preprocessor: comments and continuations must already be stripped
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence tier.
//! Parsing is fail-fast: the first error aborts and no partial tree is returned.

pub mod ast;
pub mod lexer;
pub mod parse;
pub mod token_stream;

mod declarations;
mod expressions;
mod statements;

pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parse::{parse_source, ParseError, Parser};
pub use token_stream::TokenStream;
