//! Crate-level error type
//!
//! Each pipeline stage has its own error; [`Error`] wraps whichever stage
//! stopped first and displays its message unchanged.

use crate::interpreter::errors::RuntimeError;
use crate::parser::{LexError, ParseError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl Error {
    /// Source position the failing stage reported, if any
    pub fn location(&self) -> Option<crate::parser::ast::SourceLocation> {
        match self {
            Error::Lex(e) => Some(e.location),
            Error::Parse(e) => Some(e.location()),
            Error::Runtime(e) => e.location(),
        }
    }
}
