//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including the error type, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, helper methods, and coordination
//! - `declarations`: variable declaration chains and function declarations/definitions
//! - `statements`: blocks, `if`, `while`, `for`, jumps, intrinsic calls
//! - `expressions`: one method per precedence tier
//!
//! Parser methods are split across these files using `impl Parser` blocks.
//! Every method either returns a complete node or the first error it hits;
//! there is no recovery and no partial tree.

use crate::error::Error;
use crate::parser::ast::*;
use crate::parser::lexer::{tokenize, Token, TokenKind};
use crate::parser::token_stream::TokenStream;
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The next token is not the one the grammar requires
    #[error("Parse error at {location}: expected {expected}, found {found}\nRemaining tokens: {remaining}")]
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
        location: SourceLocation,
        remaining: String,
    },

    /// `break` or `continue` with no enclosing loop
    #[error("Parse error at {location}: '{keyword}' outside of a loop")]
    OutsideLoop {
        keyword: &'static str,
        location: SourceLocation,
    },

    /// A literal token whose text cannot be turned into a value
    #[error("Parse error at {location}: invalid {kind} '{text}'")]
    InvalidLiteral {
        kind: TokenKind,
        text: String,
        location: SourceLocation,
    },
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::UnexpectedToken { location, .. }
            | ParseError::OutsideLoop { location, .. }
            | ParseError::InvalidLiteral { location, .. } => *location,
        }
    }
}

/// Recursive descent parser for the C subset
pub struct Parser {
    pub(crate) tokens: TokenStream,
    /// Number of loops enclosing the statement being parsed
    pub(crate) loop_depth: usize,
}

impl Parser {
    pub fn new(tokens: TokenStream) -> Self {
        Self {
            tokens,
            loop_depth: 0,
        }
    }

    /// Parse the entire stream: `Bos`, top-level declarations, `Eos`.
    pub fn parse(&mut self) -> Result<Program, ParseError> {
        self.tokens.consume(TokenKind::Bos)?;

        let mut program = Program::new();
        while !self.check(TokenKind::Eos) {
            program.nodes.push(self.parse_top_level_declaration()?);
        }

        self.tokens.consume(TokenKind::Eos)?;
        log::debug!("parsed {} top-level statements", program.nodes.len());
        Ok(program)
    }

    // ===== Helper methods =====

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.tokens.check(kind, 0)
    }

    pub(crate) fn check_ahead(&self, kind: TokenKind, offset: usize) -> bool {
        self.tokens.check(kind, offset)
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        self.tokens.consume_if(kind)
    }

    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        self.tokens.consume(kind)
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        let token = self.expect(TokenKind::Identifier)?;
        Ok(token.value.unwrap_or_default())
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.tokens.peek(0).location
    }

    /// `type name` at the cursor starts a declaration
    pub(crate) fn at_declaration(&self) -> bool {
        self.check(TokenKind::Identifier) && self.check_ahead(TokenKind::Identifier, 1)
    }
}

/// Lex and parse a preprocessed source buffer.
pub fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source)?;
    Ok(Parser::new(tokens).parse()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<Program, Error> {
        parse_source(source)
    }

    #[test]
    fn test_parse_simple_function() {
        let program = parse("int main() { return 0; }").unwrap();

        // Definitions produce a declaration followed by the definition
        assert_eq!(program.nodes.len(), 1);
        match &program.nodes[0] {
            Stmt::Statements(pair) => {
                assert!(matches!(&pair[0], Stmt::FunctionDecl { name, .. } if name == "main"));
                match &pair[1] {
                    Stmt::FunctionDef {
                        name,
                        params,
                        return_type,
                        body,
                        ..
                    } => {
                        assert_eq!(name, "main");
                        assert!(params.is_empty());
                        assert_eq!(return_type, "int");
                        assert_eq!(body.len(), 1);
                    }
                    other => panic!("Expected function definition, got {:?}", other),
                }
            }
            other => panic!("Expected statement list, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_empty_program() {
        assert_eq!(parse("").unwrap(), Program::new());
    }

    #[test]
    fn test_unmatched_closing_brace_aborts() {
        let err = parse("int main() { return 0; } }").unwrap_err();
        match err {
            Error::Parse(ParseError::UnexpectedToken {
                expected, found, ..
            }) => {
                assert_eq!(expected, TokenKind::Identifier);
                assert_eq!(found, TokenKind::RBrace);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_semicolon_aborts() {
        let err = parse("int main() { int x = 1 return x; }").unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::UnexpectedToken {
                expected: TokenKind::Semicolon,
                found: TokenKind::Return,
                ..
            })
        ));
    }

    #[test]
    fn test_lex_errors_surface_through_parse_source() {
        assert!(matches!(parse("int main() { return 1 & 2; }"), Err(Error::Lex(_))));
    }

    #[test]
    fn test_parse_error_message_names_position() {
        let err = parse("int main() {\n  return (1;\n}").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{}", message);
        assert!(message.contains("expected ')'"), "{}", message);
    }
}
