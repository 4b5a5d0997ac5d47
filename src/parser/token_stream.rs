//! Cursor over the lexer's output
//!
//! [`TokenStream::peek`] never fails: looking past the end yields the
//! end-of-stream sentinel, so the parser can look arbitrarily far ahead
//! without bounds checks. [`TokenStream::consume`] is the only way to move the
//! cursor and it refuses to skip a token of the wrong kind.

use super::ast::SourceLocation;
use super::lexer::{Token, TokenKind};
use super::parse::ParseError;
use std::fmt;

#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<Token>,
    position: usize,
    eos: Token,
}

impl TokenStream {
    pub fn new(tokens: Vec<Token>) -> Self {
        let eos_location = tokens
            .last()
            .map(|t| t.location)
            .unwrap_or_else(|| SourceLocation::new(1, 1));
        TokenStream {
            tokens,
            position: 0,
            eos: Token::new(TokenKind::Eos, eos_location),
        }
    }

    /// The token `offset` positions ahead of the cursor, or end-of-stream.
    pub fn peek(&self, offset: usize) -> &Token {
        self.tokens.get(self.position + offset).unwrap_or(&self.eos)
    }

    /// Whether the token `offset` positions ahead has the given kind.
    pub fn check(&self, kind: TokenKind, offset: usize) -> bool {
        self.peek(offset).kind == kind
    }

    /// Remove and return the next token if it has the expected kind.
    pub fn consume(&mut self, expected: TokenKind) -> Result<Token, ParseError> {
        let next = self.peek(0);
        if next.kind != expected {
            return Err(ParseError::UnexpectedToken {
                expected,
                found: next.kind,
                location: next.location,
                remaining: self.remaining(),
            });
        }

        let token = next.clone();
        if self.position < self.tokens.len() {
            self.position += 1;
        }
        Ok(token)
    }

    /// Consume the next token only when it has the given kind.
    pub fn consume_if(&mut self, kind: TokenKind) -> bool {
        if self.check(kind, 0) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    /// Number of tokens not yet consumed
    pub fn len(&self) -> usize {
        self.tokens.len().saturating_sub(self.position)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Render the unconsumed tokens, used in parse diagnostics.
    pub fn remaining(&self) -> String {
        let rest: Vec<String> = self.tokens[self.position.min(self.tokens.len())..]
            .iter()
            .map(Token::to_string)
            .collect();
        format!("[{}]", rest.join(", "))
    }
}

impl fmt::Display for TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.remaining())
    }
}
