//! Expression parsing implementation
//!
//! One method per precedence tier, tightest to loosest:
//!
//! ```text
//! value          ::= literal | "{" args "}" | ident "(" args ")" | ident "[" expr "]"
//!                  | ident | "(" expr ")"
//! unary          ::= "-" unary | value
//! multiplicative ::= unary ( ("*" | "/" | "%") unary )*
//! additive       ::= multiplicative ( ("+" | "-") multiplicative )*
//! relational     ::= additive ( ("<" | ">" | "<=" | ">=") additive )*
//! equality       ::= relational ( ("==" | "!=") relational )*
//! assignment     ::= ident "=" assignment | ident "[" expr "]" "=" assignment | equality
//! ```
//!
//! Binary tiers are left-associative; assignment is right-associative and only
//! applies when the target is a bare name (or a single array element).

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse expression (top-level entry point)
    pub(crate) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    /// Parse assignment (right-associative)
    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        if self.check(TokenKind::Identifier) && self.check_ahead(TokenKind::Assign, 1) {
            let location = self.current_location();
            let name = self.expect_identifier()?;
            self.expect(TokenKind::Assign)?;
            let value = Box::new(self.parse_assignment()?);
            return Ok(Expr::Assignment {
                name,
                value,
                location,
            });
        }

        if self.is_array_element_assignment() {
            let location = self.current_location();
            let name = self.expect_identifier()?;
            self.expect(TokenKind::LBracket)?;
            let index = Box::new(self.parse_expression()?);
            self.expect(TokenKind::RBracket)?;
            self.expect(TokenKind::Assign)?;
            let value = Box::new(self.parse_assignment()?);
            return Ok(Expr::ArrayAssignment {
                name,
                index,
                value,
                location,
            });
        }

        self.parse_equality()
    }

    /// `ident [ ... ] =` with balanced brackets
    fn is_array_element_assignment(&self) -> bool {
        if !(self.check(TokenKind::Identifier) && self.check_ahead(TokenKind::LBracket, 1)) {
            return false;
        }

        let mut depth = 0usize;
        let mut offset = 1;
        loop {
            match self.tokens.peek(offset).kind {
                TokenKind::LBracket => depth += 1,
                TokenKind::RBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return self.check_ahead(TokenKind::Assign, offset + 1);
                    }
                }
                TokenKind::Eos => return false,
                _ => {}
            }
            offset += 1;
        }
    }

    /// Parse equality (== !=)
    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let location = self.current_location();
            let op = if self.match_token(TokenKind::EqEq) {
                BinOp::Eq
            } else if self.match_token(TokenKind::NotEq) {
                BinOp::Ne
            } else {
                break;
            };

            let right = Box::new(self.parse_relational()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location,
            };
        }

        Ok(left)
    }

    /// Parse relational (< <= > >=)
    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let location = self.current_location();
            let op = if self.match_token(TokenKind::Lt) {
                BinOp::Lt
            } else if self.match_token(TokenKind::Le) {
                BinOp::Le
            } else if self.match_token(TokenKind::Gt) {
                BinOp::Gt
            } else if self.match_token(TokenKind::Ge) {
                BinOp::Ge
            } else {
                break;
            };

            let right = Box::new(self.parse_additive()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ -)
    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let location = self.current_location();
            let op = if self.match_token(TokenKind::Plus) {
                BinOp::Add
            } else if self.match_token(TokenKind::Minus) {
                BinOp::Sub
            } else {
                break;
            };

            let right = Box::new(self.parse_multiplicative()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (* / %)
    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let location = self.current_location();
            let op = if self.match_token(TokenKind::Star) {
                BinOp::Mul
            } else if self.match_token(TokenKind::Slash) {
                BinOp::Div
            } else if self.match_token(TokenKind::Percent) {
                BinOp::Mod
            } else {
                break;
            };

            let right = Box::new(self.parse_unary()?);
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location,
            };
        }

        Ok(left)
    }

    /// Parse prefix minus
    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();
        if self.match_token(TokenKind::Minus) {
            let operand = Box::new(self.parse_unary()?);
            return Ok(Expr::UnaryOp {
                op: UnOp::Neg,
                operand,
                location,
            });
        }

        self.parse_value()
    }

    /// Parse literals, names, calls, array forms and parenthesized expressions
    fn parse_value(&mut self) -> Result<Expr, ParseError> {
        let token = self.tokens.peek(0).clone();
        let location = token.location;

        match token.kind {
            TokenKind::IntLiteral => {
                self.expect(TokenKind::IntLiteral)?;
                let text = token.text();
                let value = text.parse::<i32>().map_err(|_| ParseError::InvalidLiteral {
                    kind: token.kind,
                    text: text.to_string(),
                    location,
                })?;
                Ok(Expr::IntLiteral(value, location))
            }
            TokenKind::StringLiteral => {
                self.expect(TokenKind::StringLiteral)?;
                let value = unescape(token.text()).ok_or_else(|| ParseError::InvalidLiteral {
                    kind: token.kind,
                    text: token.text().to_string(),
                    location,
                })?;
                Ok(Expr::StringLiteral(value, location))
            }
            TokenKind::CharLiteral => {
                self.expect(TokenKind::CharLiteral)?;
                let invalid = || ParseError::InvalidLiteral {
                    kind: token.kind,
                    text: token.text().to_string(),
                    location,
                };
                let value = unescape(token.text()).ok_or_else(invalid)?;
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Ok(Expr::CharLiteral(ch, location)),
                    _ => Err(invalid()),
                }
            }
            TokenKind::LBrace => {
                self.expect(TokenKind::LBrace)?;
                let elements = self.parse_expression_list(TokenKind::RBrace)?;
                self.expect(TokenKind::RBrace)?;
                Ok(Expr::ArrayLiteral { elements, location })
            }
            TokenKind::Identifier => {
                if self.check_ahead(TokenKind::LParen, 1) {
                    return self.parse_function_call();
                }

                let name = self.expect_identifier()?;
                if self.match_token(TokenKind::LBracket) {
                    let index = Box::new(self.parse_expression()?);
                    self.expect(TokenKind::RBracket)?;
                    return Ok(Expr::ArrayAccess {
                        name,
                        index,
                        location,
                    });
                }

                Ok(Expr::Variable(name, location))
            }
            _ => {
                // Anything else must be a parenthesized expression
                self.expect(TokenKind::LParen)?;
                let expr = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
        }
    }

    /// Parse `name(args)`
    fn parse_function_call(&mut self) -> Result<Expr, ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let args = self.parse_expression_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;

        Ok(Expr::FunctionCall {
            name,
            args,
            location,
        })
    }

    /// Comma separated expressions up to (not including) `delimiter`
    pub(crate) fn parse_expression_list(
        &mut self,
        delimiter: TokenKind,
    ) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();

        if !self.check(delimiter) {
            exprs.push(self.parse_expression()?);
            while self.match_token(TokenKind::Comma) {
                exprs.push(self.parse_expression()?);
            }
        }

        Ok(exprs)
    }
}

/// Decode backslash escapes in literal text. `None` on an unknown escape.
fn unescape(text: &str) -> Option<String> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        let escaped = match chars.next()? {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            _ => return None,
        };
        out.push(escaped);
    }

    Some(out)
}
