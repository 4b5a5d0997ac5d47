//! Statement parsing implementation
//!
//! # Grammar
//!
//! ```text
//! statement ::= block | if_stmt | while_stmt | for_stmt
//!             | simple_statement ";"
//! simple_statement ::= "break" | "continue" | "return" expr?
//!             | intrinsic "(" args ")" | var_decl | expr
//! for_stmt  ::= "for" "(" (var_decl | expr) ";" expr ";" expr ")" statement
//! ```
//!
//! Loop bodies are parsed with `loop_depth` raised so that `break` and
//! `continue` outside of any loop are rejected here rather than at run time.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse `{ statements }` and return the inner statements
    pub(crate) fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace)?;

        let mut statements = Vec::new();
        while !self.check(TokenKind::RBrace) {
            statements.push(self.parse_statement()?);
        }

        self.expect(TokenKind::RBrace)?;
        Ok(statements)
    }

    /// Parse a statement
    pub(crate) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.tokens.peek(0).kind {
            TokenKind::LBrace => {
                let location = self.current_location();
                let statements = self.parse_block_statements()?;
                Ok(Stmt::Block {
                    statements,
                    location,
                })
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            _ => {
                let stmt = self.parse_simple_statement()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(stmt)
            }
        }
    }

    /// Statements that end with `;` (the `;` is left for the caller)
    fn parse_simple_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();

        if self.match_token(TokenKind::Break) {
            if self.loop_depth == 0 {
                return Err(ParseError::OutsideLoop {
                    keyword: "break",
                    location,
                });
            }
            return Ok(Stmt::Break { location });
        }

        if self.match_token(TokenKind::Continue) {
            if self.loop_depth == 0 {
                return Err(ParseError::OutsideLoop {
                    keyword: "continue",
                    location,
                });
            }
            return Ok(Stmt::Continue { location });
        }

        if self.match_token(TokenKind::Return) {
            let expr = if self.check(TokenKind::Semicolon) {
                None
            } else {
                Some(self.parse_expression()?)
            };
            return Ok(Stmt::Return { expr, location });
        }

        if self.check(TokenKind::Intrinsic) {
            return self.parse_intrinsic();
        }

        if self.at_declaration() {
            return self.parse_variable_declaration();
        }

        Ok(Stmt::Expression(self.parse_expression()?))
    }

    /// Parse if statement
    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::If)?;

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let then_branch = Box::new(self.parse_branch()?);

        // A missing else is an empty statement list
        let else_branch = if self.match_token(TokenKind::Else) {
            Box::new(self.parse_branch()?)
        } else {
            Box::new(Stmt::Statements(Vec::new()))
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location,
        })
    }

    /// One `if`/`else` branch. A bare declaration gets its own block so the
    /// names it binds never outlive the branch.
    fn parse_branch(&mut self) -> Result<Stmt, ParseError> {
        if !self.at_declaration() {
            return self.parse_statement();
        }
        let location = self.current_location();
        let declaration = self.parse_statement()?;
        Ok(Stmt::Block {
            statements: vec![declaration],
            location,
        })
    }

    /// Parse while statement
    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::While)?;

        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_loop_body()?);

        Ok(Stmt::While {
            condition,
            body,
            location,
        })
    }

    /// Parse for statement: for (init; condition; increment) body
    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;

        let init = if self.at_declaration() {
            self.parse_variable_declaration()?
        } else {
            Stmt::Expression(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;

        let condition = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;

        let increment = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;

        let body = Box::new(self.parse_loop_body()?);

        Ok(Stmt::For {
            init: Box::new(init),
            condition,
            increment,
            body,
            location,
        })
    }

    fn parse_loop_body(&mut self) -> Result<Stmt, ParseError> {
        self.loop_depth += 1;
        let body = self.parse_statement();
        self.loop_depth -= 1;
        body
    }

    /// Parse an intrinsic call such as `printf("{}", x)`
    fn parse_intrinsic(&mut self) -> Result<Stmt, ParseError> {
        let token = self.expect(TokenKind::Intrinsic)?;

        self.expect(TokenKind::LParen)?;
        let args = self.parse_expression_list(TokenKind::RParen)?;
        self.expect(TokenKind::RParen)?;

        Ok(Stmt::Intrinsic {
            name: token.value.unwrap_or_default(),
            args,
            location: token.location,
        })
    }
}
