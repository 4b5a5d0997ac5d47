//! Declaration parsing implementation
//!
//! This module handles the declaration forms of the C subset:
//!
//! - Variable declaration chains: `int a = 1, b, c[4], d[] = {1, 2};`
//! - Function declarations: `int add(int a, int b);`
//! - Function definitions: `int add(int a, int b) { ... }`
//!
//! # Grammar
//!
//! ```text
//! top_level   ::= function | var_decl ";"
//! function    ::= type identifier "(" params ")" ( ";" | block )
//! params      ::= ε | "void" | param ( "," param )*
//! param       ::= type identifier ( "[" "]" )?
//! var_decl    ::= type declarator ( "," declarator )*
//! declarator  ::= identifier ( "[" expr? "]" )? ( "=" expr )?
//! ```
//!
//! Types are plain identifiers. A definition always produces a declaration
//! node followed by a definition node, so the signature is bound before the
//! body is attached.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl Parser {
    /// Parse one top-level declaration
    pub(crate) fn parse_top_level_declaration(&mut self) -> Result<Stmt, ParseError> {
        // `type name (` starts a function, anything else a variable chain
        if self.check_ahead(TokenKind::LParen, 2) {
            return self.parse_function();
        }

        let decl = self.parse_variable_declaration()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(decl)
    }

    /// Parse a function declaration or definition
    fn parse_function(&mut self) -> Result<Stmt, ParseError> {
        let location = self.current_location();
        let return_type = self.expect_identifier()?;
        let name = self.expect_identifier()?;

        self.expect(TokenKind::LParen)?;
        let params = self.parse_parameter_list()?;
        self.expect(TokenKind::RParen)?;

        let decl = Stmt::FunctionDecl {
            name: name.clone(),
            return_type: return_type.clone(),
            params: params.clone(),
            location,
        };

        if !self.check(TokenKind::LBrace) {
            self.expect(TokenKind::Semicolon)?;
            return Ok(decl);
        }

        let body = self.parse_block_statements()?;
        Ok(Stmt::Statements(vec![
            decl,
            Stmt::FunctionDef {
                name,
                return_type,
                params,
                body,
                location,
            },
        ]))
    }

    /// Parse parameter list: (type name, type name, ...)
    fn parse_parameter_list(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        if self.check(TokenKind::RParen) {
            return Ok(params);
        }

        // Special case: (void) means no parameters in C
        if self.check(TokenKind::Identifier)
            && self.tokens.peek(0).text() == "void"
            && self.check_ahead(TokenKind::RParen, 1)
        {
            self.expect(TokenKind::Identifier)?;
            return Ok(params);
        }

        loop {
            let mut type_name = self.expect_identifier()?;
            let name = self.expect_identifier()?;
            if self.match_token(TokenKind::LBracket) {
                self.expect(TokenKind::RBracket)?;
                type_name.push_str("[]");
            }
            params.push(Param { name, type_name });

            if !self.match_token(TokenKind::Comma) {
                break;
            }
        }

        Ok(params)
    }

    /// Parse a declaration chain sharing one type: `int a = 1, b[3], c;`
    ///
    /// The terminating `;` is left for the caller.
    pub(crate) fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let type_name = self.expect_identifier()?;

        let mut statements = Vec::new();
        self.parse_declarator(&type_name, &mut statements)?;
        while self.match_token(TokenKind::Comma) {
            self.parse_declarator(&type_name, &mut statements)?;
        }

        Ok(Stmt::Statements(statements))
    }

    /// One declarator: the declaration node plus an assignment for its initializer
    fn parse_declarator(
        &mut self,
        type_name: &str,
        statements: &mut Vec<Stmt>,
    ) -> Result<(), ParseError> {
        let location = self.current_location();
        let name = self.expect_identifier()?;

        let mut type_name = type_name.to_string();
        let mut array_size = None;
        if self.match_token(TokenKind::LBracket) {
            type_name.push_str("[]");
            if !self.check(TokenKind::RBracket) {
                array_size = Some(self.parse_expression()?);
            }
            self.expect(TokenKind::RBracket)?;
        }

        statements.push(Stmt::VarDecl {
            name: name.clone(),
            type_name,
            array_size,
            location,
        });

        if self.match_token(TokenKind::Assign) {
            let value = self.parse_expression()?;
            statements.push(Stmt::Expression(Expr::Assignment {
                name,
                value: Box::new(value),
                location,
            }));
        }

        Ok(())
    }
}
