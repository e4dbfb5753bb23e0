//! Statement grammar.

use chpp_diagnostic::{report, DiagKind, Diagnostic};
use chpp_ir::{ExprKind, SourceLoc, Stmt, StmtKind, TokenKind, TokenValue, TypeInfo};

use crate::{PResult, Parser};

impl Parser<'_> {
    /// One statement. The `<`/`>` ambiguity is resolved here: a `<` in
    /// statement position opens a block, anywhere else it is relational.
    pub(crate) fn parse_statement(&mut self) -> PResult<Stmt> {
        match self.kind() {
            TokenKind::Less => self.parse_block(),
            TokenKind::If => self.parse_if(),
            TokenKind::While => self.parse_while(),
            TokenKind::For => self.parse_for(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Break => {
                let loc = self.loc();
                self.advance();
                self.expect(TokenKind::Semicolon)?;
                Ok(StmtKind::Break.at(loc))
            }
            TokenKind::Return => {
                let loc = self.loc();
                self.advance();
                let value = if self.check(TokenKind::Semicolon) {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.expect(TokenKind::Semicolon)?;
                Ok(StmtKind::Return(value).at(loc))
            }
            TokenKind::Ident => self.parse_ident_statement(),
            _ => self.parse_expr_statement(),
        }
    }

    /// `'<' statement* '>'`
    pub(crate) fn parse_block(&mut self) -> PResult<Stmt> {
        let open = self.expect(TokenKind::Less)?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::Greater) && !self.at_eof() {
            match self.parse_statement() {
                Ok(stmt) => stmts.push(stmt),
                Err(err) => self.recover_in_block(err),
            }
        }
        self.expect(TokenKind::Greater)
            .map_err(|e| e.with_suggestion("close the block with `>`"))?;
        Ok(StmtKind::Block(stmts).at(open.loc))
    }

    /// `ако '(' expression ')' statement (иначе statement)?`
    fn parse_if(&mut self) -> PResult<Stmt> {
        let loc = self.loc();
        self.advance();
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.eat(TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };
        Ok(StmtKind::If {
            cond,
            then_branch,
            else_branch,
        }
        .at(loc))
    }

    /// `док '(' expression ')' statement`
    fn parse_while(&mut self) -> PResult<Stmt> {
        let loc = self.loc();
        self.advance();
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::While { cond, body }.at(loc))
    }

    /// `ради statement док '(' expression ')' ';'`
    fn parse_do_while(&mut self) -> PResult<Stmt> {
        let loc = self.loc();
        self.advance();
        let body = Box::new(self.parse_statement()?);
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let cond = self.parse_expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(StmtKind::DoWhile { body, cond }.at(loc))
    }

    /// `за '(' (statement | ';') expression? ';' expression? ')' statement`
    ///
    /// The init slot is a full statement carrying its own `;`.
    fn parse_for(&mut self) -> PResult<Stmt> {
        let loc = self.loc();
        self.advance();
        self.expect(TokenKind::LParen)?;
        let init = if self.eat(TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.parse_statement()?))
        };
        let cond = if self.check(TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::Semicolon)?;
        let step = if self.check(TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect(TokenKind::RParen)?;
        let body = Box::new(self.parse_statement()?);
        Ok(StmtKind::For {
            init,
            cond,
            step,
            body,
        }
        .at(loc))
    }

    /// A statement opening with an identifier. One peeked token decides:
    /// `=` is an implicit variable declaration, `:` continues into the
    /// array forms, anything else is an expression statement.
    fn parse_ident_statement(&mut self) -> PResult<Stmt> {
        match self.peek_kind() {
            TokenKind::Assign => {
                let name_token = self.advance();
                let loc = name_token.loc;
                let name = match name_token.value {
                    TokenValue::Text(name) => name,
                    _ => String::new(),
                };
                self.advance(); // '='
                let init = self.parse_expression()?;
                self.expect(TokenKind::Semicolon)?;
                Ok(StmtKind::VarDecl {
                    name,
                    init: Some(init),
                    var_type: TypeInfo::Int,
                }
                .at(loc))
            }
            TokenKind::Colon => self.parse_colon_statement(),
            _ => self.parse_expr_statement(),
        }
    }

    /// `identifier ':' ...` — either an array declaration
    /// `name ':' INT ':' '=' '_' exprs '_' ';'` or an expression
    /// statement that happens to start with a colon subscript.
    ///
    /// The decision is committed token by token: only the exact
    /// declaration shape (integer size, `=`, then `_`) makes a
    /// declaration; every deviation re-associates the consumed tokens
    /// as an `ArrayAccess` and continues as an expression.
    fn parse_colon_statement(&mut self) -> PResult<Stmt> {
        let name_token = self.advance();
        let loc = name_token.loc;
        let name = match name_token.value {
            TokenValue::Text(name) => name,
            _ => String::new(),
        };
        self.advance(); // ':'

        if self.check(TokenKind::Number) && self.peek_kind() == TokenKind::Colon {
            let size_token = self.advance();
            let size_loc = size_token.loc;
            let size = size_token.int_value().unwrap_or(0);
            self.advance(); // ':'
            if self.check(TokenKind::Assign) && self.peek_kind() == TokenKind::Underscore {
                self.advance(); // '='
                return self.parse_array_decl_tail(name, size, loc);
            }
            // Not a declaration after all: `name:INT:` was a subscript.
            let access = ExprKind::Index {
                array: Box::new(ExprKind::Ident(name).at(loc)),
                index: Box::new(ExprKind::Int(size).at(size_loc)),
            }
            .at(loc);
            let expr = self.continue_expression(access)?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(StmtKind::Expr(expr).at(loc));
        }

        // General subscript: `name ':' expression ':'`.
        let index = self.in_subscript(|p| p.parse_expression())?;
        self.expect(TokenKind::Colon)?;
        let access = ExprKind::Index {
            array: Box::new(ExprKind::Ident(name).at(loc)),
            index: Box::new(index),
        }
        .at(loc);
        let expr = self.continue_expression(access)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(StmtKind::Expr(expr).at(loc))
    }

    /// `'_' expression (',' expression)* '_' ';'` after the `=` of an
    /// array declaration. Enforces `initializer_count <= size`.
    fn parse_array_decl_tail(&mut self, name: String, size: i64, loc: SourceLoc) -> PResult<Stmt> {
        self.expect(TokenKind::Underscore)?;
        let mut inits = vec![self.parse_expression()?];
        while self.eat(TokenKind::Comma) {
            inits.push(self.parse_expression()?);
        }
        self.expect(TokenKind::Underscore)?;
        self.expect(TokenKind::Semicolon)?;

        if inits.len() as i64 > size {
            report!(
                self.diags,
                Diagnostic::error(DiagKind::Syntax)
                    .at(self.filename.clone(), loc)
                    .with_message(format!(
                        "array `{name}` declares {size} elements but has {} initializers",
                        inits.len()
                    ))
                    .with_suggestion("drop the extra initializers or grow the declared size")
            );
            inits.truncate(usize::try_from(size.max(0)).unwrap_or(0));
        }

        Ok(StmtKind::ArrayDecl {
            name,
            size,
            inits,
            elem_type: TypeInfo::Int,
        }
        .at(loc))
    }

    /// Expression statement: `expression ';'`.
    fn parse_expr_statement(&mut self) -> PResult<Stmt> {
        let loc = self.loc();
        let expr = self.parse_expression()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(StmtKind::Expr(expr).at(loc))
    }
}
