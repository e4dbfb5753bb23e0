//! Grammar rules.
//!
//! Split by level: declarations here, statements and expressions in
//! their own modules. All rules are methods on [`Parser`] returning
//! [`PResult`]; recovery happens in the callers' loops.

mod expr;
mod stmt;

use chpp_ir::{FunctionDecl, Param, TokenKind, TypeInfo, TypeNode};

use crate::{PResult, Parser};

impl Parser<'_> {
    /// `external_decl | function_decl`
    ///
    /// An external declaration is a signature terminated by `;`; a
    /// function declaration requires an angle-bracket body.
    pub(crate) fn parse_declaration(&mut self) -> PResult<FunctionDecl> {
        if self.check(TokenKind::External) {
            return self.parse_external_decl();
        }
        let (name, loc) = self.expect_ident()?;
        let params = self.parse_params()?;
        if !self.check(TokenKind::Less) {
            return Err(self
                .unexpected("`<` to open the function body")
                .with_suggestion("only `екстерно` declarations may omit the body"));
        }
        let body = self.parse_block()?;
        Ok(FunctionDecl {
            name,
            params,
            body: Some(body),
            return_type: TypeNode::new(TypeInfo::Int, loc),
            is_external: false,
            loc,
        })
    }

    /// `екстерно identifier '(' param_list? ')' ';'`
    fn parse_external_decl(&mut self) -> PResult<FunctionDecl> {
        let keyword = self.expect(TokenKind::External)?;
        let (name, loc) = self.expect_ident()?;
        let params = self.parse_params()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(FunctionDecl {
            name,
            params,
            body: None,
            return_type: TypeNode::new(TypeInfo::Int, loc),
            is_external: true,
            loc: keyword.loc,
        })
    }

    /// `'(' (param (',' param)*)? ')'` where a param is `identifier`
    /// (one word) or `identifier '::'` (array of unspecified size).
    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.expect(TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(TokenKind::RParen) {
            loop {
                let (name, loc) = self.expect_ident()?;
                let param_type = if self.check(TokenKind::Colon) {
                    // The empty-colon array form: two adjacent `:` tokens.
                    self.expect(TokenKind::Colon)?;
                    self.expect(TokenKind::Colon)?;
                    TypeInfo::array_unsized(TypeInfo::Int)
                } else {
                    TypeInfo::Int
                };
                params.push(Param::new(name, param_type, loc));
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen)?;
        Ok(params)
    }
}
