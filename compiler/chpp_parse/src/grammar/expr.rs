//! Expression grammar.
//!
//! Precedence climbing over C's ladder, low to high: assignment
//! (right-associative), `||`, `&&`, `|`, `^`, `&`, equality,
//! relational, additive, multiplicative, prefix unary, postfix
//! (call and colon subscript), primary.
//!
//! Binary and unary nodes record the operator's [`TokenKind`] verbatim;
//! the semantic stage interprets it.

use chpp_ir::{Expr, ExprKind, TokenKind, TokenValue};

use crate::{PResult, Parser};

/// Left/right binding powers for the infix ladder. Left-associative
/// levels use `(n, n + 1)`; assignment is handled separately because it
/// binds right.
fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    let bp = match kind {
        TokenKind::PipePipe => (3, 4),
        TokenKind::AmpAmp => (5, 6),
        TokenKind::Pipe => (7, 8),
        TokenKind::Caret => (9, 10),
        TokenKind::Amp => (11, 12),
        TokenKind::EqEq | TokenKind::NotEq => (13, 14),
        TokenKind::Less | TokenKind::LessEq | TokenKind::Greater | TokenKind::GreaterEq => {
            (15, 16)
        }
        TokenKind::Plus | TokenKind::Minus => (17, 18),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => (19, 20),
        _ => return None,
    };
    Some(bp)
}

/// Assignment binding powers: lowest level, right-associative.
const ASSIGN_BP: (u8, u8) = (2, 1);

impl Parser<'_> {
    /// Full expression, assignment level and below.
    pub(crate) fn parse_expression(&mut self) -> PResult<Expr> {
        self.parse_bp(0)
    }

    /// Continue an expression whose leftmost operand was already built
    /// (the statement grammar commits to `name : ... :` subscripts
    /// before knowing the statement is an expression).
    pub(crate) fn continue_expression(&mut self, lhs: Expr) -> PResult<Expr> {
        let lhs = self.finish_postfix(lhs)?;
        self.parse_infix(lhs, 0)
    }

    fn parse_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let lhs = self.parse_prefix()?;
        self.parse_infix(lhs, min_bp)
    }

    fn parse_infix(&mut self, mut lhs: Expr, min_bp: u8) -> PResult<Expr> {
        loop {
            let kind = self.kind();
            if kind == TokenKind::Assign {
                if ASSIGN_BP.0 < min_bp {
                    break;
                }
                self.advance();
                let value = self.parse_bp(ASSIGN_BP.1)?;
                let loc = lhs.loc;
                lhs = ExprKind::Assign {
                    target: Box::new(lhs),
                    value: Box::new(value),
                }
                .at(loc);
                continue;
            }
            let Some((l_bp, r_bp)) = infix_binding_power(kind) else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            self.advance();
            let rhs = self.parse_bp(r_bp)?;
            let loc = lhs.loc;
            lhs = ExprKind::Binary {
                op: kind,
                left: Box::new(lhs),
                right: Box::new(rhs),
            }
            .at(loc);
        }
        Ok(lhs)
    }

    /// Prefix unary chain: `! ~ - +` and the address/deref pair `& *`.
    fn parse_prefix(&mut self) -> PResult<Expr> {
        let kind = self.kind();
        if kind.is_prefix_op() {
            let loc = self.loc();
            self.advance();
            let operand = self.parse_prefix()?;
            return Ok(ExprKind::Unary {
                op: kind,
                operand: Box::new(operand),
                prefix: true,
            }
            .at(loc));
        }
        let primary = self.parse_primary()?;
        self.finish_postfix(primary)
    }

    /// Postfix chain: calls `( args )` and colon subscripts `: index :`,
    /// left-associative and freely mixed.
    pub(crate) fn finish_postfix(&mut self, mut expr: Expr) -> PResult<Expr> {
        loop {
            match self.kind() {
                TokenKind::LParen => {
                    self.advance();
                    let mut args = Vec::new();
                    if !self.check(TokenKind::RParen) {
                        loop {
                            let arg = self.in_grouping(|p| p.parse_expression())?;
                            args.push(arg);
                            if !self.eat(TokenKind::Comma) {
                                break;
                            }
                        }
                    }
                    self.expect(TokenKind::RParen)?;
                    let loc = expr.loc;
                    expr = ExprKind::Call {
                        callee: Box::new(expr),
                        args,
                    }
                    .at(loc);
                }
                // A `:` in subscript-index context closes the enclosing
                // subscript; it never opens a nested one without
                // parentheses.
                TokenKind::Colon if !self.subscript_closes_colon() => {
                    self.advance();
                    let index = self.in_subscript(|p| p.parse_expression())?;
                    self.expect(TokenKind::Colon)?;
                    let loc = expr.loc;
                    expr = ExprKind::Index {
                        array: Box::new(expr),
                        index: Box::new(index),
                    }
                    .at(loc);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// Literal, identifier, boolean, or parenthesized expression.
    fn parse_primary(&mut self) -> PResult<Expr> {
        let loc = self.loc();
        match self.kind() {
            TokenKind::Number => {
                let token = self.advance();
                Ok(ExprKind::Int(token.int_value().unwrap_or(0)).at(loc))
            }
            TokenKind::CharLit => {
                let token = self.advance();
                Ok(ExprKind::Char(token.char_value().unwrap_or('\0')).at(loc))
            }
            TokenKind::StrLit => {
                let token = self.advance();
                let text = match token.value {
                    TokenValue::Text(text) => text,
                    _ => String::new(),
                };
                Ok(ExprKind::Str(text).at(loc))
            }
            TokenKind::True => {
                self.advance();
                Ok(ExprKind::Bool(true).at(loc))
            }
            TokenKind::False => {
                self.advance();
                Ok(ExprKind::Bool(false).at(loc))
            }
            TokenKind::Ident => {
                let token = self.advance();
                let name = match token.value {
                    TokenValue::Text(name) => name,
                    _ => String::new(),
                };
                Ok(ExprKind::Ident(name).at(loc))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.in_grouping(|p| p.parse_expression())?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected("expression")),
        }
    }
}
