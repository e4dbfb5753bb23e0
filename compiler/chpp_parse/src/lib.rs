//! Recursive descent parser for Чпп.
//!
//! Consumes the streaming [`Lexer`] with one in-hand token plus the
//! lexer's depth-one peek where the grammar needs a second decision
//! token, and produces an owned [`Program`] tree.
//!
//! Error handling: grammar rules return [`ParseError`] through `?`; the
//! statement and declaration loops report it as a Syntax diagnostic and
//! synchronize to the next `;` or `>` before resuming. Errors raised at
//! lexer error tokens recover silently — their Lexical diagnostic is
//! already on the engine.

mod error;
mod grammar;
mod recovery;


pub use error::{PResult, ParseError};
pub use recovery::{TokenSet, STMT_BOUNDARY};

use chpp_diagnostic::{report, DiagKind, Diagnostic, DiagnosticEngine};
use chpp_ir::{Program, SourceLoc, Token, TokenKind};
use chpp_lexer::{Lexer, SourceBuffer};
use chpp_target::TargetInfo;
use tracing::{debug, trace};

/// Parse a source string into a program.
///
/// Convenience wrapper over [`Parser`] for tests and in-memory sources.
pub fn parse(
    source: &str,
    filename: &str,
    target: TargetInfo,
    diags: &mut DiagnosticEngine,
) -> Program {
    parse_buffer(SourceBuffer::from_str(source, filename), target, diags)
}

/// Parse an owned source buffer into a program.
pub fn parse_buffer(
    buf: SourceBuffer,
    target: TargetInfo,
    diags: &mut DiagnosticEngine,
) -> Program {
    let lexer = Lexer::new(buf, target);
    Parser::new(lexer, diags).parse_program()
}

/// Parser state: the lexer, the in-hand token, and the diagnostics handle.
pub struct Parser<'a> {
    lexer: Lexer,
    diags: &'a mut DiagnosticEngine,
    current: Token,
    filename: String,
    /// Set while parsing a colon-subscript index, where a bare `:`
    /// closes the subscript instead of opening a nested one.
    in_subscript_index: bool,
}

impl<'a> Parser<'a> {
    /// Create a parser and prime the first token.
    pub fn new(mut lexer: Lexer, diags: &'a mut DiagnosticEngine) -> Self {
        let filename = lexer.filename().to_string();
        let current = lexer.next_token(diags);
        Parser {
            lexer,
            diags,
            current,
            filename,
            in_subscript_index: false,
        }
    }

    /// Parse the whole translation unit: a sequence of function and
    /// external declarations.
    pub fn parse_program(mut self) -> Program {
        debug!(file = %self.filename, "parsing program");
        let mut decls = Vec::new();
        while !self.at_eof() {
            match self.parse_declaration() {
                Ok(decl) => decls.push(decl),
                Err(err) => self.recover(err),
            }
        }
        Program::new(decls)
    }

    // --- Cursor ------------------------------------------------------------

    /// Kind of the in-hand token.
    #[inline]
    pub(crate) fn kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Location of the in-hand token.
    #[inline]
    pub(crate) fn loc(&self) -> SourceLoc {
        self.current.loc
    }

    #[inline]
    pub(crate) fn at_eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    #[inline]
    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Kind of the token after the in-hand one (the lexer's peek).
    #[inline]
    pub(crate) fn peek_kind(&mut self) -> TokenKind {
        self.lexer.peek_kind(self.diags)
    }

    /// Consume the in-hand token and return it.
    pub(crate) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token(self.diags);
        let token = std::mem::replace(&mut self.current, next);
        trace!(kind = %token.kind, loc = %token.loc, "advance");
        token
    }

    /// Consume the in-hand token if it matches.
    pub(crate) fn eat(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Require a token kind; consume and return it, or error.
    #[inline]
    pub(crate) fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expect_failed(kind))
        }
    }

    /// Build the error for a failed `expect()`. Split out `#[cold]` so
    /// the `format!` allocation stays off the hot path.
    #[cold]
    #[inline(never)]
    fn expect_failed(&self, kind: TokenKind) -> ParseError {
        self.unexpected(kind.display_name())
    }

    /// Require an identifier; returns its name and location.
    pub(crate) fn expect_ident(&mut self) -> PResult<(String, SourceLoc)> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            let loc = token.loc;
            let name = match token.value {
                chpp_ir::TokenValue::Text(name) => name,
                _ => String::new(),
            };
            Ok((name, loc))
        } else {
            Err(self.unexpected("identifier"))
        }
    }

    /// "expected X, found Y" at the in-hand token. Errors at lexer error
    /// tokens are silent — the Lexical diagnostic already went out.
    pub(crate) fn unexpected(&self, expected: &str) -> ParseError {
        if self.current.kind == TokenKind::Error {
            ParseError::silent(self.loc())
        } else {
            ParseError::new(
                format!("expected {expected}, found {}", self.current.kind),
                self.loc(),
            )
        }
    }

    // --- Context -----------------------------------------------------------

    /// Run `f` in subscript-index context: a bare `:` closes the
    /// enclosing subscript rather than opening a nested one. Restores
    /// the previous context afterwards.
    pub(crate) fn in_subscript<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.in_subscript_index;
        self.in_subscript_index = true;
        let result = f(self);
        self.in_subscript_index = saved;
        result
    }

    /// Run `f` in grouping context (parentheses): colon subscripts are
    /// unambiguous again inside explicit delimiters.
    pub(crate) fn in_grouping<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = self.in_subscript_index;
        self.in_subscript_index = false;
        let result = f(self);
        self.in_subscript_index = saved;
        result
    }

    /// True when a bare `:` should close the current subscript.
    #[inline]
    pub(crate) fn subscript_closes_colon(&self) -> bool {
        self.in_subscript_index
    }

    // --- Recovery ----------------------------------------------------------

    /// Top-level recovery: report (unless silent), synchronize to the
    /// next `;` or `>`, and consume it — at top level neither token has
    /// an enclosing construct to close.
    pub(crate) fn recover(&mut self, err: ParseError) {
        self.emit(err);
        self.synchronize(STMT_BOUNDARY);
        if self.check(TokenKind::Semicolon) || self.check(TokenKind::Greater) {
            self.advance();
        }
    }

    /// Statement-level recovery: like [`recover`](Self::recover), but a
    /// `>` is left in place so the enclosing block can close.
    pub(crate) fn recover_in_block(&mut self, err: ParseError) {
        self.emit(err);
        self.synchronize(STMT_BOUNDARY);
        if self.check(TokenKind::Semicolon) {
            self.advance();
        }
    }

    /// Report a parse error as a Syntax diagnostic.
    fn emit(&mut self, err: ParseError) {
        if err.silent {
            return;
        }
        let mut diag = Diagnostic::error(DiagKind::Syntax)
            .at(self.filename.clone(), err.loc)
            .with_message(err.message);
        if let Some(suggestion) = err.suggestion {
            diag = diag.with_suggestion(suggestion);
        }
        report!(self.diags, diag);
    }

    /// Skip tokens until one in `recovery` (or EOF). Returns `true` when
    /// a recovery token was found before the end of input.
    pub(crate) fn synchronize(&mut self, recovery: TokenSet) -> bool {
        while !self.at_eof() {
            if recovery.contains(self.kind()) {
                return true;
            }
            self.advance();
        }
        recovery.contains(TokenKind::Eof)
    }
}
