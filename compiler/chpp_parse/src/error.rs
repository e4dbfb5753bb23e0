//! Parser-internal error values.
//!
//! A [`ParseError`] travels up through `?` until a recovery point (the
//! statement or declaration loop) reports it as a Syntax diagnostic and
//! synchronizes. Errors raised *at* a `TokenKind::Error` token are
//! marked `silent`: the lexer already reported the Lexical diagnostic,
//! so recovery must not cascade a second message out of the same spot.

use std::fmt;

use chpp_ir::SourceLoc;

/// A syntax error on its way to a recovery point.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ParseError {
    pub message: String,
    pub loc: SourceLoc,
    pub suggestion: Option<String>,
    /// Already covered by a Lexical diagnostic; recover without reporting.
    pub silent: bool,
}

impl ParseError {
    /// A reportable syntax error.
    pub fn new(message: impl Into<String>, loc: SourceLoc) -> Self {
        ParseError {
            message: message.into(),
            loc,
            suggestion: None,
            silent: false,
        }
    }

    /// An error at a lexer error token: recover, but say nothing more.
    pub fn silent(loc: SourceLoc) -> Self {
        ParseError {
            message: String::new(),
            loc,
            suggestion: None,
            silent: true,
        }
    }

    /// Attach a remediation suggestion.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message, self.loc)
    }
}

impl std::error::Error for ParseError {}

/// Parser result type.
pub type PResult<T> = Result<T, ParseError>;
