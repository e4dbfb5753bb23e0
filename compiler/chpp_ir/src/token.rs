//! Token kinds and token records.
//!
//! `TokenKind` is a fieldless `#[repr(u8)]` enum: every kind has a
//! distinct discriminant, and the discriminant doubles as the index into
//! the parser's recovery bitsets. Kind-specific payloads (numeric value,
//! decoded codepoint, owned identifier/string text) live in
//! [`TokenValue`], not in the kind itself.

use std::fmt;

use crate::{SourceLoc, Span};

/// Token kinds for Чпп.
///
/// Keyword variants carry the Serbian-Cyrillic spelling in their doc
/// comment; the keyword table in the lexer maps the UTF-8 text to these
/// tags by exact byte equality.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(u8)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// Ill-formed input; the message travels in [`TokenValue::Text`].
    Error,

    /// Identifier (owned text payload).
    Ident,
    /// Integer literal (payload: `i64` value).
    Number,
    /// Character literal (payload: decoded codepoint).
    CharLit,
    /// String literal (payload: owned UTF-8 text).
    StrLit,

    /// `ако`
    If,
    /// `иначе`
    Else,
    /// `док`
    While,
    /// `за`
    For,
    /// `ради`
    Do,
    /// `прекини`
    Break,
    /// `врати`
    Return,
    /// `екстерно`
    External,
    /// `тачно`
    True,
    /// `нетачно`
    False,

    LParen,     // (
    RParen,     // )
    LBracket,   // [
    RBracket,   // ]
    Semicolon,  // ;
    Comma,      // ,
    Dot,        // .
    Colon,      // :
    /// `_` — array-literal delimiter (only when not opening an identifier).
    Underscore,

    Assign,  // =
    Plus,    // +
    Minus,   // -
    Star,    // *
    Slash,   // /
    Percent, // %
    Caret,   // ^
    Tilde,   // ~
    Amp,     // &
    Pipe,    // |
    Bang,    // !

    EqEq,      // ==
    NotEq,     // !=
    Less,      // <   (also the block opener, resolved grammatically)
    LessEq,    // <=
    Greater,   // >   (also the block closer, resolved grammatically)
    GreaterEq, // >=
    AmpAmp,    // &&
    PipePipe,  // ||
}

impl TokenKind {
    /// Discriminant index for bitset membership.
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// True for the ten keyword kinds.
    pub const fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::If
                | TokenKind::Else
                | TokenKind::While
                | TokenKind::For
                | TokenKind::Do
                | TokenKind::Break
                | TokenKind::Return
                | TokenKind::External
                | TokenKind::True
                | TokenKind::False
        )
    }

    /// True for kinds that may appear as the `op` tag of a binary node.
    pub const fn is_binary_op(self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::Caret
                | TokenKind::Amp
                | TokenKind::Pipe
                | TokenKind::EqEq
                | TokenKind::NotEq
                | TokenKind::Less
                | TokenKind::LessEq
                | TokenKind::Greater
                | TokenKind::GreaterEq
                | TokenKind::AmpAmp
                | TokenKind::PipePipe
        )
    }

    /// True for kinds that may appear as the `op` tag of a unary node.
    pub const fn is_prefix_op(self) -> bool {
        matches!(
            self,
            TokenKind::Bang
                | TokenKind::Tilde
                | TokenKind::Minus
                | TokenKind::Plus
                | TokenKind::Amp
                | TokenKind::Star
        )
    }

    /// Human-readable name for error messages.
    pub const fn display_name(self) -> &'static str {
        match self {
            TokenKind::Eof => "end of file",
            TokenKind::Error => "invalid token",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::CharLit => "character literal",
            TokenKind::StrLit => "string literal",
            TokenKind::If => "`ако`",
            TokenKind::Else => "`иначе`",
            TokenKind::While => "`док`",
            TokenKind::For => "`за`",
            TokenKind::Do => "`ради`",
            TokenKind::Break => "`прекини`",
            TokenKind::Return => "`врати`",
            TokenKind::External => "`екстерно`",
            TokenKind::True => "`тачно`",
            TokenKind::False => "`нетачно`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::Semicolon => "`;`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Colon => "`:`",
            TokenKind::Underscore => "`_`",
            TokenKind::Assign => "`=`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Caret => "`^`",
            TokenKind::Tilde => "`~`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Bang => "`!`",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Less => "`<`",
            TokenKind::LessEq => "`<=`",
            TokenKind::Greater => "`>`",
            TokenKind::GreaterEq => "`>=`",
            TokenKind::AmpAmp => "`&&`",
            TokenKind::PipePipe => "`||`",
        }
    }

    /// Operator spelling without backticks, for the source echo printer.
    ///
    /// Returns `None` for non-operator, non-punctuation kinds.
    pub const fn op_str(self) -> Option<&'static str> {
        match self {
            TokenKind::Assign => Some("="),
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::Slash => Some("/"),
            TokenKind::Percent => Some("%"),
            TokenKind::Caret => Some("^"),
            TokenKind::Tilde => Some("~"),
            TokenKind::Amp => Some("&"),
            TokenKind::Pipe => Some("|"),
            TokenKind::Bang => Some("!"),
            TokenKind::EqEq => Some("=="),
            TokenKind::NotEq => Some("!="),
            TokenKind::Less => Some("<"),
            TokenKind::LessEq => Some("<="),
            TokenKind::Greater => Some(">"),
            TokenKind::GreaterEq => Some(">="),
            TokenKind::AmpAmp => Some("&&"),
            TokenKind::PipePipe => Some("||"),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Kind-specific token payload.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum TokenValue {
    /// No payload (keywords, operators, punctuation, EOF).
    #[default]
    None,
    /// Numeric literal value, target-word wide.
    Int(i64),
    /// Decoded character-literal codepoint.
    Char(char),
    /// Owned UTF-8 text: identifier name, string body, or error message.
    Text(String),
}

/// A lexed token.
///
/// `span` is the lexeme slice into the source buffer (valid for the
/// buffer's lifetime); identifier and string tokens additionally own
/// their decoded text in `value`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub value: TokenValue,
    pub span: Span,
    pub loc: SourceLoc,
}

impl Token {
    /// Create a token without a payload.
    pub fn new(kind: TokenKind, span: Span, loc: SourceLoc) -> Self {
        Token {
            kind,
            value: TokenValue::None,
            span,
            loc,
        }
    }

    /// Create a token with a payload.
    pub fn with_value(kind: TokenKind, value: TokenValue, span: Span, loc: SourceLoc) -> Self {
        Token {
            kind,
            value,
            span,
            loc,
        }
    }

    /// The owned text payload, if any.
    pub fn text(&self) -> Option<&str> {
        match &self.value {
            TokenValue::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The integer payload, if any.
    pub fn int_value(&self) -> Option<i64> {
        match self.value {
            TokenValue::Int(value) => Some(value),
            _ => None,
        }
    }

    /// The codepoint payload, if any.
    pub fn char_value(&self) -> Option<char> {
        match self.value {
            TokenValue::Char(c) => Some(c),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_are_distinct() {
        // The original C enum re-used numeric values across ranges; every
        // kind here must map to its own tag.
        let kinds = [
            TokenKind::Eof,
            TokenKind::Error,
            TokenKind::Ident,
            TokenKind::Number,
            TokenKind::CharLit,
            TokenKind::StrLit,
            TokenKind::If,
            TokenKind::Else,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Do,
            TokenKind::Break,
            TokenKind::Return,
            TokenKind::External,
            TokenKind::True,
            TokenKind::False,
            TokenKind::LParen,
            TokenKind::RParen,
            TokenKind::LBracket,
            TokenKind::RBracket,
            TokenKind::Semicolon,
            TokenKind::Comma,
            TokenKind::Dot,
            TokenKind::Colon,
            TokenKind::Underscore,
            TokenKind::Assign,
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Caret,
            TokenKind::Tilde,
            TokenKind::Amp,
            TokenKind::Pipe,
            TokenKind::Bang,
            TokenKind::EqEq,
            TokenKind::NotEq,
            TokenKind::Less,
            TokenKind::LessEq,
            TokenKind::Greater,
            TokenKind::GreaterEq,
            TokenKind::AmpAmp,
            TokenKind::PipePipe,
        ];
        let mut seen = std::collections::HashSet::new();
        for kind in kinds {
            assert!(seen.insert(kind.index()), "duplicate tag for {kind:?}");
        }
        // All tags fit the parser's u128 recovery bitset.
        assert!(kinds.iter().all(|k| k.index() < 128));
    }

    #[test]
    fn keyword_classification() {
        assert!(TokenKind::If.is_keyword());
        assert!(TokenKind::False.is_keyword());
        assert!(!TokenKind::Ident.is_keyword());
        assert!(!TokenKind::Less.is_keyword());
    }

    #[test]
    fn operator_classification() {
        assert!(TokenKind::Plus.is_binary_op());
        assert!(TokenKind::AmpAmp.is_binary_op());
        assert!(!TokenKind::Bang.is_binary_op());
        assert!(!TokenKind::Assign.is_binary_op());

        assert!(TokenKind::Bang.is_prefix_op());
        assert!(TokenKind::Star.is_prefix_op());
        assert!(!TokenKind::Slash.is_prefix_op());
    }

    #[test]
    fn display_names() {
        assert_eq!(TokenKind::If.display_name(), "`ако`");
        assert_eq!(TokenKind::EqEq.display_name(), "`==`");
        assert_eq!(TokenKind::Eof.display_name(), "end of file");
        assert_eq!(format!("{}", TokenKind::Colon), "`:`");
    }

    #[test]
    fn op_str_covers_operators_only() {
        assert_eq!(TokenKind::PipePipe.op_str(), Some("||"));
        assert_eq!(TokenKind::Less.op_str(), Some("<"));
        assert_eq!(TokenKind::Ident.op_str(), None);
        assert_eq!(TokenKind::If.op_str(), None);
    }

    #[test]
    fn token_payload_accessors() {
        let loc = SourceLoc::START;
        let tok = Token::with_value(
            TokenKind::Ident,
            TokenValue::Text("ако1".to_string()),
            Span::new(0, 7),
            loc,
        );
        assert_eq!(tok.text(), Some("ако1"));
        assert_eq!(tok.int_value(), None);

        let num = Token::with_value(TokenKind::Number, TokenValue::Int(42), Span::new(0, 2), loc);
        assert_eq!(num.int_value(), Some(42));
        assert_eq!(num.text(), None);

        let ch = Token::with_value(
            TokenKind::CharLit,
            TokenValue::Char('ћ'),
            Span::new(0, 4),
            loc,
        );
        assert_eq!(ch.char_value(), Some('ћ'));
    }
}
