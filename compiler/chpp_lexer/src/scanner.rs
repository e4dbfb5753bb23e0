//! The token scanner.
//!
//! Streaming lexer with a depth-one lookahead cache. Dispatch is on the
//! first byte of the lexeme; identifiers and literals then consume full
//! codepoints. Columns advance by byte count, newlines reset them.
//!
//! Diagnostics are reported in-flight: by the time a `TokenKind::Error`
//! token is returned, its Lexical diagnostic is already on the engine and
//! the message also rides in the token's text payload.

use chpp_diagnostic::{report, DiagKind, Diagnostic, DiagnosticEngine};
use chpp_ir::{SourceLoc, Span, Token, TokenKind, TokenValue};
use chpp_target::TargetInfo;

use crate::escape::{self, Escaped};
use crate::keywords;
use crate::source_buffer::SourceBuffer;
use crate::utf8;

/// Longest accepted numeric-literal lexeme, in bytes.
const MAX_NUMBER_LEXEME: usize = 64;

/// Cursor state needed to rewind the scanner (string recovery, and the
/// save/restore that backs the lookahead contract).
#[derive(Copy, Clone, Debug)]
struct Snapshot {
    pos: usize,
    line: u32,
    column: u32,
    prev_column: u32,
}

/// The Чпп lexer.
pub struct Lexer {
    buf: SourceBuffer,
    target: TargetInfo,
    /// Byte cursor.
    pos: usize,
    /// Start of the current lexeme.
    start: usize,
    line: u32,
    column: u32,
    /// Column before the last newline; lets a rewind cross it safely.
    prev_column: u32,
    /// Location where the current lexeme started.
    start_loc: SourceLoc,
    /// Depth-one lookahead; a peek fills it, the next consume drains it.
    lookahead: Option<Token>,
}

impl Lexer {
    /// Create a lexer over an owned source buffer.
    pub fn new(buf: SourceBuffer, target: TargetInfo) -> Self {
        Lexer {
            buf,
            target,
            pos: 0,
            start: 0,
            line: 1,
            column: 1,
            prev_column: 1,
            start_loc: SourceLoc::START,
            lookahead: None,
        }
    }

    /// The source filename.
    pub fn filename(&self) -> &str {
        self.buf.filename()
    }

    /// The source buffer (token spans index into it).
    pub fn source(&self) -> &SourceBuffer {
        &self.buf
    }

    /// The target descriptor this lexer sizes literals against.
    pub fn target(&self) -> TargetInfo {
        self.target
    }

    /// Consume and return the next token.
    pub fn next_token(&mut self, diags: &mut DiagnosticEngine) -> Token {
        match self.lookahead.take() {
            Some(token) => token,
            None => self.scan_token(diags),
        }
    }

    /// Look at the next token without consuming it.
    pub fn peek_token(&mut self, diags: &mut DiagnosticEngine) -> &Token {
        if self.lookahead.is_none() {
            let token = self.scan_token(diags);
            self.lookahead = Some(token);
        }
        if let Some(token) = &self.lookahead {
            token
        } else {
            unreachable!("lookahead was just filled")
        }
    }

    /// Kind of the next token without consuming it.
    pub fn peek_kind(&mut self, diags: &mut DiagnosticEngine) -> TokenKind {
        self.peek_token(diags).kind
    }

    // --- Cursor primitives -------------------------------------------------

    #[inline]
    fn current(&self) -> u8 {
        self.buf.byte_at(self.pos)
    }

    #[inline]
    fn peek_byte(&self) -> u8 {
        self.buf.byte_at(self.pos + 1)
    }

    #[inline]
    fn at_eof(&self) -> bool {
        self.pos >= self.buf.len()
    }

    /// Consume one ASCII byte (not a newline).
    #[inline]
    fn bump_byte(&mut self) {
        self.pos += 1;
        self.column += 1;
    }

    /// Consume a newline, advancing the line counter.
    #[inline]
    fn bump_newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.prev_column = self.column;
        self.column = 1;
    }

    /// Consume `n` bytes with no newlines among them.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is bounded by the u32 span space"
    )]
    fn consume_n(&mut self, n: usize) {
        self.pos += n;
        self.column += n as u32;
    }

    /// Consume one full codepoint; ill-formed input consumes the raw
    /// first byte. Byte columns: each byte of the sequence counts.
    fn advance_char(&mut self) -> char {
        let (c, width) = match utf8::decode(self.buf.tail(self.pos)) {
            Some(decoded) => decoded,
            None => (self.current() as char, 1),
        };
        if c == '\n' {
            self.bump_newline();
        } else {
            self.consume_n(width);
        }
        c
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            pos: self.pos,
            line: self.line,
            column: self.column,
            prev_column: self.prev_column,
        }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.pos = snapshot.pos;
        self.line = snapshot.line;
        self.column = snapshot.column;
        self.prev_column = snapshot.prev_column;
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is bounded by the u32 span space"
    )]
    fn span(&self) -> Span {
        Span::new(self.start as u32, self.pos as u32)
    }

    fn make(&self, kind: TokenKind) -> Token {
        Token::new(kind, self.span(), self.start_loc)
    }

    fn make_value(&self, kind: TokenKind, value: TokenValue) -> Token {
        Token::with_value(kind, value, self.span(), self.start_loc)
    }

    /// Report a Lexical error and build the matching error token.
    fn error_token(&self, diags: &mut DiagnosticEngine, message: String) -> Token {
        report!(
            diags,
            Diagnostic::error(DiagKind::Lexical)
                .at(self.buf.filename(), self.start_loc)
                .with_message(message.clone())
        );
        self.make_value(TokenKind::Error, TokenValue::Text(message))
    }

    fn warn(&self, diags: &mut DiagnosticEngine, loc: SourceLoc, message: String) {
        report!(
            diags,
            Diagnostic::warning(DiagKind::Lexical)
                .at(self.buf.filename(), loc)
                .with_message(message)
        );
    }

    // --- Trivia ------------------------------------------------------------

    /// Skip whitespace (space, tab, CR), newlines, and comments.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is bounded by the u32 span space"
    )]
    fn skip_trivia(&mut self, diags: &mut DiagnosticEngine) {
        loop {
            match self.current() {
                b' ' | b'\t' | b'\r' => self.bump_byte(),
                b'\n' => self.bump_newline(),
                b'/' => match self.peek_byte() {
                    b'/' => {
                        // To the next newline (kept for the loop above).
                        let tail = self.buf.tail(self.pos);
                        let len = memchr::memchr(b'\n', tail).unwrap_or(tail.len());
                        self.pos += len;
                        self.column += len as u32;
                    }
                    b'*' => self.skip_block_comment(diags),
                    _ => break,
                },
                _ => break,
            }
        }
    }

    fn skip_block_comment(&mut self, diags: &mut DiagnosticEngine) {
        let open_loc = SourceLoc::new(self.line, self.column);
        self.bump_byte(); // '/'
        self.bump_byte(); // '*'
        loop {
            if self.at_eof() {
                self.warn(diags, open_loc, "Unterminated block comment".to_string());
                return;
            }
            match self.current() {
                b'*' if self.peek_byte() == b'/' => {
                    self.bump_byte();
                    self.bump_byte();
                    return;
                }
                b'\n' => self.bump_newline(),
                _ => self.bump_byte(),
            }
        }
    }

    // --- Token scanning ----------------------------------------------------

    fn scan_token(&mut self, diags: &mut DiagnosticEngine) -> Token {
        self.skip_trivia(diags);
        self.start = self.pos;
        self.start_loc = SourceLoc::new(self.line, self.column);

        if self.at_eof() {
            return self.make(TokenKind::Eof);
        }

        match self.current() {
            b'0'..=b'9' => self.scan_number(diags),
            b'"' => self.scan_string(diags),
            b'\'' => self.scan_char(diags),
            b'_' => {
                // `_` opens an identifier only when a letter or another
                // `_` follows; a bare `_` delimits array literals.
                let follows_ident = matches!(
                    utf8::decode(self.buf.tail(self.pos + 1)),
                    Some((c, _)) if c == '_' || utf8::is_alphabetic(c)
                );
                if follows_ident {
                    self.scan_identifier()
                } else {
                    self.bump_byte();
                    self.make(TokenKind::Underscore)
                }
            }
            b'(' => self.single(TokenKind::LParen),
            b')' => self.single(TokenKind::RParen),
            b'[' => self.single(TokenKind::LBracket),
            b']' => self.single(TokenKind::RBracket),
            b';' => self.single(TokenKind::Semicolon),
            b',' => self.single(TokenKind::Comma),
            b'.' => self.single(TokenKind::Dot),
            b':' => self.single(TokenKind::Colon),
            b'+' => self.single(TokenKind::Plus),
            b'-' => self.single(TokenKind::Minus),
            b'*' => self.single(TokenKind::Star),
            b'/' => self.single(TokenKind::Slash),
            b'%' => self.single(TokenKind::Percent),
            b'^' => self.single(TokenKind::Caret),
            b'~' => self.single(TokenKind::Tilde),
            b'=' => self.one_or_two(b'=', TokenKind::EqEq, TokenKind::Assign),
            b'!' => self.one_or_two(b'=', TokenKind::NotEq, TokenKind::Bang),
            b'<' => self.one_or_two(b'=', TokenKind::LessEq, TokenKind::Less),
            b'>' => self.one_or_two(b'=', TokenKind::GreaterEq, TokenKind::Greater),
            b'&' => self.one_or_two(b'&', TokenKind::AmpAmp, TokenKind::Amp),
            b'|' => self.one_or_two(b'|', TokenKind::PipePipe, TokenKind::Pipe),
            _ => match utf8::decode(self.buf.tail(self.pos)) {
                Some((c, _)) if utf8::is_identifier_char(c, true) => self.scan_identifier(),
                Some((c, width)) => {
                    self.consume_n(width);
                    self.error_token(diags, format!("Unexpected character '{c}'"))
                }
                None => {
                    let byte = self.current();
                    self.bump_byte();
                    self.error_token(diags, format!("Invalid UTF-8 byte 0x{byte:02X}"))
                }
            },
        }
    }

    fn single(&mut self, kind: TokenKind) -> Token {
        self.bump_byte();
        self.make(kind)
    }

    fn one_or_two(&mut self, second: u8, two: TokenKind, one: TokenKind) -> Token {
        self.bump_byte();
        if self.current() == second {
            self.bump_byte();
            self.make(two)
        } else {
            self.make(one)
        }
    }

    fn scan_identifier(&mut self) -> Token {
        let mut text = String::new();
        text.push(self.advance_char());
        while let Some((c, _)) = utf8::decode(self.buf.tail(self.pos)) {
            if !utf8::is_identifier_char(c, false) {
                break;
            }
            self.advance_char();
            text.push(c);
        }
        match keywords::lookup(&text) {
            Some(kind) => self.make(kind),
            None => self.make_value(TokenKind::Ident, TokenValue::Text(text)),
        }
    }

    fn scan_number(&mut self, diags: &mut DiagnosticEngine) -> Token {
        self.eat_digits();
        let integral_end = self.pos;
        if self.current() == b'.' && self.peek_byte().is_ascii_digit() {
            self.bump_byte();
            self.eat_digits();
            self.warn(
                diags,
                self.start_loc,
                "Floating-point numbers are not fully supported yet; truncating to integer value"
                    .to_string(),
            );
        }

        if self.pos - self.start > MAX_NUMBER_LEXEME {
            return self.error_token(
                diags,
                format!("Numeric literal is longer than {MAX_NUMBER_LEXEME} characters"),
            );
        }

        let mut value: i64 = 0;
        for &digit in &self.buf.bytes()[self.start..integral_end] {
            let step = value
                .checked_mul(10)
                .and_then(|v| v.checked_add(i64::from(digit - b'0')));
            match step {
                Some(next) if next <= self.target.max_literal() => value = next,
                _ => {
                    return self.error_token(
                        diags,
                        format!(
                            "Numeric literal does not fit the {}-bit target word",
                            self.target.word_bits()
                        ),
                    );
                }
            }
        }
        self.make_value(TokenKind::Number, TokenValue::Int(value))
    }

    fn eat_digits(&mut self) {
        while self.current().is_ascii_digit() {
            self.bump_byte();
        }
    }

    fn scan_string(&mut self, diags: &mut DiagnosticEngine) -> Token {
        self.bump_byte(); // opening quote
        let resume = self.snapshot();
        let mut bytes: Vec<u8> = Vec::new();
        loop {
            if self.at_eof() || self.current() == b'\n' {
                return self.unterminated_string(diags, resume);
            }
            match self.current() {
                b'"' => {
                    self.bump_byte();
                    break;
                }
                b'\\' => {
                    let escape_loc = SourceLoc::new(self.line, self.column);
                    self.bump_byte();
                    match escape::decode(self.buf.tail(self.pos)) {
                        Ok((Escaped::Codepoint(c), consumed)) => {
                            self.consume_n(consumed);
                            let mut utf8_buf = [0u8; 4];
                            bytes.extend_from_slice(c.encode_utf8(&mut utf8_buf).as_bytes());
                        }
                        Ok((Escaped::RawByte(byte), consumed)) => {
                            self.consume_n(consumed);
                            bytes.push(byte);
                        }
                        Err((error, consumed)) => {
                            report!(
                                diags,
                                Diagnostic::error(DiagKind::Lexical)
                                    .at(self.buf.filename(), escape_loc)
                                    .with_message(error.to_string())
                            );
                            self.consume_n(consumed);
                        }
                    }
                }
                byte if byte < 0x80 => {
                    bytes.push(byte);
                    self.bump_byte();
                }
                _ => {
                    // Multi-byte UTF-8 in the body is carried through
                    // verbatim; ill-formed bytes too (flagged at the end).
                    match utf8::decode(self.buf.tail(self.pos)) {
                        Some((_, width)) => {
                            let tail = self.buf.tail(self.pos);
                            bytes.extend_from_slice(&tail[..width]);
                            self.consume_n(width);
                        }
                        None => {
                            bytes.push(self.current());
                            self.bump_byte();
                        }
                    }
                }
            }
        }
        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(error) => {
                self.warn(
                    diags,
                    self.start_loc,
                    "String literal contains bytes that are not valid UTF-8".to_string(),
                );
                String::from_utf8_lossy(error.as_bytes()).into_owned()
            }
        };
        self.make_value(TokenKind::StrLit, TokenValue::Text(text))
    }

    /// Unterminated string: report, rewind to just after the opening
    /// quote, and hand back an error token spanning only the quote. The
    /// body re-lexes as ordinary tokens, so recovery can still find the
    /// statement terminator.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "source length is bounded by the u32 span space"
    )]
    fn unterminated_string(&mut self, diags: &mut DiagnosticEngine, resume: Snapshot) -> Token {
        self.restore(resume);
        let message = "Unterminated string literal".to_string();
        report!(
            diags,
            Diagnostic::error(DiagKind::Lexical)
                .at(self.buf.filename(), self.start_loc)
                .with_message(message.clone())
                .with_suggestion("add a closing '\"'")
        );
        Token::with_value(
            TokenKind::Error,
            TokenValue::Text(message),
            Span::new(self.start as u32, self.start as u32 + 1),
            self.start_loc,
        )
    }

    fn scan_char(&mut self, diags: &mut DiagnosticEngine) -> Token {
        self.bump_byte(); // opening quote
        if self.at_eof() || self.current() == b'\n' {
            return self.error_token(diags, "Unterminated character literal".to_string());
        }
        let c = match self.current() {
            b'\'' => {
                self.bump_byte();
                return self.error_token(diags, "Empty character literal".to_string());
            }
            b'\\' => {
                self.bump_byte();
                match escape::decode(self.buf.tail(self.pos)) {
                    Ok((Escaped::Codepoint(c), consumed)) => {
                        self.consume_n(consumed);
                        c
                    }
                    Ok((Escaped::RawByte(byte), consumed)) => {
                        self.consume_n(consumed);
                        byte as char
                    }
                    Err((error, consumed)) => {
                        self.consume_n(consumed);
                        // Take the closing quote too, so one bad escape
                        // is one diagnostic and the next token starts
                        // after the literal.
                        if self.current() == b'\'' {
                            self.bump_byte();
                        }
                        return self.error_token(diags, error.to_string());
                    }
                }
            }
            _ => match utf8::decode(self.buf.tail(self.pos)) {
                Some((c, width)) => {
                    self.consume_n(width);
                    c
                }
                None => {
                    self.bump_byte();
                    return self
                        .error_token(diags, "Invalid UTF-8 in character literal".to_string());
                }
            },
        };
        if self.current() == b'\'' {
            self.bump_byte();
            self.make_value(TokenKind::CharLit, TokenValue::Char(c))
        } else {
            self.error_token(diags, "Unterminated character literal".to_string())
        }
    }
}

/// Lex a whole source into a token vector ending with `Eof`.
///
/// Convenience for tests and the driver's `--stop-after-lexing` dump.
pub fn tokenize(
    source: &str,
    filename: &str,
    target: TargetInfo,
    diags: &mut DiagnosticEngine,
) -> Vec<Token> {
    let mut lexer = Lexer::new(SourceBuffer::from_str(source, filename), target);
    let mut tokens = Vec::new();
    loop {
        let token = lexer.next_token(diags);
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            break;
        }
    }
    tokens
}
