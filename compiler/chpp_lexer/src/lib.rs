//! UTF-8 aware lexer for Чпп.
//!
//! Turns a byte buffer into a [`Token`] stream. Identifiers may use any
//! alphabetic codepoint the language recognizes (ASCII plus the Cyrillic
//! block), keywords are Serbian Cyrillic resolved by exact byte equality,
//! and columns count bytes so reported offsets stay reproducible.
//!
//! The lexer is streaming with a depth-one lookahead: [`Lexer::peek_token`]
//! never consumes. Ill-formed input produces `TokenKind::Error` tokens
//! whose message rides in the token's text payload; the corresponding
//! Lexical diagnostic has already been reported by the time the token is
//! returned.
//!
//! [`Token`]: chpp_ir::Token

mod escape;
pub mod keywords;
mod scanner;
mod source_buffer;
pub mod utf8;

pub use scanner::{tokenize, Lexer};
pub use source_buffer::SourceBuffer;
