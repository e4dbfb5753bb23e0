//! Owned source buffer.
//!
//! The lexer owns a full copy of the input bytes for its lifetime; token
//! spans index into this buffer. Reads past the end yield `0x00` — the
//! NUL-sentinel contract expressed with bounds-checked access, so scan
//! loops terminate at EOF without explicit length checks at every call
//! site.
//!
//! The buffer is bytes, not `str`: Чпп sources are expected to be UTF-8
//! without BOM, but ill-formed input must still flow through the lexer
//! and come out as error tokens rather than abort the load.

use std::borrow::Cow;

use chpp_ir::Span;

/// Owned copy of one source file.
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    bytes: Vec<u8>,
    filename: String,
}

impl SourceBuffer {
    /// Take ownership of raw file bytes.
    pub fn new(bytes: Vec<u8>, filename: impl Into<String>) -> Self {
        SourceBuffer {
            bytes,
            filename: filename.into(),
        }
    }

    /// Convenience for tests and in-memory sources.
    pub fn from_str(source: &str, filename: impl Into<String>) -> Self {
        Self::new(source.as_bytes().to_vec(), filename)
    }

    /// Length of the source in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True for an empty source.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The full byte content.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The source filename as given to the driver.
    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Byte at `pos`, or the `0x00` sentinel at and past the end.
    #[inline]
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.bytes.get(pos).copied().unwrap_or(0)
    }

    /// The remaining bytes from `pos` (empty at and past the end).
    #[inline]
    pub fn tail(&self, pos: usize) -> &[u8] {
        self.bytes.get(pos..).unwrap_or(&[])
    }

    /// The lexeme slice a span points at.
    pub fn slice(&self, span: Span) -> &[u8] {
        self.bytes.get(span.to_range()).unwrap_or(&[])
    }

    /// The lexeme slice as text (lossy only on ill-formed input).
    pub fn slice_text(&self, span: Span) -> Cow<'_, str> {
        String::from_utf8_lossy(self.slice(span))
    }
}
