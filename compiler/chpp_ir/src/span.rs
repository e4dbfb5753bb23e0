//! Source location types.
//!
//! Two views of a location are carried side by side:
//!
//! - [`Span`] — compact byte-offset range into the source buffer. This is
//!   what ties a token back to its lexeme slice.
//! - [`SourceLoc`] — 1-based line and column for human-facing messages.
//!   Columns count **bytes** of the encoded source, not codepoints, so an
//!   identifier like `ћ` occupies columns 1..2. This keeps reported
//!   offsets reproducible regardless of how the terminal renders Cyrillic.

use std::fmt;

/// Byte-offset span into the source buffer.
///
/// Layout: 8 bytes total. `start` is inclusive, `end` exclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Dummy span for synthesized nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Length of the span in bytes.
    #[inline]
    pub const fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Check if the span is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Merge two spans to create one covering both.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Convert to a `std::ops::Range` for slicing the source buffer.
    #[inline]
    pub fn to_range(self) -> std::ops::Range<usize> {
        self.start as usize..self.end as usize
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line/column pair.
///
/// Attached to every token and AST node. Column counting is byte-based;
/// see the module docs.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct SourceLoc {
    pub line: u32,
    pub column: u32,
}

impl SourceLoc {
    /// Start of the file.
    pub const START: SourceLoc = SourceLoc { line: 1, column: 1 };

    /// Create a new location.
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        SourceLoc { line, column }
    }
}

impl Default for SourceLoc {
    fn default() -> Self {
        SourceLoc::START
    }
}

impl fmt::Display for SourceLoc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

// Size assertion to prevent accidental regressions.
#[cfg(target_pointer_width = "64")]
const _: () = assert!(std::mem::size_of::<Span>() == 8);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_basics() {
        let span = Span::new(10, 20);
        assert_eq!(span.len(), 10);
        assert!(!span.is_empty());
        assert_eq!(span.to_range(), 10..20);
    }

    #[test]
    fn span_merge_covers_both() {
        let a = Span::new(10, 20);
        let b = Span::new(15, 30);
        let merged = a.merge(b);
        assert_eq!(merged, Span::new(10, 30));
    }

    #[test]
    fn span_merge_disjoint() {
        let a = Span::new(20, 30);
        let b = Span::new(0, 5);
        assert_eq!(a.merge(b), Span::new(0, 30));
    }

    #[test]
    fn span_display() {
        assert_eq!(format!("{}", Span::new(3, 7)), "3..7");
        assert_eq!(format!("{:?}", Span::new(3, 7)), "3..7");
    }

    #[test]
    fn loc_display() {
        assert_eq!(format!("{}", SourceLoc::new(4, 12)), "4:12");
    }

    #[test]
    fn loc_default_is_file_start() {
        assert_eq!(SourceLoc::default(), SourceLoc::START);
        assert_eq!(SourceLoc::START.line, 1);
        assert_eq!(SourceLoc::START.column, 1);
    }
}
