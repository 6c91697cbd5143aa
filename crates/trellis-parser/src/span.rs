//! Byte spans into the diagram source text.
//!
//! The transpiler is line-oriented; spans are computed from line offsets
//! so diagnostics can point at the offending line in the original text.

use std::ops::Range;

/// A half-open byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }

    /// Start offset, inclusive.
    pub fn start(&self) -> usize {
        self.start
    }

    /// End offset, exclusive.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for zero-length spans.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
