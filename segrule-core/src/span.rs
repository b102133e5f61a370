//! Byte spans produced by pattern matches

use std::ops::Range;

/// Half-open byte interval `[start, end)` within a text
///
/// Offsets always fall on UTF-8 character boundaries because they come from
/// regex matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Span {
    /// First byte covered by the span
    pub start: usize,
    /// One past the last byte covered by the span
    pub end: usize,
}

impl Span {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start {start} past end {end}");
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span is zero-width
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Whether two spans touch the same position.
    ///
    /// Non-empty spans overlap when they share at least one byte. A zero-width
    /// span at `p` overlaps `[s, e)` when `s <= p < e`, and another zero-width
    /// span only when both sit at `p`.
    pub fn overlaps(&self, other: &Span) -> bool {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => self.start == other.start,
            (true, false) => other.start <= self.start && self.start < other.end,
            (false, true) => self.start <= other.start && other.start < self.end,
            (false, false) => self.start < other.end && other.start < self.end,
        }
    }

    /// The span as a range, for slicing
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<fancy_regex::Match<'_>> for Span {
    fn from(m: fancy_regex::Match<'_>) -> Self {
        Self::new(m.start(), m.end())
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_spans() {
        assert!(Span::new(0, 3).overlaps(&Span::new(2, 4)));
        assert!(Span::new(2, 4).overlaps(&Span::new(0, 3)));
        assert!(Span::new(0, 10).overlaps(&Span::new(4, 5)));
    }

    #[test]
    fn test_adjacent_spans_do_not_overlap() {
        assert!(!Span::new(0, 3).overlaps(&Span::new(3, 5)));
        assert!(!Span::new(3, 5).overlaps(&Span::new(0, 3)));
    }

    #[test]
    fn test_zero_width_spans() {
        let point = Span::new(3, 3);
        assert!(point.overlaps(&Span::new(3, 5)));
        assert!(point.overlaps(&Span::new(1, 4)));
        assert!(!point.overlaps(&Span::new(1, 3)));
        assert!(point.overlaps(&Span::new(3, 3)));
        assert!(!point.overlaps(&Span::new(4, 4)));
    }

    #[test]
    fn test_len_and_range() {
        let span = Span::new(2, 7);
        assert_eq!(span.len(), 5);
        assert!(!span.is_empty());
        assert_eq!(&"hello world"[span.range()], "llo w");
        assert_eq!(span.to_string(), "[2, 7)");
    }
}
