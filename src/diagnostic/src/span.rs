//! Spans - selections in source code
//!
//! Unlike a [`Caret`], a piece of input has a beginning and an end. Spans can
//! cross lines, and can be empty, which is how zero-width things like a
//! missing token are located.

use std::cmp::{max, min};
use std::fmt;

use crate::caret::Caret;

/// A contiguous span between two carets. The span of "the" in "|the|" is
/// between the `|`s, so it runs from column 0 to column 3.
#[derive(Clone, Debug, Default, Copy, Eq, Hash, PartialEq)]
pub struct Span {
    start: Caret,
    end: Caret,
}

impl Span {
    /// Return a new span over the two carets, which don't need to be sorted.
    pub fn new(l1: Caret, l2: Caret) -> Self {
        let start = min(l1, l2);
        let end = max(l1, l2);
        Self { start, end }
    }

    /// An empty span sitting at `caret`.
    pub fn point(caret: Caret) -> Self {
        Self {
            start: caret,
            end: caret,
        }
    }

    /// Where the span starts.
    pub fn start(&self) -> Caret {
        self.start
    }

    /// Where the span ends.
    pub fn end(&self) -> Caret {
        self.end
    }

    /// Is this span zero-width?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Does this span cover `other` completely?
    pub fn contains(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// The overlap of two spans, or [`None`] if they don't overlap.
    ///
    /// An empty span overlaps a span that it sits inside of, or at the start
    /// of, so zero-width highlights still show up.
    pub fn intersection(&self, other: Span) -> Option<Span> {
        let lower_end = min(self.end(), other.end());
        let higher_start = max(self.start(), other.start());

        if lower_end > higher_start
            || (lower_end == higher_start
                && (self.is_empty() || other.is_empty())
                && self.contains(other) | other.contains(*self))
        {
            Some(Span::new(higher_start, lower_end))
        } else {
            None
        }
    }
}

impl ::std::ops::Add for Span {
    type Output = Self;

    /// The smallest span covering both spans and anything between them.
    fn add(self, other: Self) -> Self {
        let start = min(self.start, other.start);
        let end = max(self.end, other.end);
        Self::new(start, end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn span_caret_order() {
        let l = Caret::new(2, 200);
        let r = Caret::new(10, 100);
        assert_eq!(Span::new(l, r), Span::new(r, l));
    }

    #[test]
    fn span_over() {
        let l = Span::new(Caret::new(2, 200), Caret::new(10, 100));
        let r = Span::new(Caret::new(0, 0), Caret::new(0, 100));
        assert_eq!(l + r, Span::new(Caret::new(0, 0), Caret::new(10, 100)))
    }

    #[test]
    fn inner_span() {
        let l = Span::new(Caret::new(0, 0), Caret::new(100, 100));
        let r = Span::new(Caret::new(0, 0), Caret::new(10, 10));
        assert_eq!(l + r, l);
        assert!(l.contains(r));
        assert!(!r.contains(l));
    }

    #[test]
    fn empty_span_intersects_line() {
        let line = Span::new(Caret::new(3, 0), Caret::new(3, 20));
        let point = Span::point(Caret::new(3, 4));
        assert_eq!(line.intersection(point), Some(point));
    }

    #[test]
    fn disjoint_spans_do_not_intersect() {
        let l = Span::new(Caret::new(0, 0), Caret::new(0, 3));
        let r = Span::new(Caret::new(0, 5), Caret::new(0, 8));
        assert_eq!(l.intersection(r), None);
    }
}
