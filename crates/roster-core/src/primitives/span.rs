// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::primitives::minute::{MinuteOfDay, Minutes};

/// A half-open `[start, end)` span on the minute axis of one calendar day.
///
/// The end may lie past 1440 when the span runs over midnight; it still
/// belongs to its start date.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MinuteSpan {
    start: MinuteOfDay,
    end: MinuteOfDay,
}

impl MinuteSpan {
    /// Creates a span, normalizing an inverted pair to the empty span at `start`.
    #[inline]
    pub fn new(start: MinuteOfDay, end: MinuteOfDay) -> Self {
        if end < start {
            MinuteSpan { start, end: start }
        } else {
            MinuteSpan { start, end }
        }
    }

    #[inline]
    pub const fn start(&self) -> MinuteOfDay {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> MinuteOfDay {
        self.end
    }

    #[inline]
    pub fn into_inner(self) -> (MinuteOfDay, MinuteOfDay) {
        (self.start, self.end)
    }

    #[inline]
    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    #[inline]
    pub fn contains(&self, p: MinuteOfDay) -> bool {
        self.start <= p && p < self.end
    }

    #[inline]
    pub fn overlaps(&self, other: &MinuteSpan) -> bool {
        !self.is_empty() && !other.is_empty() && self.start < other.end && other.start < self.end
    }

    /// Signed idle time from the end of the earlier span to the start of the
    /// later one. Negative when the spans overlap.
    #[inline]
    pub fn gap_to(&self, other: &MinuteSpan) -> Minutes {
        if self.start <= other.start {
            other.start - self.end
        } else {
            self.start - other.end
        }
    }

    /// The same span expressed on the axis of a day `days` later.
    #[inline]
    pub fn on_day_axis(&self, days: i32) -> MinuteSpan {
        MinuteSpan {
            start: self.start.on_day_axis(days),
            end: self.end.on_day_axis(days),
        }
    }
}

impl std::fmt::Display for MinuteSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(start: i32, end: i32) -> MinuteSpan {
        MinuteSpan::new(MinuteOfDay::new(start), MinuteOfDay::new(end))
    }

    #[test]
    fn test_inverted_pair_collapses_to_empty() {
        let s = span(600, 500);
        assert!(s.is_empty());
        assert_eq!(s.start(), MinuteOfDay::new(600));
    }

    #[test]
    fn test_duration_and_contains() {
        let s = span(360, 845);
        assert_eq!(s.duration().value(), 485);
        assert!(s.contains(MinuteOfDay::new(360)));
        assert!(s.contains(MinuteOfDay::new(844)));
        assert!(!s.contains(MinuteOfDay::new(845)));
    }

    #[test]
    fn test_overlap() {
        assert!(span(100, 200).overlaps(&span(150, 250)));
        assert!(span(100, 200).overlaps(&span(100, 200)));
        assert!(!span(100, 200).overlaps(&span(200, 300)));
        assert!(!span(100, 200).overlaps(&span(150, 150)));
    }

    #[test]
    fn test_gap_is_symmetric_and_signed() {
        let a = span(240, 510);
        let b = span(750, 990);
        assert_eq!(a.gap_to(&b).value(), 240);
        assert_eq!(b.gap_to(&a).value(), 240);
        assert!(span(100, 200).gap_to(&span(150, 250)).is_negative());
    }

    #[test]
    fn test_cross_midnight_span_on_next_day_axis() {
        // 19:30-00:45 seen from the next day is [-270, 45).
        let s = span(1170, 1485);
        let shifted = s.on_day_axis(1);
        assert_eq!(shifted.end(), MinuteOfDay::new(45));
        assert_eq!(shifted.start().value(), -270);
        assert_eq!(shifted.duration(), s.duration());
    }
}
