//! Span model: one contiguous entry of an edit script.
//!
//! A span tags a run of destination and/or source positions with what
//! happened to them. Positions on a side the span does not touch are `None`.

use std::fmt;
use std::ops::Range;

/// What happened to the positions covered by a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanStatus {
    /// Equal run on both sides
    NoChange,
    /// Equal-length runs on both sides whose elements differ
    Replace,
    /// Source run with no destination counterpart
    DeleteSource,
    /// Destination run with no source counterpart
    AddDestination,
}

impl SpanStatus {
    /// Whether the span covers destination positions
    #[inline]
    pub fn touches_dest(self) -> bool {
        !matches!(self, Self::DeleteSource)
    }

    /// Whether the span covers source positions
    #[inline]
    pub fn touches_source(self) -> bool {
        !matches!(self, Self::AddDestination)
    }

    /// Whether the span is an edit (anything other than `NoChange`)
    #[inline]
    pub fn is_change(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

impl fmt::Display for SpanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NoChange => "NoChange",
            Self::Replace => "Replace",
            Self::DeleteSource => "DeleteSource",
            Self::AddDestination => "AddDestination",
        };
        f.write_str(name)
    }
}

/// One entry of a diff result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffSpan {
    status: SpanStatus,
    dest_index: Option<usize>,
    source_index: Option<usize>,
    length: usize,
}

impl DiffSpan {
    /// Equal run `dest_index..+length` / `source_index..+length`.
    pub fn no_change(dest_index: usize, source_index: usize, length: usize) -> Self {
        Self::checked(SpanStatus::NoChange, Some(dest_index), Some(source_index), length)
    }

    /// Replaced run of `length` elements on both sides.
    pub fn replace(dest_index: usize, source_index: usize, length: usize) -> Self {
        Self::checked(SpanStatus::Replace, Some(dest_index), Some(source_index), length)
    }

    /// Source run removed from the destination.
    pub fn delete_source(source_index: usize, length: usize) -> Self {
        Self::checked(SpanStatus::DeleteSource, None, Some(source_index), length)
    }

    /// Destination run absent from the source.
    pub fn add_destination(dest_index: usize, length: usize) -> Self {
        Self::checked(SpanStatus::AddDestination, Some(dest_index), None, length)
    }

    fn checked(
        status: SpanStatus,
        dest_index: Option<usize>,
        source_index: Option<usize>,
        length: usize,
    ) -> Self {
        debug_assert!(length > 0, "span length must be at least 1");
        Self {
            status,
            dest_index,
            source_index,
            length,
        }
    }

    /// Edit status
    #[inline]
    pub fn status(&self) -> SpanStatus {
        self.status
    }

    /// First destination position, `None` for `DeleteSource`
    #[inline]
    pub fn dest_index(&self) -> Option<usize> {
        self.dest_index
    }

    /// First source position, `None` for `AddDestination`
    #[inline]
    pub fn source_index(&self) -> Option<usize> {
        self.source_index
    }

    /// Number of positions covered on each touched side
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// Always false: spans cover at least one position
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Destination positions covered
    pub fn dest_range(&self) -> Option<Range<usize>> {
        self.dest_index.map(|d| d..d + self.length)
    }

    /// Source positions covered
    pub fn source_range(&self) -> Option<Range<usize>> {
        self.source_index.map(|s| s..s + self.length)
    }

    /// Grow the span by `n` positions on every side it touches.
    #[inline]
    pub(crate) fn extend(&mut self, n: usize) {
        self.length += n;
    }
}

impl fmt::Display for DiffSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn pos(i: Option<usize>) -> String {
            i.map_or_else(|| "-".to_string(), |i| i.to_string())
        }
        write!(
            f,
            "{} (dest: {}, source: {}) {}",
            self.status,
            pos(self.dest_index),
            pos(self.source_index),
            self.length
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_set_sides() {
        let add = DiffSpan::add_destination(3, 2);
        assert_eq!(add.status(), SpanStatus::AddDestination);
        assert_eq!(add.dest_range(), Some(3..5));
        assert_eq!(add.source_range(), None);

        let del = DiffSpan::delete_source(1, 4);
        assert_eq!(del.dest_index(), None);
        assert_eq!(del.source_range(), Some(1..5));

        let rep = DiffSpan::replace(0, 2, 1);
        assert_eq!(rep.dest_range(), Some(0..1));
        assert_eq!(rep.source_range(), Some(2..3));
    }

    #[test]
    fn test_extend() {
        let mut span = DiffSpan::no_change(0, 0, 2);
        span.extend(3);
        assert_eq!(span.len(), 5);
        assert_eq!(span.dest_range(), Some(0..5));
    }

    #[test]
    fn test_status_sides() {
        assert!(SpanStatus::Replace.touches_dest() && SpanStatus::Replace.touches_source());
        assert!(!SpanStatus::DeleteSource.touches_dest());
        assert!(!SpanStatus::AddDestination.touches_source());
        assert!(!SpanStatus::NoChange.is_change());
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DiffSpan::no_change(2, 2, 2).to_string(),
            "NoChange (dest: 2, source: 2) 2"
        );
        assert_eq!(
            DiffSpan::delete_source(0, 2).to_string(),
            "DeleteSource (dest: -, source: 0) 2"
        );
    }
}
