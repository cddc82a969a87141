//! Diff result: the ordered, coalesced span list of one run.

use std::fmt;

use crate::span::{DiffSpan, SpanStatus};

/// Work counters from one diff run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DiffStats {
    /// Number of search windows processed
    pub ranges_processed: usize,
    /// Destination positions whose cached match was reused
    pub cache_hits: usize,
    /// Destination positions that needed a source scan
    pub cache_misses: usize,
    /// Element equality tests performed
    pub comparisons: usize,
    /// Deepest window nesting level reached
    pub max_depth: usize,
    /// Windows emitted unmatched because of `max_depth`
    pub depth_limited: usize,
}

/// One covered position pair, as a grid renderer sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffRow {
    /// Status of the span this row belongs to
    pub status: SpanStatus,
    /// Source position, `None` for added rows
    pub source: Option<usize>,
    /// Destination position, `None` for deleted rows
    pub dest: Option<usize>,
}

/// Ordered edit script between a source and a destination sequence.
///
/// Spans are in destination order; a `DeleteSource` span sits where the
/// deleted run falls relative to its neighbours. Read in order, the spans
/// cover `0..dest_len` and `0..source_len` exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct DiffResult {
    spans: Vec<DiffSpan>,
    source_len: usize,
    dest_len: usize,
    stats: DiffStats,
}

impl DiffResult {
    pub(crate) fn new(
        spans: Vec<DiffSpan>,
        source_len: usize,
        dest_len: usize,
        stats: DiffStats,
    ) -> Self {
        Self {
            spans,
            source_len,
            dest_len,
            stats,
        }
    }

    /// All spans in order
    pub fn spans(&self) -> &[DiffSpan] {
        &self.spans
    }

    /// Iterate over the spans
    pub fn iter(&self) -> std::slice::Iter<'_, DiffSpan> {
        self.spans.iter()
    }

    /// Take the spans
    pub fn into_spans(self) -> Vec<DiffSpan> {
        self.spans
    }

    /// Number of spans
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// True only when both inputs were empty
    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Length of the source sequence
    pub fn source_len(&self) -> usize {
        self.source_len
    }

    /// Length of the destination sequence
    pub fn dest_len(&self) -> usize {
        self.dest_len
    }

    /// Work counters of the run
    pub fn stats(&self) -> &DiffStats {
        &self.stats
    }

    /// Check if the inputs were equal
    pub fn is_identical(&self) -> bool {
        self.spans.iter().all(|s| !s.status().is_change())
    }

    fn total(&self, status: SpanStatus) -> usize {
        self.spans
            .iter()
            .filter(|s| s.status() == status)
            .map(DiffSpan::len)
            .sum()
    }

    /// Destination elements left unchanged
    pub fn unchanged_count(&self) -> usize {
        self.total(SpanStatus::NoChange)
    }

    /// Destination elements that are replaced or added
    pub fn changed_count(&self) -> usize {
        self.dest_len - self.unchanged_count()
    }

    /// Destination elements absent from the source
    pub fn added_count(&self) -> usize {
        self.total(SpanStatus::AddDestination)
    }

    /// Source elements absent from the destination
    pub fn deleted_count(&self) -> usize {
        self.total(SpanStatus::DeleteSource)
    }

    /// Elements replaced (counted once per side)
    pub fn replaced_count(&self) -> usize {
        self.total(SpanStatus::Replace)
    }

    /// Expand spans into one row per covered position pair.
    ///
    /// ```
    /// use seqdiff::{diff, SpanStatus};
    ///
    /// let result = diff(&[1, 2], &[1, 3, 4]).unwrap();
    /// let rows: Vec<_> = result.rows().map(|r| (r.status, r.source, r.dest)).collect();
    /// assert_eq!(
    ///     rows,
    ///     vec![
    ///         (SpanStatus::NoChange, Some(0), Some(0)),
    ///         (SpanStatus::Replace, Some(1), Some(1)),
    ///         (SpanStatus::AddDestination, None, Some(2)),
    ///     ]
    /// );
    /// ```
    pub fn rows(&self) -> impl Iterator<Item = DiffRow> + '_ {
        self.spans.iter().flat_map(|span| {
            (0..span.len()).map(move |i| DiffRow {
                status: span.status(),
                source: span.source_index().map(|s| s + i),
                dest: span.dest_index().map(|d| d + i),
            })
        })
    }

    /// Check that the spans partition both inputs, in order.
    pub fn covers_inputs(&self) -> bool {
        let mut next_dest = 0;
        let mut next_source = 0;

        for span in &self.spans {
            if span.is_empty() {
                return false;
            }
            let status = span.status();
            match span.dest_index() {
                Some(d) if status.touches_dest() && d == next_dest => next_dest += span.len(),
                None if !status.touches_dest() => {}
                _ => return false,
            }
            match span.source_index() {
                Some(s) if status.touches_source() && s == next_source => next_source += span.len(),
                None if !status.touches_source() => {}
                _ => return false,
            }
        }

        next_dest == self.dest_len && next_source == self.source_len
    }
}

impl<'a> IntoIterator for &'a DiffResult {
    type Item = &'a DiffSpan;
    type IntoIter = std::slice::Iter<'a, DiffSpan>;

    fn into_iter(self) -> Self::IntoIter {
        self.spans.iter()
    }
}

impl fmt::Display for DiffResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            writeln!(f, "{span}")?;
        }
        Ok(())
    }
}
