//! Turning emitted spans into the final edit script.
//!
//! The engine emits spans in destination order. Coalescing merges
//! neighbours so that:
//! - consecutive `NoChange` runs become one span
//! - every maximal unmatched region becomes at most one `Replace` plus one
//!   `AddDestination` or `DeleteSource` for the part the shorter side lacks

use smallvec::SmallVec;

use crate::span::{DiffSpan, SpanStatus};

/// Spans for an unmatched region of `dest_len` x `source_len` elements.
///
/// The overlap is a `Replace`; what is left on the longer side is an add or a
/// delete. Empty regions produce nothing.
pub(crate) fn gap_spans(
    dest_start: usize,
    source_start: usize,
    dest_len: usize,
    source_len: usize,
) -> SmallVec<[DiffSpan; 2]> {
    let mut spans = SmallVec::new();
    let common = dest_len.min(source_len);
    if common > 0 {
        spans.push(DiffSpan::replace(dest_start, source_start, common));
    }
    if dest_len > common {
        spans.push(DiffSpan::add_destination(dest_start + common, dest_len - common));
    } else if source_len > common {
        spans.push(DiffSpan::delete_source(source_start + common, source_len - common));
    }
    spans
}

/// Pending unmatched region between two `NoChange` spans.
#[derive(Debug, Clone, Copy)]
struct Gap {
    dest_start: usize,
    source_start: usize,
    dest_len: usize,
    source_len: usize,
}

impl Gap {
    fn at(dest_start: usize, source_start: usize) -> Self {
        Self {
            dest_start,
            source_start,
            dest_len: 0,
            source_len: 0,
        }
    }

    fn absorb(&mut self, span: &DiffSpan) {
        if span.status().touches_dest() {
            self.dest_len += span.len();
        }
        if span.status().touches_source() {
            self.source_len += span.len();
        }
    }

    fn dest_end(&self) -> usize {
        self.dest_start + self.dest_len
    }

    fn source_end(&self) -> usize {
        self.source_start + self.source_len
    }
}

/// Merge adjacent compatible spans. Covered ranges are unchanged.
pub(crate) fn coalesce(spans: Vec<DiffSpan>) -> Vec<DiffSpan> {
    let mut out: Vec<DiffSpan> = Vec::with_capacity(spans.len());
    let mut gap = Gap::at(0, 0);

    for span in spans {
        if span.status() != SpanStatus::NoChange {
            gap.absorb(&span);
            continue;
        }

        let (dest, source) = match (span.dest_index(), span.source_index()) {
            (Some(d), Some(s)) => (d, s),
            _ => continue,
        };
        debug_assert_eq!(dest, gap.dest_end(), "spans out of destination order");
        debug_assert_eq!(source, gap.source_end(), "spans out of source order");

        let flushed = gap_spans(gap.dest_start, gap.source_start, gap.dest_len, gap.source_len);
        let merged = flushed.is_empty()
            && out
                .last()
                .is_some_and(|last| last.status() == SpanStatus::NoChange);
        out.extend(flushed);

        match out.last_mut() {
            Some(last) if merged => last.extend(span.len()),
            _ => out.push(span),
        }
        gap = Gap::at(dest + span.len(), source + span.len());
    }

    out.extend(gap_spans(gap.dest_start, gap.source_start, gap.dest_len, gap.source_len));
    out
}
