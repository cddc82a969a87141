//! Recursive anchor-match diff.
//!
//! Computes a span edit script between a source and a destination sequence.
//! This is a **pure algorithm module**: no rendering, no I/O.
//!
//! # Algorithm
//!
//! Work on a search window `dest x source` (both half-open ranges):
//!
//! 1. If either side of the window is empty, what remains is an add, a
//!    delete, or nothing.
//! 2. Otherwise find the anchor: the longest run of equal elements inside the
//!    window, scanning destination positions left to right and keeping the
//!    first of equally long candidates.
//! 3. No anchor: the whole window is unmatched.
//! 4. Anchor found: diff the window before it, emit it as `NoChange`, diff
//!    the window after it.
//!
//! Windows wait on an explicit work stack instead of the call stack, so long
//! inputs with many small anchors cannot overflow the thread's stack.
//!
//! Finally neighbouring spans are coalesced.
//!
//! # Match cache
//!
//! Finding the anchor needs, for each destination position, the longest
//! source run starting there. That search is memoized per destination
//! position in a [`MatchStateCache`] owned by the run. Windows only shrink
//! as recursion descends, so a cached match that still fits the window is
//! reused as is, and one that does not is recomputed.
//!
//! # Complexity
//!
//! - Time: close to linear for long unchanged runs, quadratic per window in
//!   the worst case
//! - Space: O(m) for the cache (dense), O(depth) for the pending window
//!   stack, which lives on the heap

use std::ops::Range;
use std::time::Instant;

use tracing::{debug, trace, warn};

use crate::cancel::CancelToken;
use crate::config::{DiffConfig, DiffLevel};
use crate::error::{DiffError, SeqResult, Side};
use crate::result::{DiffResult, DiffStats};
use crate::span::DiffSpan;
use crate::view::SequenceView;

use super::coalesce::{coalesce, gap_spans};
use super::state::{MatchState, MatchStateCache};

// =============================================================================
// Public API
// =============================================================================

/// Diff engine holding a configuration and an optional cancel token.
///
/// The engine itself is stateless between runs; every call to
/// [`diff`](Self::diff) builds its own cache, so one engine can serve many
/// threads.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    config: DiffConfig,
    cancel: Option<CancelToken>,
}

impl DiffEngine {
    /// Create an engine with the given configuration.
    pub fn new(config: DiffConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Check `token` at every recursive step.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Active configuration
    pub fn config(&self) -> &DiffConfig {
        &self.config
    }

    /// Diff `source` against `dest`.
    ///
    /// Returns the complete, coalesced span list, or an error if a view is
    /// malformed or the run was cancelled. Never returns partial results.
    ///
    /// # Example
    ///
    /// ```
    /// use seqdiff::{DiffConfig, DiffEngine, DiffSpan};
    ///
    /// let engine = DiffEngine::new(DiffConfig::default());
    /// let result = engine.diff(&["a", "b", "c", "d"], &["a", "x", "c", "d"]).unwrap();
    /// assert_eq!(
    ///     result.spans(),
    ///     &[
    ///         DiffSpan::no_change(0, 0, 1),
    ///         DiffSpan::replace(1, 1, 1),
    ///         DiffSpan::no_change(2, 2, 2),
    ///     ]
    /// );
    /// ```
    pub fn diff<S, D>(&self, source: &S, dest: &D) -> SeqResult<DiffResult>
    where
        S: SequenceView + ?Sized,
        D: SequenceView + ?Sized,
        D::Item: PartialEq<S::Item>,
    {
        let started = Instant::now();
        let source_len = source.len();
        let dest_len = dest.len();
        debug!(source_len, dest_len, level = ?self.config.level, "starting diff");

        let mut ctx = DiffContext::new(source, dest, &self.config, self.cancel.as_ref());
        if let Err(err) = ctx.run(0..dest_len, 0..source_len) {
            debug!(%err, "diff aborted");
            return Err(err);
        }

        let (spans, stats) = ctx.into_parts();
        let result = DiffResult::new(coalesce(spans), source_len, dest_len, stats);
        debug_assert!(result.covers_inputs(), "diff result does not cover its inputs");

        debug!(
            spans = result.len(),
            unchanged = result.unchanged_count(),
            elapsed_us = started.elapsed().as_micros() as u64,
            ranges = stats.ranges_processed,
            comparisons = stats.comparisons,
            "diff finished"
        );
        Ok(result)
    }
}

/// Diff two sequences with the default configuration.
pub fn diff<S, D>(source: &S, dest: &D) -> SeqResult<DiffResult>
where
    S: SequenceView + ?Sized,
    D: SequenceView + ?Sized,
    D::Item: PartialEq<S::Item>,
{
    diff_with_config(source, dest, DiffConfig::default())
}

/// Diff two sequences with a custom configuration.
pub fn diff_with_config<S, D>(source: &S, dest: &D, config: DiffConfig) -> SeqResult<DiffResult>
where
    S: SequenceView + ?Sized,
    D: SequenceView + ?Sized,
    D::Item: PartialEq<S::Item>,
{
    DiffEngine::new(config).diff(source, dest)
}

// =============================================================================
// Internal Context
// =============================================================================

/// Pending unit of work.
enum Step {
    /// Window still to be diffed, at its nesting depth
    Window {
        dest: Range<usize>,
        source: Range<usize>,
        depth: usize,
    },
    /// Anchor span to emit once everything before it is done
    Emit(DiffSpan),
}

/// Longest equal run chosen to split a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Anchor {
    dest: usize,
    source: usize,
    len: usize,
}

struct DiffContext<'a, S: ?Sized, D: ?Sized> {
    source: &'a S,
    dest: &'a D,
    source_len: usize,
    dest_len: usize,
    config: &'a DiffConfig,
    cancel: Option<&'a CancelToken>,
    cache: MatchStateCache,
    spans: Vec<DiffSpan>,
    stats: DiffStats,
}

impl<'a, S, D> DiffContext<'a, S, D>
where
    S: SequenceView + ?Sized,
    D: SequenceView + ?Sized,
    D::Item: PartialEq<S::Item>,
{
    fn new(
        source: &'a S,
        dest: &'a D,
        config: &'a DiffConfig,
        cancel: Option<&'a CancelToken>,
    ) -> Self {
        let source_len = source.len();
        let dest_len = dest.len();
        // Nothing is ever probed when one side is empty.
        let cache_len = if source_len == 0 { 0 } else { dest_len };
        Self {
            source,
            dest,
            source_len,
            dest_len,
            config,
            cancel,
            cache: MatchStateCache::new(cache_len, config.cache),
            spans: Vec::new(),
            stats: DiffStats::default(),
        }
    }

    fn into_parts(self) -> (Vec<DiffSpan>, DiffStats) {
        (self.spans, self.stats)
    }

    fn check_cancel(&self) -> SeqResult<()> {
        match self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }

    /// Diff the whole `dest x source` window, appending spans in destination
    /// order.
    fn run(&mut self, dest: Range<usize>, source: Range<usize>) -> SeqResult<()> {
        let mut pending = vec![Step::Window {
            dest,
            source,
            depth: 0,
        }];

        while let Some(step) = pending.pop() {
            let (dest, source, depth) = match step {
                Step::Emit(span) => {
                    self.spans.push(span);
                    continue;
                }
                Step::Window {
                    dest,
                    source,
                    depth,
                } => (dest, source, depth),
            };

            let Some(anchor) = self.process_range(&dest, &source, depth)? else {
                continue;
            };

            let depth = depth + 1;
            self.stats.max_depth = self.stats.max_depth.max(depth);

            // Popped in reverse: before-window, anchor, after-window.
            pending.push(Step::Window {
                dest: anchor.dest + anchor.len..dest.end,
                source: anchor.source + anchor.len..source.end,
                depth,
            });
            pending.push(Step::Emit(DiffSpan::no_change(
                anchor.dest,
                anchor.source,
                anchor.len,
            )));
            pending.push(Step::Window {
                dest: dest.start..anchor.dest,
                source: source.start..anchor.source,
                depth,
            });
        }

        Ok(())
    }

    /// Process one window.
    ///
    /// Unmatched windows are emitted directly; a matched window returns its
    /// anchor so the caller can schedule the windows around it.
    fn process_range(
        &mut self,
        dest: &Range<usize>,
        source: &Range<usize>,
        depth: usize,
    ) -> SeqResult<Option<Anchor>> {
        self.check_cancel()?;
        self.stats.ranges_processed += 1;

        if dest.is_empty() || source.is_empty() {
            self.push_unmatched(dest, source);
            return Ok(None);
        }

        if depth >= self.config.max_depth {
            if self.stats.depth_limited == 0 {
                warn!(
                    max_depth = self.config.max_depth,
                    ?dest,
                    ?source,
                    "depth limit reached, emitting remaining windows unmatched"
                );
            }
            self.stats.depth_limited += 1;
            self.push_unmatched(dest, source);
            return Ok(None);
        }

        trace!(?dest, ?source, depth, "processing range");

        let anchor = self.find_anchor(dest, source)?;
        if anchor.is_none() {
            self.push_unmatched(dest, source);
        }
        Ok(anchor)
    }

    fn push_unmatched(&mut self, dest: &Range<usize>, source: &Range<usize>) {
        self.spans
            .extend(gap_spans(dest.start, source.start, dest.len(), source.len()));
    }

    /// Find the longest equal run in the window.
    ///
    /// Destination positions are scanned left to right; a candidate replaces
    /// the current best only if strictly longer, so the first of equally
    /// long runs wins.
    fn find_anchor(
        &mut self,
        dest: &Range<usize>,
        source: &Range<usize>,
    ) -> SeqResult<Option<Anchor>> {
        let mut best: Option<Anchor> = None;
        let mut d = dest.start;

        while d < dest.end {
            let max_len = dest.end - d;
            if best.is_some_and(|b| max_len <= b.len) {
                // Nothing further right can be longer.
                break;
            }

            if self.cache.revalidate(d, source, max_len) {
                self.stats.cache_hits += 1;
            } else {
                self.stats.cache_misses += 1;
                self.longest_source_match(d, dest.end, source)?;
            }

            let MatchState::Matched { start, length } = self.cache.get(d) else {
                d += 1;
                continue;
            };

            let improved = best.is_none_or(|b| length > b.len);
            if improved {
                best = Some(Anchor {
                    dest: d,
                    source: start,
                    len: length,
                });
            }

            d += match self.config.level {
                DiffLevel::Fast => length,
                DiffLevel::Medium if improved => length,
                DiffLevel::Medium | DiffLevel::Perfect => 1,
            };
        }

        Ok(best)
    }

    /// Compute and cache the longest source run equal to the destination
    /// run starting at `d`.
    fn longest_source_match(
        &mut self,
        d: usize,
        dest_end: usize,
        source: &Range<usize>,
    ) -> SeqResult<()> {
        let max_dest_len = dest_end - d;
        let mut best_len = 0;
        let mut best_start = None;
        let mut s = source.start;

        while s < source.end {
            let max_len = max_dest_len.min(source.end - s);
            if max_len <= best_len {
                break;
            }

            let len = self.match_length(d, s, max_len)?;
            if len > best_len {
                best_len = len;
                best_start = Some(s);
            }

            s += match self.config.level {
                // Step past the best run found so far.
                DiffLevel::Fast | DiffLevel::Medium => best_len + 1,
                DiffLevel::Perfect => 1,
            };
        }

        match best_start {
            Some(start) => self.cache.set_match(d, start, best_len),
            None => self.cache.set_no_match(d),
        }
        Ok(())
    }

    /// Number of equal elements from `(d, s)`, at most `max_len`.
    fn match_length(&mut self, d: usize, s: usize, max_len: usize) -> SeqResult<usize> {
        let mut n = 0;
        while n < max_len {
            self.stats.comparisons += 1;
            let dest_item = self.dest_at(d + n)?;
            let source_item = self.source_at(s + n)?;
            if dest_item != source_item {
                break;
            }
            n += 1;
        }
        Ok(n)
    }

    fn dest_at(&self, index: usize) -> SeqResult<&'a D::Item> {
        self.dest
            .element_at(index)
            .ok_or_else(|| DiffError::out_of_range(Side::Destination, index, self.dest_len))
    }

    fn source_at(&self, index: usize) -> SeqResult<&'a S::Item> {
        self.source
            .element_at(index)
            .ok_or_else(|| DiffError::out_of_range(Side::Source, index, self.source_len))
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;
    use crate::config::CacheStrategy;
    use crate::span::SpanStatus;

    fn seq() -> impl Strategy<Value = Vec<u8>> {
        // Small alphabet so that matches are common.
        prop::collection::vec(0u8..4, 0..40)
    }

    fn any_level() -> impl Strategy<Value = DiffLevel> {
        prop_oneof![
            Just(DiffLevel::Fast),
            Just(DiffLevel::Medium),
            Just(DiffLevel::Perfect)
        ]
    }

    proptest! {
        #[test]
        fn result_covers_both_inputs(source in seq(), dest in seq(), level in any_level()) {
            let result = diff_with_config(&source, &dest, DiffConfig::default().with_level(level)).unwrap();
            prop_assert!(result.covers_inputs());
        }

        #[test]
        fn no_change_spans_are_really_equal(source in seq(), dest in seq()) {
            let result = diff(&source, &dest).unwrap();
            for span in result.iter().filter(|s| s.status() == SpanStatus::NoChange) {
                let d = span.dest_range().unwrap();
                let s = span.source_range().unwrap();
                prop_assert_eq!(&dest[d], &source[s]);
            }
        }

        #[test]
        fn diff_with_itself_is_one_no_change(source in seq()) {
            let result = diff(&source, &source).unwrap();
            if source.is_empty() {
                prop_assert!(result.is_empty());
            } else {
                prop_assert_eq!(result.spans(), &[DiffSpan::no_change(0, 0, source.len())]);
            }
        }

        #[test]
        fn disjoint_inputs_are_fully_replaced(
            source in prop::collection::vec(0u8..4, 1..20),
            dest in prop::collection::vec(4u8..8, 1..20),
        ) {
            let result = diff(&source, &dest).unwrap();
            prop_assert_eq!(result.unchanged_count(), 0);
            prop_assert_eq!(result.spans()[0], DiffSpan::replace(0, 0, source.len().min(dest.len())));
            prop_assert!(result.len() <= 2);
        }

        #[test]
        fn appended_element_is_one_add(source in prop::collection::vec(0u8..4, 1..40)) {
            let mut dest = source.clone();
            dest.push(9);
            let added = diff(&source, &dest).unwrap();
            prop_assert_eq!(
                added.spans(),
                &[DiffSpan::no_change(0, 0, source.len()), DiffSpan::add_destination(source.len(), 1)]
            );

            let removed = diff(&dest, &source).unwrap();
            prop_assert_eq!(
                removed.spans(),
                &[DiffSpan::no_change(0, 0, source.len()), DiffSpan::delete_source(source.len(), 1)]
            );
        }

        #[test]
        fn repeated_runs_are_identical(source in seq(), dest in seq()) {
            let first = diff(&source, &dest).unwrap();
            let second = diff(&source, &dest).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn cache_strategy_does_not_change_output(source in seq(), dest in seq(), level in any_level()) {
            let dense = diff_with_config(&source, &dest, DiffConfig::new(level, CacheStrategy::Dense)).unwrap();
            let sparse = diff_with_config(&source, &dest, DiffConfig::new(level, CacheStrategy::Sparse)).unwrap();
            prop_assert_eq!(dense.spans(), sparse.spans());
        }

        #[test]
        fn no_adjacent_mergeable_spans(source in seq(), dest in seq()) {
            let result = diff(&source, &dest).unwrap();
            for pair in result.spans().windows(2) {
                let (a, b) = (pair[0].status(), pair[1].status());
                prop_assert!(!(a == SpanStatus::NoChange && b == SpanStatus::NoChange));
                prop_assert!(!(a.is_change() && b.is_change() && a == b));
                prop_assert!(!matches!(
                    (a, b),
                    (SpanStatus::DeleteSource, SpanStatus::AddDestination)
                        | (SpanStatus::AddDestination, SpanStatus::DeleteSource)
                ));
            }
        }
    }
}
