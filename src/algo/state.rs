//! Per-destination match memoization.
//!
//! For every destination position the engine remembers the longest source
//! run starting there, as found in the widest window that position was
//! scanned in. Recursion only ever narrows windows, so a cached match that is
//! still fully inside the current window is still the best one there and is
//! reused. One that no longer fits is reset and recomputed.

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::config::CacheStrategy;

/// Best known match anchored at one destination position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchState {
    /// Not computed yet, or invalidated
    #[default]
    Unknown,
    /// No source element equals this destination element in the window
    NoMatch,
    /// `length` equal elements starting at source position `start`
    Matched { start: usize, length: usize },
}

impl MatchState {
    /// Exclusive source end of a match
    #[inline]
    pub fn end(&self) -> Option<usize> {
        match *self {
            Self::Matched { start, length } => Some(start + length),
            _ => None,
        }
    }

    /// Check if this state is `Unknown`
    #[inline]
    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }
}

#[derive(Debug)]
enum Slots {
    Dense(Vec<MatchState>),
    Sparse(FxHashMap<usize, MatchState>),
}

/// Match states for one diff run, keyed by destination position.
///
/// Never shared between runs: a cache only makes sense for the sequence pair
/// it was filled from.
#[derive(Debug)]
pub struct MatchStateCache {
    slots: Slots,
}

impl MatchStateCache {
    /// Create an empty cache for a destination of `dest_len` elements.
    pub fn new(dest_len: usize, strategy: CacheStrategy) -> Self {
        let slots = match strategy {
            CacheStrategy::Dense => Slots::Dense(vec![MatchState::Unknown; dest_len]),
            CacheStrategy::Sparse => Slots::Sparse(FxHashMap::default()),
        };
        Self { slots }
    }

    /// State at `dest`, `Unknown` if never set.
    pub fn get(&self, dest: usize) -> MatchState {
        match &self.slots {
            Slots::Dense(v) => v.get(dest).copied().unwrap_or_default(),
            Slots::Sparse(m) => m.get(&dest).copied().unwrap_or_default(),
        }
    }

    fn set(&mut self, dest: usize, state: MatchState) {
        match &mut self.slots {
            Slots::Dense(v) => {
                if dest >= v.len() {
                    v.resize(dest + 1, MatchState::Unknown);
                }
                v[dest] = state;
            }
            Slots::Sparse(m) => {
                if state.is_unknown() {
                    m.remove(&dest);
                } else {
                    m.insert(dest, state);
                }
            }
        }
    }

    /// Record a match of `length` elements starting at source `start`.
    pub fn set_match(&mut self, dest: usize, start: usize, length: usize) {
        debug_assert!(length > 0, "match length must be greater than zero");
        self.set(dest, MatchState::Matched { start, length });
    }

    /// Record that `dest` has no match.
    pub fn set_no_match(&mut self, dest: usize) {
        self.set(dest, MatchState::NoMatch);
    }

    /// Force recomputation of `dest`.
    pub fn reset(&mut self, dest: usize) {
        self.set(dest, MatchState::Unknown);
    }

    /// Check whether the state at `dest` is usable for a narrower window.
    ///
    /// A cached match is reset to `Unknown` when it is longer than `max_len`
    /// (the longest run the window still allows from `dest`) or when its
    /// source run leaves `window`. Returns `false` iff the state is now
    /// `Unknown`.
    pub fn revalidate(&mut self, dest: usize, window: &Range<usize>, max_len: usize) -> bool {
        match self.get(dest) {
            MatchState::Unknown => false,
            MatchState::NoMatch => true,
            MatchState::Matched { start, length } => {
                if length > max_len || start < window.start || start + length > window.end {
                    self.reset(dest);
                    false
                } else {
                    true
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn caches(len: usize) -> [MatchStateCache; 2] {
        [
            MatchStateCache::new(len, CacheStrategy::Dense),
            MatchStateCache::new(len, CacheStrategy::Sparse),
        ]
    }

    #[test]
    fn test_absent_is_unknown() {
        for cache in caches(4) {
            assert_eq!(cache.get(0), MatchState::Unknown);
            assert_eq!(cache.get(100), MatchState::Unknown);
        }
    }

    #[test]
    fn test_set_and_get() {
        for mut cache in caches(4) {
            cache.set_match(1, 5, 3);
            cache.set_no_match(2);
            assert_eq!(cache.get(1), MatchState::Matched { start: 5, length: 3 });
            assert_eq!(cache.get(1).end(), Some(8));
            assert_eq!(cache.get(2), MatchState::NoMatch);
            assert_eq!(cache.get(2).end(), None);

            cache.reset(1);
            assert!(cache.get(1).is_unknown());
        }
    }

    #[test]
    fn test_revalidate_unknown() {
        for mut cache in caches(2) {
            assert!(!cache.revalidate(0, &(0..10), 10));
        }
    }

    #[test]
    fn test_revalidate_no_match_stays() {
        for mut cache in caches(2) {
            cache.set_no_match(0);
            assert!(cache.revalidate(0, &(3..4), 1));
            assert_eq!(cache.get(0), MatchState::NoMatch);
        }
    }

    #[test]
    fn test_revalidate_contained_match_stays() {
        for mut cache in caches(8) {
            cache.set_match(0, 2, 3);
            assert!(cache.revalidate(0, &(2..5), 3));
            assert_eq!(cache.get(0), MatchState::Matched { start: 2, length: 3 });
        }
    }

    #[test]
    fn test_revalidate_too_long() {
        for mut cache in caches(8) {
            cache.set_match(0, 2, 3);
            assert!(!cache.revalidate(0, &(0..10), 2));
            assert!(cache.get(0).is_unknown());
        }
    }

    #[test]
    fn test_revalidate_starts_before_window() {
        for mut cache in caches(8) {
            cache.set_match(0, 2, 3);
            assert!(!cache.revalidate(0, &(3..10), 10));
            assert!(cache.get(0).is_unknown());
        }
    }

    #[test]
    fn test_revalidate_ends_after_window() {
        for mut cache in caches(8) {
            cache.set_match(0, 2, 3);
            assert!(!cache.revalidate(0, &(0..4), 10));
            assert!(cache.get(0).is_unknown());
        }
    }
}
