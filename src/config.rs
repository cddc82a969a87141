//! Diff configuration.

/// Default nesting limit: none. Windows live on a heap work stack, so depth
/// only grows with the element count.
const DEFAULT_MAX_DEPTH: usize = usize::MAX;

/// How thoroughly each search window is scanned for its anchor match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DiffLevel {
    /// After a destination position yields a match, skip over the whole match.
    #[default]
    Fast,
    /// Skip over a match only when it improved the best found so far.
    Medium,
    /// Examine every destination position and every source position.
    Perfect,
}

/// Storage used for the per-destination match cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CacheStrategy {
    /// One slot per destination position, allocated up front
    #[default]
    Dense,
    /// Hash map holding only the positions actually probed
    Sparse,
}

/// Configuration for a diff run.
///
/// Use this to tune diff behavior for specific inputs:
/// - `Perfect` level for short inputs where anchor quality matters most
/// - `Sparse` cache for very long destinations with few probed positions
/// - A finite `max_depth` to cap the work spent on pathological inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    /// Anchor search thoroughness.
    /// Default: `Fast`
    pub level: DiffLevel,
    /// Match cache storage.
    /// Default: `Dense`
    pub cache: CacheStrategy,
    /// Maximum window nesting depth; deeper windows are emitted unmatched.
    /// Default: unlimited
    pub max_depth: usize,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            level: DiffLevel::default(),
            cache: CacheStrategy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl DiffConfig {
    /// Create config with a custom level and cache strategy.
    pub fn new(level: DiffLevel, cache: CacheStrategy) -> Self {
        Self {
            level,
            cache,
            ..Self::default()
        }
    }

    /// Fastest search (the default).
    pub fn fast() -> Self {
        Self::default()
    }

    /// Exhaustive anchor search.
    pub fn perfect() -> Self {
        Self {
            level: DiffLevel::Perfect,
            ..Self::default()
        }
    }

    /// Config for very large inputs (sparse cache).
    pub fn large() -> Self {
        Self {
            level: DiffLevel::Fast,
            cache: CacheStrategy::Sparse,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Replace the search level.
    pub fn with_level(mut self, level: DiffLevel) -> Self {
        self.level = level;
        self
    }

    /// Cap window nesting depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(DiffConfig::fast(), DiffConfig::default());
        assert_eq!(DiffConfig::perfect().level, DiffLevel::Perfect);
        assert_eq!(DiffConfig::large().cache, CacheStrategy::Sparse);
        assert_eq!(DiffConfig::default().max_depth, usize::MAX);
    }

    #[test]
    fn test_builders() {
        let config = DiffConfig::new(DiffLevel::Medium, CacheStrategy::Sparse).with_max_depth(8);
        assert_eq!(config.level, DiffLevel::Medium);
        assert_eq!(config.cache, CacheStrategy::Sparse);
        assert_eq!(config.max_depth, 8);
    }
}
