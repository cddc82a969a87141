//! seqdiff - Span-based diff for ordered sequences
//!
//! Computes a compact, ordered description of the differences between two
//! sequences of comparable elements (lines, rows, records): which runs are
//! unchanged, replaced, or present on one side only.
//!
//! ## Core Concepts
//!
//! **Views**: the engine reads inputs through [`SequenceView`], so slices,
//! vectors, hashed rows and text lines all diff the same way.
//!
//! **Anchor splitting**: each search window is split around its longest
//! equal run; the parts before and after are diffed recursively.
//!
//! **Match cache**: the longest run starting at each destination position is
//! memoized per run and reused while it still fits the narrowing windows.
//!
//! ## Modules
//! - `view`: `SequenceView` and the text/row views
//! - `algo`: diff engine and match cache
//! - `span`: span model
//! - `result`: coalesced span list and derived counts
//! - `config`: search level, cache strategy, depth limit
//! - `cancel`: cooperative cancellation
//! - `batch`: many independent pairs, optionally in parallel
//!
//! ## Usage
//!
//! ```
//! use seqdiff::{diff, DiffSpan, TextLines};
//!
//! let old = TextLines::new("select id\nfrom users\nwhere active\n");
//! let new = TextLines::new("select id, name\nfrom users\nwhere active\n");
//!
//! let result = diff(&old, &new).unwrap();
//! assert_eq!(
//!     result.spans(),
//!     &[DiffSpan::replace(0, 0, 1), DiffSpan::no_change(1, 1, 2)]
//! );
//! assert_eq!(result.changed_count(), 1);
//! ```

/// Algorithms: engine, match cache, coalescing
pub mod algo;

/// Batch diffing
pub mod batch;

/// Cooperative cancellation
pub mod cancel;

/// Diff configuration
pub mod config;

/// Error types
pub mod error;

mod hash;

/// Prelude for common imports
pub mod prelude;

/// Diff result
pub mod result;

/// Span model
pub mod span;

/// Input views
pub mod view;

// =============================================================================
// Re-exports
// =============================================================================

// Engine
pub use algo::{diff, diff_with_config, DiffEngine, MatchState, MatchStateCache};
pub use batch::diff_batch;

// Configuration
pub use cancel::CancelToken;
pub use config::{CacheStrategy, DiffConfig, DiffLevel};

// Results
pub use result::{DiffResult, DiffRow, DiffStats};
pub use span::{DiffSpan, SpanStatus};

// Views
pub use view::{row_key, RowKeys, SequenceView, TextLine, TextLines};

// Error types
pub use error::{DiffError, SeqResult, Side};

// =============================================================================
// Tests
// =============================================================================
