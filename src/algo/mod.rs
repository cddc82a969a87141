//! Algorithm implementations for sequence diffing.
//!
//! - `engine`: recursive anchor-match search producing spans
//! - `state`: per-destination match memoization
//! - `coalesce`: merging emitted spans into the final edit script

mod coalesce;
mod engine;
mod state;

pub use engine::{diff, diff_with_config, DiffEngine};
pub use state::{MatchState, MatchStateCache};
