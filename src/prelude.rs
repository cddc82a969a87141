//! Prelude module for common imports.
//!
//! ```
//! use seqdiff::prelude::*;
//!
//! let result = diff(&[1, 2, 3], &[1, 2, 3]).unwrap();
//! assert!(result.is_identical());
//! ```

// Engine
pub use crate::algo::{diff, diff_with_config, DiffEngine};
pub use crate::batch::diff_batch;

// Configuration
pub use crate::cancel::CancelToken;
pub use crate::config::{CacheStrategy, DiffConfig, DiffLevel};

// Results
pub use crate::result::{DiffResult, DiffRow, DiffStats};
pub use crate::span::{DiffSpan, SpanStatus};

// Views
pub use crate::view::{RowKeys, SequenceView, TextLines};

// Error
pub use crate::error::{DiffError, SeqResult};
