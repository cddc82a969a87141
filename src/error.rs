//! Error types for seqdiff.
//!
//! A diff over well-formed inputs never fails. The variants here cover a
//! malformed [`SequenceView`](crate::SequenceView) and caller-requested
//! cancellation.

use std::fmt;

use thiserror::Error;

/// Which input sequence an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// The source (old) sequence
    Source,
    /// The destination (new) sequence
    Destination,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => f.write_str("source"),
            Self::Destination => f.write_str("destination"),
        }
    }
}

/// Errors that can occur during a diff run.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// A view reported `len` elements but had nothing at `index`
    #[error("{side} view has no element at index {index} (reported length {len})")]
    IndexOutOfRange {
        /// Sequence that failed the access
        side: Side,
        /// Requested position
        index: usize,
        /// Length the view claimed
        len: usize,
    },

    /// The run was cancelled through its [`CancelToken`](crate::CancelToken)
    #[error("diff cancelled")]
    Cancelled,

    /// The run outlived the deadline set on its [`CancelToken`](crate::CancelToken)
    #[error("diff deadline exceeded")]
    DeadlineExceeded,
}

/// Result type alias for diff operations.
pub type SeqResult<T> = Result<T, DiffError>;

impl DiffError {
    /// Create an out-of-range error for a malformed view.
    pub fn out_of_range(side: Side, index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { side, index, len }
    }

    /// Whether the error came from a cancel token rather than the input.
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled | Self::DeadlineExceeded)
    }
}
