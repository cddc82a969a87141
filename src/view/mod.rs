//! Read-only views over the sequences being compared.
//!
//! - `SequenceView`: the trait the engine reads through
//! - `text`: line-oriented view over text
//! - `rows`: hashed view over records of cells

mod rows;
mod text;

pub use rows::{row_key, RowKeys};
pub use text::{TextLine, TextLines};

/// A read-only, random-access view over one input sequence.
///
/// The engine only ever asks for the length and for the element at a
/// position. Equality between a source element and a destination element is
/// whatever `PartialEq` says, so views over different element types can be
/// compared as long as the destination item implements
/// `PartialEq<Source::Item>`.
///
/// A view must be pure for the duration of a diff run: `len()` is fixed and
/// `element_at(i)` returns `Some` for every `i < len()`. A view that breaks
/// this contract makes the diff fail with
/// [`DiffError::IndexOutOfRange`](crate::DiffError::IndexOutOfRange).
pub trait SequenceView {
    /// Element type compared by the engine
    type Item: ?Sized;

    /// Number of elements in the sequence
    fn len(&self) -> usize;

    /// Element at `index`, or `None` when out of range
    fn element_at(&self, index: usize) -> Option<&Self::Item>;

    /// Check if the sequence is empty
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> SequenceView for [T] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T> SequenceView for Vec<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<T, const N: usize> SequenceView for [T; N] {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&T> {
        self.get(index)
    }
}

impl<V: SequenceView + ?Sized> SequenceView for &V {
    type Item = V::Item;

    #[inline]
    fn len(&self) -> usize {
        (**self).len()
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&Self::Item> {
        (**self).element_at(index)
    }
}
