//! Hashed view over records.
//!
//! Records such as query result rows are reduced to one stable 64-bit key per
//! row. Two rows compare equal when all their cells are equal in order.

use super::SequenceView;
use crate::hash::StableHasher;

/// One stable key per record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowKeys {
    keys: Vec<u64>,
}

impl RowKeys {
    /// Hash every row of `rows`.
    ///
    /// ```
    /// use seqdiff::RowKeys;
    ///
    /// let old = RowKeys::from_rows([["1", "alice"], ["2", "bob"]]);
    /// let new = RowKeys::from_rows([["1", "alice"], ["2", "carol"]]);
    /// assert_eq!(old.key(0), new.key(0));
    /// assert_ne!(old.key(1), new.key(1));
    /// ```
    pub fn from_rows<R, C, S>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            keys: rows.into_iter().map(row_key).collect(),
        }
    }

    /// Use precomputed keys.
    pub fn from_keys(keys: Vec<u64>) -> Self {
        Self { keys }
    }

    /// Key of the row at `index`
    pub fn key(&self, index: usize) -> Option<u64> {
        self.keys.get(index).copied()
    }

    /// All keys in row order
    pub fn as_slice(&self) -> &[u64] {
        &self.keys
    }
}

/// Key for a single row: each cell length-prefixed, then the cell count.
///
/// Use it to build keys for [`RowKeys::from_keys`] incrementally.
///
/// ```
/// use seqdiff::{row_key, RowKeys};
///
/// let keys = RowKeys::from_keys(vec![row_key(["1", "alice"])]);
/// assert_eq!(keys, RowKeys::from_rows([["1", "alice"]]));
/// ```
pub fn row_key<C, S>(cells: C) -> u64
where
    C: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut count = 0usize;
    let mut hasher = StableHasher::new();
    for cell in cells {
        hasher = hasher.update_str(cell.as_ref());
        count += 1;
    }
    hasher.update_usize(count).finish()
}

impl SequenceView for RowKeys {
    type Item = u64;

    #[inline]
    fn len(&self) -> usize {
        self.keys.len()
    }

    #[inline]
    fn element_at(&self, index: usize) -> Option<&u64> {
        self.keys.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equal_rows_equal_keys() {
        let keys = RowKeys::from_rows(vec![vec!["a", "b"], vec!["a", "b"], vec!["a", "c"]]);
        assert_eq!(keys.len(), 3);
        assert_eq!(keys.key(0), keys.key(1));
        assert_ne!(keys.key(1), keys.key(2));
    }

    #[test]
    fn test_cell_boundaries() {
        assert_ne!(row_key(["ab", "c"]), row_key(["a", "bc"]));
        assert_ne!(row_key(["a"]), row_key(["a", ""]));
    }

    #[test]
    fn test_out_of_range() {
        let keys = RowKeys::from_keys(vec![1, 2]);
        assert_eq!(keys.element_at(2), None);
        assert_eq!(keys.as_slice(), &[1, 2]);
    }
}
