//! Deterministic hashing for hashed views.
//!
//! Keys are stable across processes, so views built in different runs
//! compare equal for equal content.

/// Blake3-backed builder whose output does not change across processes.
pub(crate) struct StableHasher {
    inner: blake3::Hasher,
}

impl StableHasher {
    pub(crate) fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    fn update(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    /// Length first, so `["ab", "c"]` and `["a", "bc"]` differ.
    pub(crate) fn update_str(self, s: &str) -> Self {
        self.update_usize(s.len()).update(s.as_bytes())
    }

    pub(crate) fn update_usize(self, v: usize) -> Self {
        self.update(&(v as u64).to_le_bytes())
    }

    /// First 8 bytes of the digest, little-endian.
    pub(crate) fn finish(self) -> u64 {
        let hash = self.inner.finalize();
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        u64::from_le_bytes(bytes)
    }
}

/// Hash a single string.
pub(crate) fn hash_str(s: &str) -> u64 {
    StableHasher::new().update_str(s).finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_input_same_hash() {
        assert_eq!(hash_str("select * from t"), hash_str("select * from t"));
        assert_ne!(hash_str("a"), hash_str("b"));
    }

    #[test]
    fn test_hash_is_stable_across_builders() {
        let direct = StableHasher::new().update_str("x").update_usize(1).finish();
        let again = StableHasher::new().update_str("x").update_usize(1).finish();
        assert_eq!(direct, again);
        assert_ne!(direct, StableHasher::new().update_str("x").finish());
    }

    #[test]
    fn test_field_boundaries_matter() {
        let left = StableHasher::new().update_str("ab").update_str("c").finish();
        let right = StableHasher::new().update_str("a").update_str("bc").finish();
        assert_ne!(left, right);
    }
}
