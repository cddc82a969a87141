//! Diffing many independent sequence pairs.
//!
//! Each pair gets its own run and its own match cache, so pairs never share
//! mutable state. With the `parallel` feature the pairs are spread over
//! rayon's thread pool; without it they run in order on the calling thread.

use tracing::debug;

use crate::algo::DiffEngine;
use crate::config::DiffConfig;
use crate::error::SeqResult;
use crate::result::DiffResult;
use crate::view::SequenceView;

impl DiffEngine {
    /// Diff every `(source, dest)` pair, keeping input order in the output.
    ///
    /// A failing pair does not affect the others.
    pub fn diff_batch<S, D>(&self, pairs: &[(&S, &D)]) -> Vec<SeqResult<DiffResult>>
    where
        S: SequenceView + Sync + ?Sized,
        D: SequenceView + Sync + ?Sized,
        D::Item: PartialEq<S::Item>,
    {
        debug!(pairs = pairs.len(), parallel = cfg!(feature = "parallel"), "starting batch diff");

        #[cfg(feature = "parallel")]
        let results: Vec<SeqResult<DiffResult>> = {
            use rayon::prelude::*;
            pairs
                .par_iter()
                .map(|(source, dest)| self.diff(*source, *dest))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let results: Vec<SeqResult<DiffResult>> = pairs
            .iter()
            .map(|(source, dest)| self.diff(*source, *dest))
            .collect();

        results
    }
}

/// Diff every pair with one configuration.
pub fn diff_batch<S, D>(pairs: &[(&S, &D)], config: DiffConfig) -> Vec<SeqResult<DiffResult>>
where
    S: SequenceView + Sync + ?Sized,
    D: SequenceView + Sync + ?Sized,
    D::Item: PartialEq<S::Item>,
{
    DiffEngine::new(config).diff_batch(pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cancel::CancelToken;
    use crate::error::DiffError;
    use crate::span::DiffSpan;

    #[test]
    fn test_batch_keeps_order() {
        let a = vec![1, 2, 3];
        let b = vec![1, 2, 3, 4];
        let c: Vec<i32> = Vec::new();
        let pairs: Vec<(&Vec<i32>, &Vec<i32>)> = vec![(&a, &b), (&b, &a), (&c, &a)];

        let results = diff_batch(&pairs, DiffConfig::default());
        assert_eq!(results.len(), 3);
        assert_eq!(
            results[0].as_ref().unwrap().spans(),
            &[DiffSpan::no_change(0, 0, 3), DiffSpan::add_destination(3, 1)]
        );
        assert_eq!(
            results[1].as_ref().unwrap().spans(),
            &[DiffSpan::no_change(0, 0, 3), DiffSpan::delete_source(3, 1)]
        );
        assert_eq!(
            results[2].as_ref().unwrap().spans(),
            &[DiffSpan::add_destination(0, 3)]
        );
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let texts = ["kitten", "sitting", "mitten", "kitchen"];
        let seqs: Vec<Vec<char>> = texts.iter().map(|t| t.chars().collect()).collect();
        let pairs: Vec<(&Vec<char>, &Vec<char>)> = seqs
            .iter()
            .flat_map(|a| seqs.iter().map(move |b| (a, b)))
            .collect();

        let engine = DiffEngine::new(DiffConfig::default());
        let batch = engine.diff_batch(&pairs);
        for ((source, dest), result) in pairs.iter().zip(batch) {
            assert_eq!(result, engine.diff(*source, *dest));
        }
    }

    #[test]
    fn test_batch_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let engine = DiffEngine::new(DiffConfig::default()).with_cancel(token);
        let a = vec![1u8];
        let results = engine.diff_batch(&[(&a, &a), (&a, &a)]);
        assert!(results.iter().all(|r| r == &Err(DiffError::Cancelled)));
    }
}
