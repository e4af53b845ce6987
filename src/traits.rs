//! Core traits for mergeable summaries
//!
//! Both the scalar [`Accumulator`](crate::statistics::Accumulator) and the
//! per-corpus [`FileStatistics`](crate::report::FileStatistics) implement
//! [`Summary`], so partial results built on separate partitions can be
//! reduced the same way.

use core::fmt::Debug;

/// Error raised by a summary operation
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// The observation is NaN or infinite
    #[error("invalid observation: {0} cannot be folded into finite statistics")]
    InvalidObservation(f64),
    /// A derived statistic was requested from an accumulator with no observations
    #[error("empty accumulator: no observations to summarize")]
    EmptyAccumulator,
}

/// Core trait for single-pass, mergeable summaries
pub trait Summary: Clone + Debug + Default {
    /// The type of item this summary folds in
    type Item: ?Sized;

    /// Fold one item into the summary
    ///
    /// A rejected item leaves the summary exactly as it was.
    fn update(&mut self, item: &Self::Item) -> Result<(), StatsError>;

    /// Merge another summary into this one
    ///
    /// The result is the summary of the union of both underlying streams.
    fn merge(&mut self, other: &Self);

    /// Reset summary to empty state
    fn clear(&mut self);

    /// Number of items folded in
    fn count(&self) -> u64;

    /// Check if summary is empty
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Reduce partial summaries into one
///
/// Intended for the combining thread after workers have each built a summary
/// over their own partition.
///
/// ```
/// use srcstats::statistics::Accumulator;
/// use srcstats::traits::merge_all;
///
/// let parts = [[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]].map(|chunk| {
///     let mut acc = Accumulator::new();
///     acc.fold_all(chunk).unwrap();
///     acc
/// });
///
/// let total: Accumulator = merge_all(parts);
/// assert_eq!(total.count(), 6);
/// assert!((total.mean().unwrap() - 3.5).abs() < 1e-12);
/// ```
pub fn merge_all<S, I>(parts: I) -> S
where
    S: Summary,
    I: IntoIterator<Item = S>,
{
    parts.into_iter().fold(S::default(), |mut total, part| {
        total.merge(&part);
        total
    })
}
