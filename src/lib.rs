//! # Srcstats
//!
//! Single-pass, mergeable statistics over files and text lines.
//!
//! Srcstats accumulates count, extrema, mean and standard deviation over a
//! stream of numeric observations, and composes two such accumulators into a
//! report describing a corpus of text files: one over file sizes in lines,
//! one over line sizes in characters.
//!
//! ## Features
//!
//! - **Running Statistics**: Welford's numerically stable online update
//! - **Full Mergeability**: partial results combine with Chan's parallel formula
//! - **Strict Input**: non-finite observations are rejected without touching state
//! - **Corpus Reports**: per-file ingestion and two-block text rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use srcstats::prelude::*;
//!
//! let mut acc = Accumulator::new();
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     acc.fold(value)?;
//! }
//! assert_eq!(acc.count(), 5);
//! assert_eq!(acc.mean(), Ok(3.0));
//! # Ok::<(), StatsError>(())
//! ```
//!
//! ## Distributed Computing
//!
//! Both [`Accumulator`] and [`FileStatistics`] implement the
//! [`Summary`](traits::Summary) trait which includes a `merge` operation,
//! allowing partial results to be combined across workers:
//!
//! ```rust
//! use srcstats::report::FileStatistics;
//! use srcstats::traits::merge_all;
//!
//! let partitions = [vec!["a\nbb", "ccc"], vec!["dddd\n"]];
//!
//! // Each worker processes its partition
//! let partials = partitions
//!     .iter()
//!     .map(|files| files.iter().copied().collect::<FileStatistics>());
//!
//! // Merge results
//! let total: FileStatistics = merge_all(partials);
//! assert_eq!(total.files().count(), 3);
//! assert_eq!(total.lines().count(), 5);
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support; without it the crate is
//!   `no_std` and uses libm for square roots

#![cfg_attr(not(feature = "std"), no_std)]

// Core traits always available
pub mod traits;

pub mod report;
pub mod statistics;

mod math;

pub mod prelude {
    pub use crate::traits::*;

    pub use crate::report::FileStatistics;
    pub use crate::statistics::{Accumulator, Snapshot};
}

pub use report::FileStatistics;
pub use statistics::Accumulator;
pub use traits::StatsError;
