//! Corpus reports built from statistics accumulators
//!
//! [`FileStatistics`] pairs two [`Accumulator`](crate::statistics::Accumulator)s:
//! one over file sizes in lines, one over line sizes in characters.
//!
//! # Example
//!
//! ```
//! use srcstats::report::FileStatistics;
//!
//! // Each worker builds statistics over its own files
//! let mut worker1 = FileStatistics::new();
//! let mut worker2 = FileStatistics::new();
//! worker1.ingest("fn main() {\n}\n");
//! worker2.ingest("a\nb\nc");
//!
//! // Then a single thread merges the partial results
//! worker1.merge(&worker2);
//!
//! let mut out = String::new();
//! worker1.render(&mut out, "corpus").unwrap();
//! assert!(out.starts_with("corpus\n2 files\n"));
//! ```

mod file_stats;

pub use file_stats::{FileStatistics, Rendered, LINE_DELIMITER};
