//! Statistical summaries for streaming data
//!
//! This module provides an accumulator computing count, extrema, mean and
//! standard deviation over a stream in a single pass with constant memory.
//!
//! # Example
//!
//! ```
//! use srcstats::statistics::Accumulator;
//!
//! let mut acc = Accumulator::new();
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     acc.fold(value).unwrap();
//! }
//!
//! println!("Mean: {:?}", acc.mean());
//! println!("Stddev: {:?}", acc.std_dev());
//! println!("Min: {:?}", acc.minimum());
//! println!("Max: {:?}", acc.maximum());
//! ```

mod accumulator;

pub use accumulator::{Accumulator, Snapshot};
