//! Summary statistics for training runs.
//!
//! # Examples
//!
//! ```
//! use amaze_stats::descriptive::DescriptiveStats;
//!
//! let fitness = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(fitness).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.max, 5.0);
//! ```

pub mod descriptive;
