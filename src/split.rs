//! Deterministic train/validation/test partitioning.
//!
//! Appearances are split by contiguous ranges of the ordered appearance list,
//! never by rows, so one appearance always lands in exactly one partition.
//! There is no shuffling.
//!
//! ```text
//! |<------------- train_val_ratio ------------->|<---- test ---->|
//! |<------- train_ratio ------->|<---- val ---->|
//! ```
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::split::SplitConfig;
//!
//! let ranges = SplitConfig::default().partition(100).unwrap();
//! assert_eq!(ranges.train, 0..72);
//! assert_eq!(ranges.val, 72..80);
//! assert_eq!(ranges.test, 80..100);
//! ```

use crate::dataset::SequenceDataset;
use crate::error::{Result, SequencerError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Split ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Fraction of appearances used for train + validation; the rest is test.
    pub train_val_ratio: f64,

    /// Fraction of the train + validation block used for training.
    pub train_ratio: f64,
}

impl Default for SplitConfig {
    /// 80% train+val (of which 90% train), 20% test.
    fn default() -> Self {
        Self {
            train_val_ratio: 0.8,
            train_ratio: 0.9,
        }
    }
}

/// Index ranges of each partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRanges {
    /// Training appearances
    pub train: Range<usize>,

    /// Validation appearances
    pub val: Range<usize>,

    /// Test appearances
    pub test: Range<usize>,
}

/// Datasets built for each partition.
#[derive(Debug, Clone)]
pub struct SplitDatasets {
    /// Training windows
    pub train: SequenceDataset,

    /// Validation windows
    pub val: SequenceDataset,

    /// Test windows
    pub test: SequenceDataset,
}

impl SplitDatasets {
    /// Total windows across all partitions.
    pub fn total_windows(&self) -> usize {
        self.train.n_windows() + self.val.n_windows() + self.test.n_windows()
    }
}

impl SplitConfig {
    /// Create a split configuration.
    pub fn new(train_val_ratio: f64, train_ratio: f64) -> Self {
        Self {
            train_val_ratio,
            train_ratio,
        }
    }

    /// Validate ratios. Both must lie in `(0, 1]`.
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("train_val_ratio", self.train_val_ratio),
            ("train_ratio", self.train_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(SequencerError::invalid_config(format!(
                    "{name} must be in (0, 1], got {ratio}"
                )));
            }
        }
        Ok(())
    }

    /// Partition `n` appearances into contiguous ranges.
    ///
    /// Sizes are floored.
    pub fn partition(&self, n: usize) -> Result<SplitRanges> {
        self.validate()?;

        let train_val = (n as f64 * self.train_val_ratio).floor() as usize;
        let train = (train_val as f64 * self.train_ratio).floor() as usize;

        let ranges = SplitRanges {
            train: 0..train,
            val: train..train_val,
            test: train_val..n,
        };

        for (name, range) in [
            ("train", &ranges.train),
            ("val", &ranges.val),
            ("test", &ranges.test),
        ] {
            if range.is_empty() {
                log::warn!("Split leaves the {name} partition empty ({n} appearances)");
            }
        }

        Ok(ranges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_partition() {
        let ranges = SplitConfig::default().partition(10).unwrap();
        assert_eq!(ranges.train, 0..7);
        assert_eq!(ranges.val, 7..8);
        assert_eq!(ranges.test, 8..10);
    }

    #[test]
    fn test_partition_covers_all_without_overlap() {
        let config = SplitConfig::new(0.7, 0.6);
        for n in 0..50 {
            let r = config.partition(n).unwrap();
            assert_eq!(r.train.start, 0);
            assert_eq!(r.train.end, r.val.start);
            assert_eq!(r.val.end, r.test.start);
            assert_eq!(r.test.end, n);
        }
    }

    #[test]
    fn test_full_ratios_leave_val_and_test_empty() {
        let ranges = SplitConfig::new(1.0, 1.0).partition(4).unwrap();
        assert_eq!(ranges.train, 0..4);
        assert!(ranges.val.is_empty());
        assert!(ranges.test.is_empty());
    }

    #[test]
    fn test_invalid_ratios() {
        assert!(SplitConfig::new(0.0, 0.5).validate().is_err());
        assert!(SplitConfig::new(0.5, 1.5).validate().is_err());
        assert!(SplitConfig::new(f64::NAN, 0.5).validate().is_err());
        assert!(SplitConfig::new(0.5, 0.5).partition(3).is_ok());
        assert!(SplitConfig::new(-0.1, 0.5).partition(3).is_err());
    }
}
