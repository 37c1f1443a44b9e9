//! Parallel sequence building across appearances.
//!
//! Appearances share no state, so they can be expanded on a Rayon pool and
//! concatenated afterwards. Output is identical to the sequential
//! [`SequenceBuilder::build`]: `par_iter().collect()` keeps input order.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     BatchProcessor                       │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │                Rayon Thread Pool                   │  │
//! │  │                                                    │  │
//! │  │  Appearance 1    Appearance 2    Appearance N      │  │
//! │  │       │               │               │            │  │
//! │  │       ▼               ▼               ▼            │  │
//! │  │  AppearanceSeq   AppearanceSeq   AppearanceSeq     │  │
//! │  └─────────────────────────┬──────────────────────────┘  │
//! │                            ▼                             │
//! │                     SequenceDataset                      │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::batch::{BatchConfig, BatchProcessor};
//! use pitch_sequencer::schema::TableLayout;
//! use pitch_sequencer::sequence_builder::{SequenceBuilder, SequenceConfig};
//!
//! let builder = SequenceBuilder::new(
//!     SequenceConfig::new(4),
//!     TableLayout::pitch_type_only(3, 5),
//! )
//! .unwrap();
//!
//! let processor = BatchProcessor::new(builder, BatchConfig::new().with_threads(2));
//! let output = processor.process(&[]).unwrap();
//! assert_eq!(output.dataset.n_windows(), 0);
//! ```

use crate::dataset::SequenceDataset;
use crate::error::{Result, SequencerError};
use crate::sequence_builder::SequenceBuilder;
use crate::table::Appearance;
use rayon::prelude::*;
use std::time::{Duration, Instant};

/// Configuration for parallel building.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BatchConfig {
    /// Number of threads to use.
    ///
    /// - `None`: Rayon default (typically the number of CPUs)
    /// - `Some(n)`: exactly n threads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_threads: Option<usize>,

    /// Stack size per thread in bytes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack_size: Option<usize>,
}

impl BatchConfig {
    /// Create a new batch configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of threads to use.
    ///
    /// # Panics
    ///
    /// Panics if threads is 0.
    pub fn with_threads(mut self, threads: usize) -> Self {
        assert!(threads > 0, "Thread count must be > 0");
        self.num_threads = Some(threads);
        self
    }

    /// Set custom stack size per thread.
    pub fn with_stack_size(mut self, size: usize) -> Self {
        self.stack_size = Some(size);
        self
    }

    /// Reject an explicit thread count of zero.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == Some(0) {
            return Err(SequencerError::invalid_config("batch.num_threads must be > 0"));
        }
        Ok(())
    }

    /// Configured threads or Rayon's default.
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(rayon::current_num_threads)
    }
}

/// Output of a parallel build.
#[derive(Debug, Clone)]
pub struct BatchOutput {
    /// Concatenated windows, identical to a sequential build
    pub dataset: SequenceDataset,

    /// Appearances processed
    pub appearances: usize,

    /// Wall-clock time
    pub elapsed: Duration,

    /// Threads in the pool
    pub threads_used: usize,
}

impl BatchOutput {
    /// Windows produced per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs == 0.0 {
            return 0.0;
        }
        self.dataset.n_windows() as f64 / secs
    }
}

/// Fans appearance expansion out over a local thread pool.
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    builder: SequenceBuilder,
    batch_config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor around a validated builder.
    pub fn new(builder: SequenceBuilder, batch_config: BatchConfig) -> Self {
        Self {
            builder,
            batch_config,
        }
    }

    /// The wrapped builder.
    pub fn builder(&self) -> &SequenceBuilder {
        &self.builder
    }

    /// Expand all appearances in parallel.
    ///
    /// Any malformed appearance fails the whole call; no partial dataset is
    /// returned. A zero thread count is rejected as `InvalidConfiguration`.
    pub fn process(&self, appearances: &[Appearance]) -> Result<BatchOutput> {
        self.batch_config.validate()?;
        let start = Instant::now();

        // Local pool: build_global() only works once per process.
        let mut pool_builder =
            rayon::ThreadPoolBuilder::new().num_threads(self.batch_config.effective_threads());
        if let Some(stack_size) = self.batch_config.stack_size {
            pool_builder = pool_builder.stack_size(stack_size);
        }
        let pool = pool_builder.build()?;
        let threads_used = pool.current_num_threads();

        let parts = pool.install(|| {
            appearances
                .par_iter()
                .map(|appearance| self.builder.sequence_appearance(appearance))
                .collect::<Result<Vec<_>>>()
        })?;

        let dataset = SequenceDataset::from_appearances(
            parts,
            0,
            self.builder.config().max_length,
            self.builder.layout(),
        )?;

        let output = BatchOutput {
            dataset,
            appearances: appearances.len(),
            elapsed: start.elapsed(),
            threads_used,
        };

        log::info!(
            "Built {} windows from {} appearances on {} threads in {:?}",
            output.dataset.n_windows(),
            output.appearances,
            threads_used,
            output.elapsed
        );

        Ok(output)
    }
}
