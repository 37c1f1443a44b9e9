//! Pitch Sequencer
//!
//! Expands per-plate-appearance pitch tables into fixed-length, zero-padded
//! training windows for sequence models that predict the next pitch.
//!
//! # Overview
//!
//! Input is a fully numeric table, one row per pitch:
//!
//! ```text
//! [appearance_key, order, <features...>, <pitch type...>, <vertical zone...>, <horizontal zone...>]
//! ```
//!
//! For each appearance of `n` pitches every contiguous run of pitches
//! (`n(n+1)/2` of them) becomes one or more windows of `max_length` time steps.
//! Each window is labelled with the pitch type and zones of its most recent
//! pitch.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Pitch Sequencer                           │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  schema/           - Column layout and label streams            │
//! │  table             - Raw rows and appearance grouping           │
//! │  sequence_builder/ - Index, run enumeration, packing, assembly  │
//! │  dataset           - Output tensors                             │
//! │  split             - Train/val/test partitioning                │
//! │  batch             - Parallel building                          │
//! │  validation        - Dataset sanity checks                      │
//! │  config            - TOML/JSON configuration                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::prelude::*;
//!
//! // 1 feature, 2 pitch types
//! let layout = TableLayout::pitch_type_only(1, 2);
//! let table = PitchTable::from_rows(
//!     vec![
//!         vec![42.0, 1.0, 0.5, 1.0, 0.0],
//!         vec![42.0, 2.0, 0.7, 0.0, 1.0],
//!     ],
//!     &layout,
//! )?;
//!
//! let builder = SequenceBuilder::new(SequenceConfig::new(3), layout)?;
//! let dataset = builder.build_table(&table)?;
//!
//! assert_eq!(dataset.n_windows(), 3);
//! assert_eq!(dataset.features.shape(), &[3, 3, 1]);
//! # Ok::<(), pitch_sequencer::SequencerError>(())
//! ```

pub mod batch;
pub mod config;
pub mod dataset;
pub mod error;
pub mod prelude;
pub mod schema;
pub mod sequence_builder;
pub mod split;
pub mod table;
pub mod validation;

// Re-exports - Errors
pub use error::{Result, SequencerError};

// Re-exports - Schema
pub use schema::{LabelStream, TableLayout};

// Re-exports - Table
pub use table::{Appearance, PitchRow, PitchTable};

// Re-exports - Sequence Building
pub use sequence_builder::{
    ascending_runs, pack_run, PackedWindow, PositionIndex, Run, SequenceBuilder, SequenceConfig,
    PADDING_POSITION,
};

// Re-exports - Output
pub use dataset::{SequenceDataset, StreamLabels, WindowSource};
pub use split::{SplitConfig, SplitDatasets, SplitRanges};

// Re-exports - Batch
pub use batch::{BatchConfig, BatchOutput, BatchProcessor};

// Re-exports - Config
pub use config::{ExperimentMetadata, SequencerConfig};

// Re-exports - Validation
pub use validation::{DatasetValidator, ValidationConfig, ValidationLevel, ValidationResult};
