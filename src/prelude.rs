//! Prelude module for convenient imports.
//!
//! ```
//! use pitch_sequencer::prelude::*;
//!
//! let config = SequenceConfig::new(8);
//! assert!(config.validate().is_ok());
//! ```
//!
//! # What's Included
//!
//! ## Input
//! - [`TableLayout`], [`LabelStream`] - Column layout
//! - [`PitchTable`], [`Appearance`], [`PitchRow`] - Rows and grouping
//!
//! ## Sequence Building
//! - [`SequenceBuilder`] - Appearance expansion
//! - [`SequenceConfig`] - Window length
//! - [`BatchProcessor`], [`BatchConfig`] - Parallel building
//!
//! ## Output
//! - [`SequenceDataset`] - Feature tensor and label matrices
//! - [`SplitConfig`], [`SplitDatasets`] - Train/val/test partitions
//! - [`DatasetValidator`] - Sanity checks
//!
//! ## Configuration and Errors
//! - [`SequencerConfig`], [`ExperimentMetadata`]
//! - [`SequencerError`], [`Result`]

pub use crate::batch::{BatchConfig, BatchOutput, BatchProcessor};
pub use crate::config::{ExperimentMetadata, SequencerConfig};
pub use crate::dataset::{SequenceDataset, StreamLabels, WindowSource};
pub use crate::error::{Result, SequencerError};
pub use crate::schema::{
    LabelStream, TableLayout, HORIZONTAL_ZONE_STREAM, PITCH_TYPE_STREAM, VERTICAL_ZONE_STREAM,
};
pub use crate::sequence_builder::{SequenceBuilder, SequenceConfig};
pub use crate::split::{SplitConfig, SplitDatasets};
pub use crate::table::{Appearance, PitchRow, PitchTable};
pub use crate::validation::{DatasetValidator, ValidationResult};
