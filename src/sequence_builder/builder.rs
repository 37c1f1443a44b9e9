//! Sequence building for pitch-sequence models.
//!
//! Each plate appearance is expanded independently:
//!
//! 1. Rows are re-sorted by pitch order and indexed 1..=n ([`PositionIndex`]).
//! 2. Every contiguous run of positions is enumerated ([`ascending_runs`]).
//! 3. Each run is packed into fixed-length windows ([`pack_run`]).
//! 4. Each window gathers the feature vectors at its positions and the labels
//!    at its highest real position.
//!
//! Results are concatenated in appearance order. An appearance of `n` pitches
//! yields `n(n+1)/2` runs; with `max_length >= n` that is also the window
//! count, otherwise long runs contribute one window per chunk.
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::schema::TableLayout;
//! use pitch_sequencer::sequence_builder::{SequenceBuilder, SequenceConfig};
//! use pitch_sequencer::table::{Appearance, PitchRow};
//!
//! let layout = TableLayout::pitch_type_only(1, 2);
//! let builder = SequenceBuilder::new(SequenceConfig::new(2), layout).unwrap();
//!
//! let appearance = Appearance::new(
//!     1.0,
//!     vec![
//!         PitchRow::new(1.0, vec![0.1, 1.0, 0.0]),
//!         PitchRow::new(2.0, vec![0.2, 0.0, 1.0]),
//!         PitchRow::new(3.0, vec![0.3, 1.0, 0.0]),
//!     ],
//! );
//!
//! let dataset = builder.build(&[appearance]).unwrap();
//! // 6 runs; [1,2,3] splits into [1,2] and [3,0]
//! assert_eq!(dataset.n_windows(), 7);
//! assert_eq!(dataset.features.shape(), &[7, 2, 1]);
//! ```

use super::index_mapper::PositionIndex;
use super::packer::{pack_run, window_count};
use super::runs::ascending_runs;
use crate::dataset::{AppearanceSequences, SequenceDataset};
use crate::error::{Result, SequencerError};
use crate::schema::TableLayout;
use crate::split::{SplitConfig, SplitDatasets};
use crate::table::{Appearance, PitchTable};

/// Configuration for sequence building.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SequenceConfig {
    /// Number of time steps per window (model input length).
    ///
    /// Runs shorter than this are right-padded; longer runs are split into
    /// consecutive chunks.
    pub max_length: usize,
}

impl SequenceConfig {
    /// Create a configuration with the given window length.
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_length == 0 {
            return Err(SequencerError::invalid_config("max_length must be > 0"));
        }
        Ok(())
    }

    /// Exact number of windows an appearance of `n` pitches produces.
    ///
    /// There are `n - k + 1` runs of length `k`, each packing into
    /// `ceil(k / max_length)` windows.
    pub fn windows_for_length(&self, n: usize) -> usize {
        (1..=n)
            .map(|k| (n - k + 1) * window_count(k, self.max_length))
            .sum()
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new(10)
    }
}

/// Expands plate appearances into fixed-length training windows.
///
/// Stateless across calls: every call to [`build`](Self::build) depends only
/// on its input. The builder is `Sync`, so one instance can serve many
/// worker threads (see [`crate::batch::BatchProcessor`]).
#[derive(Debug, Clone)]
pub struct SequenceBuilder {
    config: SequenceConfig,
    layout: TableLayout,
}

impl SequenceBuilder {
    /// Create a builder after validating both configuration and layout.
    ///
    /// # Errors
    ///
    /// `InvalidConfiguration` if `max_length`, `feature_count` or any stream
    /// width is zero.
    pub fn new(config: SequenceConfig, layout: TableLayout) -> Result<Self> {
        config.validate()?;
        layout.validate()?;
        Ok(Self { config, layout })
    }

    /// Sequence configuration.
    pub fn config(&self) -> &SequenceConfig {
        &self.config
    }

    /// Table layout.
    pub fn layout(&self) -> &TableLayout {
        &self.layout
    }

    /// Expand one appearance into its windows.
    ///
    /// An empty appearance yields zero windows.
    pub fn sequence_appearance(&self, appearance: &Appearance) -> Result<AppearanceSequences> {
        let max_length = self.config.max_length;
        let rows = appearance.sorted_rows();
        let index = PositionIndex::build(&rows, &self.layout)?;

        let expected = self.config.windows_for_length(index.len());
        let mut out = AppearanceSequences::with_capacity(expected, max_length, &self.layout);

        for run in ascending_runs(index.len()) {
            for window in pack_run(&run, max_length) {
                for &position in window.positions() {
                    out.features.extend(index.features(position).iter().copied());
                }

                let labelled = window.max_position();
                for (stream, labels) in out.labels.iter_mut().enumerate() {
                    labels.extend(index.label(stream, labelled).iter().copied());
                }

                out.max_positions.push(labelled);
                out.n_windows += 1;
            }
        }

        log::debug!(
            "Appearance {}: {} pitches -> {} windows",
            appearance.key,
            index.len(),
            out.n_windows
        );

        Ok(out)
    }

    /// Expand every appearance and concatenate the results in input order.
    ///
    /// Fails without partial output if any appearance is malformed.
    pub fn build(&self, appearances: &[Appearance]) -> Result<SequenceDataset> {
        self.build_from(appearances, 0)
    }

    /// Build a sub-slice whose first appearance sits at `first_appearance` in
    /// the caller's input.
    fn build_from(
        &self,
        appearances: &[Appearance],
        first_appearance: usize,
    ) -> Result<SequenceDataset> {
        let parts = appearances
            .iter()
            .map(|appearance| self.sequence_appearance(appearance))
            .collect::<Result<Vec<_>>>()?;

        let dataset = SequenceDataset::from_appearances(
            parts,
            first_appearance,
            self.config.max_length,
            &self.layout,
        )?;

        log::info!(
            "Built {} windows from {} appearances (max_length={})",
            dataset.n_windows(),
            appearances.len(),
            self.config.max_length
        );

        Ok(dataset)
    }

    /// Group a table by appearance and build from the groups.
    pub fn build_table(&self, table: &PitchTable) -> Result<SequenceDataset> {
        self.build(&table.appearances())
    }

    /// Split appearances into train/val/test and build each partition.
    ///
    /// The split is over whole appearances in input order, so no appearance
    /// contributes windows to more than one partition. Window sources keep
    /// indexing `appearances`, not the partition.
    pub fn build_splits(
        &self,
        appearances: &[Appearance],
        split: &SplitConfig,
    ) -> Result<SplitDatasets> {
        let ranges = split.partition(appearances.len())?;

        let build = |range: std::ops::Range<usize>| {
            let first = range.start;
            self.build_from(&appearances[range], first)
        };

        Ok(SplitDatasets {
            train: build(ranges.train)?,
            val: build(ranges.val)?,
            test: build(ranges.test)?,
        })
    }
}
