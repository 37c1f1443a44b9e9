//! Column layout of a pitch row.

use crate::error::{Result, SequencerError};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// One label stream: a one-hot block of `width` columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelStream {
    /// Stream name (e.g. `"pitch"`)
    pub name: String,

    /// Number of one-hot columns (class count)
    pub width: usize,
}

impl LabelStream {
    /// Create a new label stream.
    pub fn new(name: impl Into<String>, width: usize) -> Self {
        Self {
            name: name.into(),
            width,
        }
    }
}

/// Positional split of a row's values into features and label streams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableLayout {
    /// Number of feature columns (after the key and order columns)
    pub feature_count: usize,

    /// Label streams, in column order
    pub label_streams: Vec<LabelStream>,
}

impl TableLayout {
    /// Create a layout from a feature count and label streams.
    pub fn new(feature_count: usize, label_streams: Vec<LabelStream>) -> Self {
        Self {
            feature_count,
            label_streams,
        }
    }

    /// Total columns in a row's values (features plus every label stream).
    pub fn row_width(&self) -> usize {
        self.feature_count + self.label_streams.iter().map(|s| s.width).sum::<usize>()
    }

    /// Column range of each label stream inside a row's values.
    pub fn label_offsets(&self) -> Vec<Range<usize>> {
        let mut start = self.feature_count;
        self.label_streams
            .iter()
            .map(|stream| {
                let range = start..start + stream.width;
                start = range.end;
                range
            })
            .collect()
    }

    /// Index of the stream called `name`, if any.
    pub fn stream_index(&self, name: &str) -> Option<usize> {
        self.label_streams.iter().position(|s| s.name == name)
    }

    /// Number of label streams.
    pub fn stream_count(&self) -> usize {
        self.label_streams.len()
    }

    /// Validate the layout.
    ///
    /// Requires at least one feature, at least one label stream, every width
    /// >= 1, and unique stream names.
    pub fn validate(&self) -> Result<()> {
        if self.feature_count == 0 {
            return Err(SequencerError::invalid_config("feature_count must be > 0"));
        }

        if self.label_streams.is_empty() {
            return Err(SequencerError::invalid_config(
                "at least one label stream is required",
            ));
        }

        for (i, stream) in self.label_streams.iter().enumerate() {
            if stream.width == 0 {
                return Err(SequencerError::invalid_config(format!(
                    "label stream '{}' must have width > 0",
                    stream.name
                )));
            }
            if self.label_streams[..i].iter().any(|s| s.name == stream.name) {
                return Err(SequencerError::invalid_config(format!(
                    "duplicate label stream name '{}'",
                    stream.name
                )));
            }
        }

        Ok(())
    }
}
