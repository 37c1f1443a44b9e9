//! Output tensors.
//!
//! A [`SequenceDataset`] holds one row per packed window:
//!
//! - `features`: `(n_windows, max_length, feature_count)`
//! - one `(n_windows, width)` label matrix per stream
//! - one [`WindowSource`] per window recording where it came from
//!
//! Row `i` of every tensor refers to the same window.

use crate::error::Result;
use crate::schema::TableLayout;
use ndarray::{Array2, Array3, ArrayView1};
use serde::{Deserialize, Serialize};

/// Label matrix of one stream.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamLabels {
    /// Stream name
    pub name: String,

    /// `(n_windows, width)` one-hot rows
    pub values: Array2<f64>,
}

/// Provenance of one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSource {
    /// Index of the appearance in the input slice
    pub appearance: usize,

    /// Position whose labels the window carries
    pub max_position: usize,
}

/// Windows produced from a single appearance, stored flat.
///
/// Intermediate form; [`SequenceDataset::from_appearances`] stitches these
/// together without re-copying per window.
#[derive(Debug, Clone, Default)]
pub struct AppearanceSequences {
    /// Number of windows
    pub n_windows: usize,

    /// Row-major `n_windows * max_length * feature_count`
    pub features: Vec<f64>,

    /// Per stream, row-major `n_windows * width`
    pub labels: Vec<Vec<f64>>,

    /// Labelled position of each window
    pub max_positions: Vec<usize>,
}

impl AppearanceSequences {
    /// Empty buffers sized for `n_windows` windows.
    pub fn with_capacity(n_windows: usize, max_length: usize, layout: &TableLayout) -> Self {
        Self {
            n_windows: 0,
            features: Vec::with_capacity(n_windows * max_length * layout.feature_count),
            labels: layout
                .label_streams
                .iter()
                .map(|s| Vec::with_capacity(n_windows * s.width))
                .collect(),
            max_positions: Vec::with_capacity(n_windows),
        }
    }
}

/// Index-aligned feature tensor and label matrices.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDataset {
    /// `(n_windows, max_length, feature_count)`
    pub features: Array3<f64>,

    /// One label matrix per stream, in layout order
    pub labels: Vec<StreamLabels>,

    /// Provenance of each window
    pub sources: Vec<WindowSource>,
}

impl SequenceDataset {
    /// Dataset with zero windows.
    pub fn empty(max_length: usize, layout: &TableLayout) -> Self {
        Self {
            features: Array3::zeros((0, max_length, layout.feature_count)),
            labels: layout
                .label_streams
                .iter()
                .map(|s| StreamLabels {
                    name: s.name.clone(),
                    values: Array2::zeros((0, s.width)),
                })
                .collect(),
            sources: Vec::new(),
        }
    }

    /// Concatenate per-appearance windows in iteration order.
    ///
    /// `parts[i]` is attributed to appearance `first_appearance + i`.
    pub fn from_appearances(
        parts: Vec<AppearanceSequences>,
        first_appearance: usize,
        max_length: usize,
        layout: &TableLayout,
    ) -> Result<Self> {
        let n_windows: usize = parts.iter().map(|p| p.n_windows).sum();
        let feature_count = layout.feature_count;

        let mut features = Vec::with_capacity(n_windows * max_length * feature_count);
        let mut labels: Vec<Vec<f64>> = layout
            .label_streams
            .iter()
            .map(|s| Vec::with_capacity(n_windows * s.width))
            .collect();
        let mut sources = Vec::with_capacity(n_windows);

        for (appearance, part) in (first_appearance..).zip(parts) {
            features.extend(part.features);
            for (stream, values) in labels.iter_mut().zip(part.labels) {
                stream.extend(values);
            }
            sources.extend(part.max_positions.into_iter().map(|max_position| {
                WindowSource {
                    appearance,
                    max_position,
                }
            }));
        }

        let features = Array3::from_shape_vec((n_windows, max_length, feature_count), features)?;
        let labels = layout
            .label_streams
            .iter()
            .zip(labels)
            .map(|(stream, values)| -> Result<StreamLabels> {
                Ok(StreamLabels {
                    name: stream.name.clone(),
                    values: Array2::from_shape_vec((n_windows, stream.width), values)?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            features,
            labels,
            sources,
        })
    }

    /// Number of windows.
    #[inline]
    pub fn n_windows(&self) -> usize {
        self.features.shape()[0]
    }

    /// True if there are no windows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_windows() == 0
    }

    /// Window length.
    #[inline]
    pub fn max_length(&self) -> usize {
        self.features.shape()[1]
    }

    /// Feature vector width.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.shape()[2]
    }

    /// Label matrix of the stream called `name`.
    pub fn labels_for(&self, name: &str) -> Option<&Array2<f64>> {
        self.labels
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.values)
    }

    /// Class counts of stream `name`, by argmax of each label row.
    ///
    /// All-zero rows are not counted. Returns `None` for an unknown stream.
    pub fn label_distribution(&self, name: &str) -> Option<Vec<usize>> {
        let values = self.labels_for(name)?;
        let mut counts = vec![0usize; values.ncols()];

        for row in values.rows() {
            if let Some(class) = argmax(row) {
                counts[class] += 1;
            }
        }

        Some(counts)
    }
}

fn argmax(row: ArrayView1<'_, f64>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in row.iter().enumerate() {
        if v > 0.0 && best.map_or(true, |(_, b)| v > b) {
            best = Some((i, v));
        }
    }
    best.map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TableLayout {
        TableLayout::pitch_type_only(2, 3)
    }

    fn part(n_windows: usize, fill: f64, class: usize) -> AppearanceSequences {
        let mut labels = vec![0.0; n_windows * 3];
        for w in 0..n_windows {
            labels[w * 3 + class] = 1.0;
        }
        AppearanceSequences {
            n_windows,
            features: vec![fill; n_windows * 2 * 2],
            labels: vec![labels],
            max_positions: (1..=n_windows).collect(),
        }
    }

    #[test]
    fn test_empty_dataset_shapes() {
        let dataset = SequenceDataset::empty(4, &layout());
        assert!(dataset.is_empty());
        assert_eq!(dataset.features.shape(), &[0, 4, 2]);
        assert_eq!(dataset.labels_for("pitch").unwrap().shape(), &[0, 3]);
    }

    #[test]
    fn test_from_appearances_concatenates_in_order() {
        let dataset =
            SequenceDataset::from_appearances(vec![part(2, 1.0, 0), part(1, 2.0, 2)], 0, 2, &layout())
                .unwrap();

        assert_eq!(dataset.n_windows(), 3);
        assert_eq!(dataset.max_length(), 2);
        assert_eq!(dataset.feature_count(), 2);
        assert_eq!(dataset.features[[1, 1, 1]], 1.0);
        assert_eq!(dataset.features[[2, 0, 0]], 2.0);
        assert_eq!(
            dataset.sources,
            vec![
                WindowSource {
                    appearance: 0,
                    max_position: 1
                },
                WindowSource {
                    appearance: 0,
                    max_position: 2
                },
                WindowSource {
                    appearance: 1,
                    max_position: 1
                },
            ]
        );
    }

    #[test]
    fn test_from_appearances_offsets_sources() {
        let dataset =
            SequenceDataset::from_appearances(vec![part(1, 0.0, 0), part(2, 0.0, 1)], 14, 2, &layout())
                .unwrap();

        let appearances: Vec<usize> = dataset.sources.iter().map(|s| s.appearance).collect();
        assert_eq!(appearances, vec![14, 15, 15]);
    }

    #[test]
    fn test_from_no_appearances_matches_empty() {
        let dataset = SequenceDataset::from_appearances(Vec::new(), 0, 3, &layout()).unwrap();
        assert_eq!(dataset, SequenceDataset::empty(3, &layout()));
    }

    #[test]
    fn test_from_appearances_rejects_inconsistent_buffers() {
        let mut broken = part(2, 1.0, 0);
        broken.features.pop();
        let result = SequenceDataset::from_appearances(vec![broken], 0, 2, &layout());
        assert!(matches!(result, Err(crate::SequencerError::Tensor(_))));
    }

    #[test]
    fn test_label_distribution() {
        let dataset =
            SequenceDataset::from_appearances(vec![part(2, 0.0, 0), part(3, 0.0, 2)], 0, 2, &layout())
                .unwrap();

        assert_eq!(dataset.label_distribution("pitch"), Some(vec![2, 0, 3]));
        assert_eq!(dataset.label_distribution("zone"), None);
    }

    #[test]
    fn test_argmax_skips_zero_rows() {
        let zeros = [0.0, 0.0];
        assert_eq!(argmax(ArrayView1::from(&zeros[..])), None);
        let row = [0.0, 0.2, 0.7];
        assert_eq!(argmax(ArrayView1::from(&row[..])), Some(2));
    }
}
