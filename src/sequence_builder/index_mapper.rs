//! Position index for one appearance.
//!
//! Positions are 1-based in pitch order. Position 0 is reserved as padding and
//! resolves to a zero feature vector and a zero label vector in every stream,
//! so a packed window can be gathered without special-casing its padded slots.

use crate::error::{Result, SequencerError};
use crate::schema::TableLayout;
use crate::table::PitchRow;
use ndarray::{Array2, ArrayView1};

/// Reserved position denoting "no pitch".
pub const PADDING_POSITION: usize = 0;

/// Position -> feature / label lookup for one appearance.
///
/// Backed by dense matrices with one row per position, row 0 being the
/// padding row. The mapping is therefore total over `0..=n`.
#[derive(Debug, Clone)]
pub struct PositionIndex {
    /// `(n + 1, feature_count)`, row 0 zero
    features: Array2<f64>,

    /// One `(n + 1, width)` matrix per label stream, row 0 zero
    labels: Vec<Array2<f64>>,
}

impl PositionIndex {
    /// Build the index from rows already sorted by order.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if a row's value count differs from `layout.row_width()`.
    pub fn build(rows: &[&PitchRow], layout: &TableLayout) -> Result<Self> {
        let n = rows.len();
        let expected = layout.row_width();
        let offsets = layout.label_offsets();

        let mut features = Array2::<f64>::zeros((n + 1, layout.feature_count));
        let mut labels: Vec<Array2<f64>> = layout
            .label_streams
            .iter()
            .map(|stream| Array2::<f64>::zeros((n + 1, stream.width)))
            .collect();

        for (i, row) in rows.iter().enumerate() {
            if row.values.len() != expected {
                return Err(SequencerError::shape_mismatch(
                    format!("pitch {} (order {})", i + 1, row.order),
                    expected,
                    row.values.len(),
                ));
            }

            let position = i + 1;
            features
                .row_mut(position)
                .assign(&ArrayView1::from(&row.values[..layout.feature_count]));

            for (matrix, range) in labels.iter_mut().zip(&offsets) {
                matrix
                    .row_mut(position)
                    .assign(&ArrayView1::from(&row.values[range.clone()]));
            }
        }

        Ok(Self { features, labels })
    }

    /// Number of real positions (n).
    #[inline]
    pub fn len(&self) -> usize {
        self.features.nrows() - 1
    }

    /// True if there are no real positions.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Feature vector width.
    #[inline]
    pub fn feature_count(&self) -> usize {
        self.features.ncols()
    }

    /// Feature vector at `position` (zero vector for padding).
    ///
    /// # Panics
    ///
    /// Panics if `position > self.len()`.
    pub fn features(&self, position: usize) -> ArrayView1<'_, f64> {
        self.features.row(position)
    }

    /// Label vector of stream `stream` at `position` (zero vector for padding).
    ///
    /// # Panics
    ///
    /// Panics if `stream` or `position` is out of range.
    pub fn label(&self, stream: usize, position: usize) -> ArrayView1<'_, f64> {
        self.labels[stream].row(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<PitchRow> {
        // 2 features, stream "pitch" width 3, stream "vertical" width 2
        vec![
            PitchRow::new(1.0, vec![0.1, 0.2, 1.0, 0.0, 0.0, 0.0, 1.0]),
            PitchRow::new(2.0, vec![0.3, 0.4, 0.0, 0.0, 1.0, 1.0, 0.0]),
        ]
    }

    fn layout() -> TableLayout {
        TableLayout::new(
            2,
            vec![
                crate::schema::LabelStream::new("pitch", 3),
                crate::schema::LabelStream::new("vertical", 2),
            ],
        )
    }

    #[test]
    fn test_positions_are_one_based() {
        let rows = rows();
        let refs: Vec<&PitchRow> = rows.iter().collect();
        let index = PositionIndex::build(&refs, &layout()).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.features(1).to_vec(), vec![0.1, 0.2]);
        assert_eq!(index.features(2).to_vec(), vec![0.3, 0.4]);
        assert_eq!(index.label(0, 2).to_vec(), vec![0.0, 0.0, 1.0]);
        assert_eq!(index.label(1, 1).to_vec(), vec![0.0, 1.0]);
    }

    #[test]
    fn test_padding_position_is_zero_in_every_stream() {
        let rows = rows();
        let refs: Vec<&PitchRow> = rows.iter().collect();
        let index = PositionIndex::build(&refs, &layout()).unwrap();

        assert_eq!(index.features(PADDING_POSITION).to_vec(), vec![0.0, 0.0]);
        assert_eq!(index.label(0, PADDING_POSITION).to_vec(), vec![0.0; 3]);
        assert_eq!(index.label(1, PADDING_POSITION).to_vec(), vec![0.0; 2]);
    }

    #[test]
    fn test_shape_mismatch() {
        let bad = PitchRow::new(4.0, vec![0.1, 0.2, 1.0]);
        let err = PositionIndex::build(&[&bad], &layout()).unwrap_err();

        match err {
            SequencerError::ShapeMismatch {
                expected, actual, ..
            } => {
                assert_eq!(expected, 7);
                assert_eq!(actual, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_index_still_has_padding() {
        let index = PositionIndex::build(&[], &layout()).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.feature_count(), 2);
        assert_eq!(index.features(PADDING_POSITION).len(), 2);
    }
}
