//! Layouts for the pitch prediction heads.
//!
//! The single-stream layout predicts pitch type only. The three-stream layout
//! adds the vertical and horizontal location zone of the next pitch.

use super::layout::{LabelStream, TableLayout};

/// Stream name for the pitch type head.
pub const PITCH_TYPE_STREAM: &str = "pitch";

/// Stream name for the vertical zone head.
pub const VERTICAL_ZONE_STREAM: &str = "vertical";

/// Stream name for the horizontal zone head.
pub const HORIZONTAL_ZONE_STREAM: &str = "horizontal";

impl TableLayout {
    /// Layout with a single pitch type label stream.
    pub fn pitch_type_only(feature_count: usize, n_pitch_types: usize) -> Self {
        Self::new(
            feature_count,
            vec![LabelStream::new(PITCH_TYPE_STREAM, n_pitch_types)],
        )
    }

    /// Layout with pitch type, vertical zone and horizontal zone label streams.
    pub fn pitch_and_zones(
        feature_count: usize,
        n_pitch_types: usize,
        n_vertical_zones: usize,
        n_horizontal_zones: usize,
    ) -> Self {
        Self::new(
            feature_count,
            vec![
                LabelStream::new(PITCH_TYPE_STREAM, n_pitch_types),
                LabelStream::new(VERTICAL_ZONE_STREAM, n_vertical_zones),
                LabelStream::new(HORIZONTAL_ZONE_STREAM, n_horizontal_zones),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pitch_type_only() {
        let layout = TableLayout::pitch_type_only(12, 6);
        assert_eq!(layout.stream_count(), 1);
        assert_eq!(layout.row_width(), 18);
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_pitch_and_zones() {
        let layout = TableLayout::pitch_and_zones(12, 6, 3, 3);
        assert_eq!(layout.row_width(), 24);
        assert_eq!(layout.label_offsets()[1], 18..21);
        assert!(layout.validate().is_ok());
    }
}
