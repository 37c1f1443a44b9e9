//! Table Layout Module
//!
//! Describes how a fully numeric pitch table is split into columns:
//!
//! ```text
//! [appearance_key, order, <features...>, <stream 1...>, <stream 2...>, ...]
//! ```
//!
//! The first two columns are consumed by grouping and sorting. Everything
//! after them is the row's `values`: `feature_count` feature columns followed
//! by one block of one-hot columns per label stream. Widths are declared, never
//! inferred from the data.
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::schema::TableLayout;
//!
//! // 9 features, 7 pitch types, 3 vertical zones, 3 horizontal zones
//! let layout = TableLayout::pitch_and_zones(9, 7, 3, 3);
//! assert_eq!(layout.row_width(), 9 + 7 + 3 + 3);
//! assert_eq!(layout.stream_index("vertical"), Some(1));
//! ```

mod layout;
mod presets;

pub use layout::{LabelStream, TableLayout};
pub use presets::{HORIZONTAL_ZONE_STREAM, PITCH_TYPE_STREAM, VERTICAL_ZONE_STREAM};

/// Number of leading key columns (appearance key, order) in a raw table row.
pub const KEY_COLUMNS: usize = 2;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_width() {
        let layout = TableLayout::pitch_type_only(5, 4);
        assert_eq!(KEY_COLUMNS + layout.row_width(), 11);
    }

    #[test]
    fn test_preset_stream_names() {
        let layout = TableLayout::pitch_and_zones(5, 4, 3, 3);
        let names: Vec<&str> = layout.label_streams.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(
            names,
            vec![PITCH_TYPE_STREAM, VERTICAL_ZONE_STREAM, HORIZONTAL_ZONE_STREAM]
        );
    }
}
