//! Pitch table and plate appearance grouping.
//!
//! The table arrives fully numeric, one row per pitch:
//!
//! ```text
//! [appearance_key, order, <features...>, <label streams...>]
//! ```
//!
//! Rows belonging to one appearance need not be contiguous. [`PitchTable::appearances`]
//! partitions them by key, keeping keys in first-seen order so that output
//! ordering is reproducible.
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::schema::TableLayout;
//! use pitch_sequencer::table::PitchTable;
//!
//! let layout = TableLayout::pitch_type_only(1, 2);
//! let table = PitchTable::from_rows(
//!     vec![
//!         vec![7.0, 2.0, 0.5, 0.0, 1.0],
//!         vec![9.0, 1.0, 0.1, 1.0, 0.0],
//!         vec![7.0, 1.0, 0.4, 1.0, 0.0],
//!     ],
//!     &layout,
//! )
//! .unwrap();
//!
//! let appearances = table.appearances();
//! assert_eq!(appearances.len(), 2);
//! assert_eq!(appearances[0].key, 7.0);
//! assert_eq!(appearances[0].len(), 2);
//! ```

use crate::error::{Result, SequencerError};
use crate::schema::{TableLayout, KEY_COLUMNS};
use ahash::AHashMap;
use std::cmp::Ordering;

/// One observed pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchRow {
    /// Within-appearance order (pitch number)
    pub order: f64,

    /// Feature columns followed by every label stream's columns
    pub values: Vec<f64>,
}

impl PitchRow {
    /// Create a new pitch row.
    pub fn new(order: f64, values: Vec<f64>) -> Self {
        Self { order, values }
    }
}

/// All pitches of one plate appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    /// Opaque appearance identifier
    pub key: f64,

    /// Pitches, in any order
    pub rows: Vec<PitchRow>,
}

impl Appearance {
    /// Create an appearance from its rows.
    pub fn new(key: f64, rows: Vec<PitchRow>) -> Self {
        Self { key, rows }
    }

    /// Number of pitches.
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the appearance has no pitches.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows sorted ascending by order.
    ///
    /// Always re-sorts; caller order is never trusted. The sort is stable, so
    /// rows with equal order keep their table order.
    pub fn sorted_rows(&self) -> Vec<&PitchRow> {
        let mut rows: Vec<&PitchRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| compare_order(a.order, b.order));
        rows
    }
}

fn compare_order(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}

/// A validated pitch table.
#[derive(Debug, Clone, Default)]
pub struct PitchTable {
    keys: Vec<f64>,
    rows: Vec<PitchRow>,
}

impl PitchTable {
    /// Build a table from raw numeric rows.
    ///
    /// Each row must have exactly `2 + layout.row_width()` columns.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` naming the first offending row.
    pub fn from_rows(rows: Vec<Vec<f64>>, layout: &TableLayout) -> Result<Self> {
        let expected = KEY_COLUMNS + layout.row_width();
        let mut keys = Vec::with_capacity(rows.len());
        let mut pitch_rows = Vec::with_capacity(rows.len());

        for (i, mut row) in rows.into_iter().enumerate() {
            if row.len() != expected {
                return Err(SequencerError::shape_mismatch(
                    format!("table row {i}"),
                    expected,
                    row.len(),
                ));
            }

            let values = row.split_off(KEY_COLUMNS);
            keys.push(row[0]);
            pitch_rows.push(PitchRow::new(row[1], values));
        }

        Ok(Self {
            keys,
            rows: pitch_rows,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Partition rows by appearance key.
    ///
    /// Appearances are returned in the order their key first appears in the
    /// table. Rows inside an appearance keep table order; sorting happens when
    /// the appearance is sequenced.
    pub fn appearances(&self) -> Vec<Appearance> {
        let mut slots: AHashMap<u64, usize> = AHashMap::new();
        let mut appearances: Vec<Appearance> = Vec::new();

        for (key, row) in self.keys.iter().zip(&self.rows) {
            let slot = *slots.entry(key_bits(*key)).or_insert_with(|| {
                appearances.push(Appearance::new(*key, Vec::new()));
                appearances.len() - 1
            });
            appearances[slot].rows.push(row.clone());
        }

        log::debug!(
            "Grouped {} rows into {} appearances",
            self.rows.len(),
            appearances.len()
        );

        appearances
    }
}

// -0.0 and 0.0 name the same appearance.
fn key_bits(key: f64) -> u64 {
    (key + 0.0).to_bits()
}
