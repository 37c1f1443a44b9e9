//! Fixed-length window packing.
//!
//! A run shorter than `max_length` is right-padded with
//! [`PADDING_POSITION`]. A longer run is split left to right into
//! `ceil(len / max_length)` chunks, the last one right-padded. Every real
//! position of a run lands in exactly one window.

use super::index_mapper::PADDING_POSITION;
use super::runs::Run;

/// A run normalized to exactly `max_length` positions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackedWindow {
    positions: Vec<usize>,
}

impl PackedWindow {
    /// Positions in the window, padding included.
    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Window length.
    #[inline]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// True if the window has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of real (non-padding) positions.
    pub fn real_len(&self) -> usize {
        self.positions
            .iter()
            .filter(|&&p| p != PADDING_POSITION)
            .count()
    }

    /// Highest real position in the window.
    ///
    /// Padding is 0 and real positions are >= 1, so this is never a padding
    /// slot for a window packed from a non-empty run.
    pub fn max_position(&self) -> usize {
        self.positions
            .iter()
            .copied()
            .max()
            .unwrap_or(PADDING_POSITION)
    }
}

/// Number of windows a run of `run_len` positions packs into.
#[inline]
pub fn window_count(run_len: usize, max_length: usize) -> usize {
    run_len.div_ceil(max_length)
}

/// Pack `run` into windows of exactly `max_length` positions.
///
/// # Panics
///
/// Panics if `max_length == 0`; configuration validation rejects that earlier.
pub fn pack_run(run: &Run, max_length: usize) -> Vec<PackedWindow> {
    assert!(max_length > 0, "max_length must be > 0");

    let positions: Vec<usize> = run.positions().collect();
    positions
        .chunks(max_length)
        .map(|chunk| {
            let mut slots = Vec::with_capacity(max_length);
            slots.extend_from_slice(chunk);
            slots.resize(max_length, PADDING_POSITION);
            PackedWindow { positions: slots }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence_builder::runs::ascending_runs;

    fn packed(start: usize, end: usize, max_length: usize) -> Vec<Vec<usize>> {
        pack_run(&Run::new(start, end), max_length)
            .into_iter()
            .map(|w| w.positions().to_vec())
            .collect()
    }

    #[test]
    fn test_short_run_is_right_padded() {
        assert_eq!(packed(2, 2, 3), vec![vec![2, 0, 0]]);
    }

    #[test]
    fn test_exact_run_is_unchanged() {
        assert_eq!(packed(1, 2, 2), vec![vec![1, 2]]);
    }

    #[test]
    fn test_long_run_is_chunked() {
        assert_eq!(packed(1, 3, 2), vec![vec![1, 2], vec![3, 0]]);
        assert_eq!(packed(1, 5, 2), vec![vec![1, 2], vec![3, 4], vec![5, 0]]);
    }

    #[test]
    fn test_long_run_multiple_of_length_has_no_padding() {
        assert_eq!(packed(3, 6, 2), vec![vec![3, 4], vec![5, 6]]);
    }

    #[test]
    fn test_every_window_has_max_length() {
        for max_length in 1..6 {
            for run in ascending_runs(9) {
                let windows = pack_run(&run, max_length);
                assert_eq!(windows.len(), window_count(run.len(), max_length));
                for window in windows {
                    assert_eq!(window.len(), max_length);
                }
            }
        }
    }

    #[test]
    fn test_stripping_padding_reconstructs_run() {
        for max_length in 1..5 {
            for run in ascending_runs(7) {
                let mut joined: Vec<usize> = pack_run(&run, max_length)
                    .iter()
                    .flat_map(|w| w.positions().to_vec())
                    .collect();
                while joined.last() == Some(&PADDING_POSITION) {
                    joined.pop();
                }
                assert_eq!(joined, run.positions().collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn test_max_position_ignores_padding() {
        let windows = pack_run(&Run::new(1, 5), 2);
        let maxima: Vec<usize> = windows.iter().map(|w| w.max_position()).collect();
        assert_eq!(maxima, vec![2, 4, 5]);
        assert_eq!(windows[2].real_len(), 1);
    }

    #[test]
    fn test_window_length_one() {
        assert_eq!(packed(2, 4, 1), vec![vec![2], vec![3], vec![4]]);
    }
}
