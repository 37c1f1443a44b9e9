//! Contiguous run enumeration.
//!
//! For positions `1..=n` every contiguous ascending sub-run `[i..=j]` is
//! produced, giving `n(n+1)/2` runs. Runs are ordered by start position, then
//! by end position.

/// A contiguous, strictly ascending, non-empty run of real positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Run {
    /// First position (>= 1)
    pub start: usize,

    /// Last position, inclusive (>= start)
    pub end: usize,
}

impl Run {
    /// Create a run covering `start..=end`.
    ///
    /// # Panics
    ///
    /// Panics if `start == 0` or `end < start`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(start >= 1, "runs contain real positions only");
        assert!(end >= start, "run end must not precede its start");
        Self { start, end }
    }

    /// Number of positions in the run.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always false; runs are non-empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Most recent position in the run.
    #[inline]
    pub fn max_position(&self) -> usize {
        self.end
    }

    /// Iterate positions in ascending order.
    pub fn positions(&self) -> impl Iterator<Item = usize> {
        self.start..=self.end
    }
}

/// Number of runs for an appearance of `n` pitches.
#[inline]
pub fn run_count(n: usize) -> usize {
    n * (n + 1) / 2
}

/// Enumerate every contiguous run over positions `1..=n`.
///
/// `n == 0` yields no runs.
pub fn ascending_runs(n: usize) -> Vec<Run> {
    let mut runs = Vec::with_capacity(run_count(n));
    for start in 1..=n {
        for end in start..=n {
            runs.push(Run { start, end });
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_count_matches_triangular_number() {
        for n in 0..20 {
            assert_eq!(ascending_runs(n).len(), n * (n + 1) / 2, "n = {n}");
        }
    }

    #[test]
    fn test_empty_appearance_yields_no_runs() {
        assert!(ascending_runs(0).is_empty());
    }

    #[test]
    fn test_single_pitch_yields_one_run() {
        assert_eq!(ascending_runs(1), vec![Run::new(1, 1)]);
    }

    #[test]
    fn test_runs_ordered_by_start_then_end() {
        let runs: Vec<Vec<usize>> = ascending_runs(3)
            .iter()
            .map(|r| r.positions().collect())
            .collect();

        assert_eq!(
            runs,
            vec![
                vec![1],
                vec![1, 2],
                vec![1, 2, 3],
                vec![2],
                vec![2, 3],
                vec![3],
            ]
        );
    }

    #[test]
    fn test_runs_are_contiguous_and_ascending() {
        for run in ascending_runs(6) {
            let positions: Vec<usize> = run.positions().collect();
            assert!(!positions.is_empty());
            assert!(positions[0] >= 1);
            for pair in positions.windows(2) {
                assert_eq!(pair[1], pair[0] + 1);
            }
            assert_eq!(positions.len(), run.len());
            assert_eq!(*positions.last().unwrap(), run.max_position());
        }
    }

    #[test]
    #[should_panic(expected = "real positions")]
    fn test_run_rejects_padding_start() {
        Run::new(0, 2);
    }
}
