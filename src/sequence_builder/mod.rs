//! Subsequence expansion for pitch-sequence models.
//!
//! Turns each plate appearance into every contiguous sub-run of its pitches,
//! normalized to a fixed window length and paired with the labels of the run's
//! most recent pitch.
//!
//! # Architecture
//!
//! - **PositionIndex**: 1-based position -> feature/label lookup, 0 = padding
//! - **ascending_runs**: all `n(n+1)/2` contiguous runs of positions
//! - **pack_run**: pad short runs, chunk long runs to `max_length`
//! - **SequenceBuilder**: per-appearance orchestration and concatenation
//!
//! # Example
//!
//! ```
//! use pitch_sequencer::sequence_builder::{ascending_runs, pack_run};
//!
//! let runs = ascending_runs(3);
//! assert_eq!(runs.len(), 6);
//!
//! // [1, 2, 3] with max_length 2 -> [1, 2], [3, 0]
//! let windows = pack_run(&runs[2], 2);
//! assert_eq!(windows[0].positions(), &[1, 2]);
//! assert_eq!(windows[1].positions(), &[3, 0]);
//! ```

mod builder;
mod index_mapper;
mod packer;
mod runs;

pub use builder::{SequenceBuilder, SequenceConfig};
pub use index_mapper::{PositionIndex, PADDING_POSITION};
pub use packer::{pack_run, window_count, PackedWindow};
pub use runs::{ascending_runs, run_count, Run};
