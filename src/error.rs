//! Error types for pitch sequence building.
//!
//! Every error here is structural: it is raised once per call, before any
//! output is returned. An appearance with zero rows is not an error (it
//! simply yields zero windows), and unsorted input is re-sorted rather than
//! rejected.

/// Result type alias using [`SequencerError`].
pub type Result<T> = std::result::Result<T, SequencerError>;

/// Top-level error type.
#[derive(Debug, thiserror::Error)]
pub enum SequencerError {
    /// A row's column count does not match the declared feature/label split.
    #[error("shape mismatch in {context}: expected {expected} columns, got {actual}")]
    ShapeMismatch {
        /// Where the mismatch was found (e.g. `"table row 12"`)
        context: String,
        /// Expected number of columns
        expected: usize,
        /// Actual number of columns
        actual: usize,
    },

    /// Window length, feature count, or a label width is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Tensor assembly failed.
    #[error("tensor: {0}")]
    Tensor(#[from] ndarray::ShapeError),

    /// Worker pool could not be created.
    #[error("thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// I/O error while reading or writing configuration.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error.
    #[error("toml: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// TOML parse error.
    #[error("toml: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    /// JSON error.
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl SequencerError {
    /// Shorthand for [`SequencerError::ShapeMismatch`].
    pub fn shape_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ShapeMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Shorthand for [`SequencerError::InvalidConfiguration`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
