//! Dataset Validation Module
//!
//! Sanity checks on a built [`SequenceDataset`] before it is handed to a
//! training loop.
//!
//! # Validation Categories
//!
//! 1. **Alignment**: every label matrix and the provenance list have one row per window
//! 2. **Feature Ranges**: NaN/Inf detection
//! 3. **Label Encoding**: label rows are one-hot (0/1 entries summing to 1)
//!
//! # Usage
//!
//! ```
//! use pitch_sequencer::dataset::SequenceDataset;
//! use pitch_sequencer::schema::TableLayout;
//! use pitch_sequencer::validation::DatasetValidator;
//!
//! let dataset = SequenceDataset::empty(5, &TableLayout::pitch_type_only(4, 3));
//! let result = DatasetValidator::new().validate(&dataset);
//! assert!(result.is_valid());
//! ```

use crate::dataset::SequenceDataset;
use std::fmt;

/// Validation result for a single check.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationLevel {
    /// Data is valid
    Valid,
    /// Data has minor issues (warnings)
    Warning(String),
    /// Data has serious issues (errors)
    Error(String),
}

impl ValidationLevel {
    /// Check if this result indicates valid data.
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationLevel::Valid)
    }

    /// Check if this result is a warning.
    pub fn is_warning(&self) -> bool {
        matches!(self, ValidationLevel::Warning(_))
    }

    /// Check if this result is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, ValidationLevel::Error(_))
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationLevel::Valid => write!(f, "Valid"),
            ValidationLevel::Warning(msg) => write!(f, "Warning: {msg}"),
            ValidationLevel::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

/// Aggregated validation result.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    results: Vec<(String, ValidationLevel)>,
}

impl ValidationResult {
    /// Create a new empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation result.
    pub fn add(&mut self, check_name: &str, level: ValidationLevel) {
        self.results.push((check_name.to_string(), level));
    }

    /// Check if all validations passed (no errors or warnings).
    pub fn is_valid(&self) -> bool {
        self.results.iter().all(|(_, level)| level.is_valid())
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_error())
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.results.iter().any(|(_, level)| level.is_warning())
    }

    /// All warnings, prefixed with their check name.
    pub fn warnings(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Warning(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// All errors, prefixed with their check name.
    pub fn errors(&self) -> Vec<String> {
        self.results
            .iter()
            .filter_map(|(name, level)| match level {
                ValidationLevel::Error(msg) => Some(format!("{name}: {msg}")),
                _ => None,
            })
            .collect()
    }

    /// Get all results.
    pub fn all_results(&self) -> &[(String, ValidationLevel)] {
        &self.results
    }

    /// Get the number of checks performed.
    pub fn check_count(&self) -> usize {
        self.results.len()
    }

    /// Get the number of passed checks.
    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|(_, l)| l.is_valid()).count()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let passed = self.passed_count();
        let total = self.check_count();
        writeln!(f, "Validation: {passed}/{total} checks passed")?;

        for (name, level) in &self.results {
            if !level.is_valid() {
                writeln!(f, "  - {name}: {level}")?;
            }
        }

        Ok(())
    }
}

/// Configuration for dataset validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Check for NaN/Inf feature values
    pub check_nan_inf: bool,

    /// Check label rows are one-hot
    pub check_one_hot: bool,

    /// Tolerance for one-hot comparisons
    pub tolerance: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            check_nan_inf: true,
            check_one_hot: true,
            tolerance: 1e-9,
        }
    }
}

/// Validator for built datasets.
#[derive(Debug, Clone, Default)]
pub struct DatasetValidator {
    config: ValidationConfig,
}

impl DatasetValidator {
    /// Create a new validator with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator with custom configuration.
    pub fn with_config(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Run every enabled check.
    pub fn validate(&self, dataset: &SequenceDataset) -> ValidationResult {
        let mut result = ValidationResult::new();

        self.validate_alignment(dataset, &mut result);

        if self.config.check_nan_inf {
            self.validate_finite(dataset, &mut result);
        }

        if self.config.check_one_hot {
            self.validate_one_hot(dataset, &mut result);
        }

        result
    }

    fn validate_alignment(&self, dataset: &SequenceDataset, result: &mut ValidationResult) {
        let n = dataset.n_windows();
        let mut aligned = true;

        for stream in &dataset.labels {
            if stream.values.nrows() != n {
                result.add(
                    &format!("alignment_{}", stream.name),
                    ValidationLevel::Error(format!(
                        "{} label rows for {} windows",
                        stream.values.nrows(),
                        n
                    )),
                );
                aligned = false;
            }
        }

        if dataset.sources.len() != n {
            result.add(
                "alignment_sources",
                ValidationLevel::Error(format!(
                    "{} sources for {} windows",
                    dataset.sources.len(),
                    n
                )),
            );
            aligned = false;
        }

        if aligned {
            result.add("alignment", ValidationLevel::Valid);
        }
    }

    fn validate_finite(&self, dataset: &SequenceDataset, result: &mut ValidationResult) {
        let nan = dataset.features.iter().filter(|v| v.is_nan()).count();
        let inf = dataset.features.iter().filter(|v| v.is_infinite()).count();

        if nan + inf > 0 {
            result.add(
                "nan_inf_check",
                ValidationLevel::Error(format!("{nan} NaN and {inf} infinite feature values")),
            );
        } else {
            result.add("nan_inf_check", ValidationLevel::Valid);
        }
    }

    fn validate_one_hot(&self, dataset: &SequenceDataset, result: &mut ValidationResult) {
        let tol = self.config.tolerance;

        for stream in &dataset.labels {
            let mut not_binary = 0usize;
            let mut zero_rows = 0usize;
            let mut multi_hot = 0usize;

            for row in stream.values.rows() {
                // NaN fails every comparison, so test finiteness first
                if row
                    .iter()
                    .any(|&v| !v.is_finite() || (v.abs() > tol && (v - 1.0).abs() > tol))
                {
                    not_binary += 1;
                    continue;
                }
                let sum: f64 = row.sum();
                if sum.abs() <= tol {
                    zero_rows += 1;
                } else if (sum - 1.0).abs() > tol {
                    multi_hot += 1;
                }
            }

            let check = format!("one_hot_{}", stream.name);
            if not_binary + multi_hot > 0 {
                result.add(
                    &check,
                    ValidationLevel::Error(format!(
                        "{not_binary} non-binary rows, {multi_hot} rows with several hot classes"
                    )),
                );
            } else if zero_rows > 0 {
                result.add(
                    &check,
                    ValidationLevel::Warning(format!("{zero_rows} rows have no hot class")),
                );
            } else {
                result.add(&check, ValidationLevel::Valid);
            }
        }
    }
}
