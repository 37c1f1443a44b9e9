//! Sequencer configuration management.
//!
//! Bundles everything needed to reproduce a dataset build (window length,
//! table layout, split ratios, parallelism) with TOML/JSON persistence.
//!
//! # Example
//!
//! ```ignore
//! use pitch_sequencer::config::SequencerConfig;
//!
//! let config = SequencerConfig::new(
//!     SequenceConfig::new(8),
//!     TableLayout::pitch_and_zones(20, 7, 3, 3),
//! );
//!
//! config.save_toml("experiment_config.toml")?;
//! let loaded = SequencerConfig::load_toml("experiment_config.toml")?;
//! let builder = loaded.builder()?;
//! ```

use crate::batch::{BatchConfig, BatchProcessor};
use crate::error::Result;
use crate::schema::TableLayout;
use crate::sequence_builder::{SequenceBuilder, SequenceConfig};
use crate::split::SplitConfig;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Unified sequencer configuration.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SequencerConfig {
    /// Window configuration
    pub sequence: SequenceConfig,

    /// Column layout of the input table
    pub layout: TableLayout,

    /// Train/val/test split (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split: Option<SplitConfig>,

    /// Parallel build settings (optional; sequential when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchConfig>,

    /// Experiment metadata (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ExperimentMetadata>,
}

/// Experiment metadata for tracking and reproducibility.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ExperimentMetadata {
    /// Experiment name
    pub name: String,

    /// Description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Custom tags
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl ExperimentMetadata {
    /// Metadata stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            created_at: Some(Utc::now()),
            tags: None,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl SequencerConfig {
    /// Create a configuration without split, batch, or metadata sections.
    pub fn new(sequence: SequenceConfig, layout: TableLayout) -> Self {
        Self {
            sequence,
            layout,
            split: None,
            batch: None,
            metadata: None,
        }
    }

    /// Set split ratios.
    pub fn with_split(mut self, split: SplitConfig) -> Self {
        self.split = Some(split);
        self
    }

    /// Enable parallel building.
    pub fn with_batch(mut self, batch: BatchConfig) -> Self {
        self.batch = Some(batch);
        self
    }

    /// Set experiment metadata.
    pub fn with_metadata(mut self, metadata: ExperimentMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.sequence.validate()?;
        self.layout.validate()?;
        if let Some(split) = &self.split {
            split.validate()?;
        }
        if let Some(batch) = &self.batch {
            batch.validate()?;
        }
        Ok(())
    }

    /// Sequential builder for this configuration.
    pub fn builder(&self) -> Result<SequenceBuilder> {
        SequenceBuilder::new(self.sequence.clone(), self.layout.clone())
    }

    /// Parallel processor for this configuration (default batch settings if
    /// no batch section is present).
    pub fn processor(&self) -> Result<BatchProcessor> {
        self.validate()?;
        Ok(BatchProcessor::new(
            self.builder()?,
            self.batch.clone().unwrap_or_default(),
        ))
    }

    /// Save configuration to TOML file.
    pub fn save_toml<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string)?;
        Ok(())
    }

    /// Load configuration from TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: SequencerConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json_string = serde_json::to_string_pretty(self)?;
        fs::write(path, json_string)?;
        Ok(())
    }

    /// Load configuration from JSON file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: SequencerConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }
}
