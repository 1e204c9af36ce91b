//! Session configuration model.
//!
//! Loaded from `config.toml` by the infrastructure layer; every field has a
//! default so an empty file is a valid configuration.

use crate::error::Result;
use crate::schema::{Dimension, LabelSchema};
use crate::session::DEFAULT_ACTIVITY_CAPACITY;
use crate::stats::FixedScorer;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ADVANCE_DELAY_MS: u64 = 500;
pub const DEFAULT_PROGRESS_TARGET: u32 = 50;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// Number of activity entries kept.
    pub activity_capacity: usize,
    /// Pause between a submission and loading the next item.
    pub advance_delay_ms: u64,
    /// Completion target shown as progress.
    pub progress_target: u32,
    /// Sample file; the built-in demo set is used when absent.
    pub samples: Option<PathBuf>,
    /// Directory export files are written to.
    pub export_dir: Option<PathBuf>,
    /// Schema override. The default four-dimension schema is used when empty.
    #[serde(rename = "dimension", skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    /// Placeholder quality figures. Not a measurement; absent by default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_scores: Option<FixedScorer>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            activity_capacity: DEFAULT_ACTIVITY_CAPACITY,
            advance_delay_ms: DEFAULT_ADVANCE_DELAY_MS,
            progress_target: DEFAULT_PROGRESS_TARGET,
            samples: None,
            export_dir: None,
            dimensions: Vec::new(),
            placeholder_scores: None,
        }
    }
}

impl SessionConfig {
    /// Parses a TOML document.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    /// The configured schema, or the default one.
    pub fn schema(&self) -> Result<LabelSchema> {
        if self.dimensions.is_empty() {
            Ok(LabelSchema::default())
        } else {
            LabelSchema::new(self.dimensions.clone())
        }
    }

    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }
}
