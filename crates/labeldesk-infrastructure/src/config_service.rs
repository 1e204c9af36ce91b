//! Configuration service implementation.
//!
//! Loads the session configuration from an explicit path or from the
//! platform default (`~/.config/labeldesk/config.toml`).

use crate::paths::LabelDeskPaths;
use labeldesk_core::{LabelDeskError, Result, SessionConfig};
use std::path::{Path, PathBuf};

/// Loads [`SessionConfig`] from TOML.
///
/// Relative `samples` and `export_dir` entries are resolved against the
/// directory containing the config file.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    explicit: bool,
}

impl ConfigService {
    /// Uses the platform default location. A missing file yields defaults.
    pub fn new() -> Result<Self> {
        Ok(Self {
            path: LabelDeskPaths::config_file()?,
            explicit: false,
        })
    }

    /// Uses `path`. A missing file is an error.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            explicit: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load(&self) -> Result<SessionConfig> {
        if !self.path.exists() {
            if self.explicit {
                return Err(LabelDeskError::config(format!(
                    "config file not found: {}",
                    self.path.display()
                )));
            }
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(SessionConfig::default());
        }

        let raw = std::fs::read_to_string(&self.path)?;
        let mut config = SessionConfig::from_toml_str(&raw)?;

        // Validate the schema early so a bad file fails at startup.
        config.schema()?;

        if let Some(base) = self.path.parent() {
            config.samples = config.samples.map(|p| resolve(base, p));
            config.export_dir = config.export_dir.map(|p| resolve(base, p));
        }

        tracing::info!(path = %self.path.display(), "config loaded");
        Ok(config)
    }
}

fn resolve(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
