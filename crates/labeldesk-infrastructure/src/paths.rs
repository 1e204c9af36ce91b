//! Unified path management for LabelDesk configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/labeldesk/        # Config directory (platform default)
//! └── config.toml             # Session configuration
//! ```

use labeldesk_core::{LabelDeskError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "labeldesk";
const CONFIG_FILE: &str = "config.toml";

pub struct LabelDeskPaths;

impl LabelDeskPaths {
    /// Returns the LabelDesk configuration directory.
    ///
    /// # Errors
    ///
    /// Returns a config error when the platform has no config directory
    /// (e.g. no home directory is set).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| LabelDeskError::config("Cannot find config directory"))
    }

    /// Returns the default path of `config.toml`.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }
}
