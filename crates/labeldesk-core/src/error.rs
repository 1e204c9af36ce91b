//! Error types for the LabelDesk session engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the whole LabelDesk workspace.
///
/// Every variant is locally recoverable: the engine never panics on bad
/// input and never swallows a rejected command silently.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelDeskError {
    /// Submission attempted while some dimensions have no selection.
    #[error("Please select all labels before submitting (missing: {})", .missing.join(", "))]
    IncompleteLabels { missing: Vec<String> },

    /// Command arrived while the post-submit advancement is still pending.
    #[error("Session is busy advancing to the next item")]
    SessionBusy,

    /// Report or export requested with an empty annotation log.
    #[error("No data available. Please annotate some items first.")]
    NoData,

    /// The dimension key is not part of the label schema.
    #[error("Unknown label dimension: '{0}'")]
    UnknownDimension(String),

    /// The value is outside the dimension's closed domain.
    #[error("Invalid value '{value}' for dimension '{dimension}'")]
    InvalidLabelValue { dimension: String, value: String },

    /// A session needs at least one sample item.
    #[error("Sample source contains no items")]
    EmptySampleSource,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LabelDeskError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an IncompleteLabels error
    pub fn incomplete(missing: Vec<String>) -> Self {
        Self::IncompleteLabels { missing }
    }

    /// Creates an InvalidLabelValue error
    pub fn invalid_value(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidLabelValue {
            dimension: dimension.into(),
            value: value.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an IncompleteLabels error
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::IncompleteLabels { .. })
    }

    /// Check if this is a SessionBusy error
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::SessionBusy)
    }

    /// Check if this is a NoData error
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::NoData)
    }

    /// Check if this error was caused by an illegal label selection.
    pub fn is_invalid_selection(&self) -> bool {
        matches!(
            self,
            Self::UnknownDimension(_) | Self::InvalidLabelValue { .. }
        )
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for LabelDeskError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for LabelDeskError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for LabelDeskError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, LabelDeskError>`.
pub type Result<T> = std::result::Result<T, LabelDeskError>;
