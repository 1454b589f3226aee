//! Error types for reading resources and building curves.

use std::path::PathBuf;

use thiserror::Error;

use crate::duration::DurationError;
use crate::source::TextEncoding;

/// Failures that abort a read or a curve build.
///
/// Per-field conversion problems are not represented here; they resolve to the
/// column default and are reported as [`crate::ConvertFailed`] notifications.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CurveError {
    /// No resource matched the id under any of the searched locations.
    #[error("resource not found: '{id}' (searched {searched:?})")]
    ResourceNotFound { id: String, searched: Vec<PathBuf> },

    /// The resource exists but could not be read.
    #[error("failed to read resource at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The resource bytes are not valid in the configured encoding.
    #[error("resource '{id}' is not valid {encoding:?}: {reason}")]
    Decode {
        id: String,
        encoding: TextEncoding,
        reason: String,
    },

    /// A row's time field is not a parseable duration.
    #[error("row {row}: invalid time {raw:?}: {source}")]
    RowTime {
        row: usize,
        raw: String,
        #[source]
        source: DurationError,
    },

    /// Configuration JSON could not be parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl CurveError {
    /// Short category name for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::ResourceNotFound { .. } | Self::Io { .. } | Self::Decode { .. } => "resource",
            Self::RowTime { .. } => "data",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for CurveError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
