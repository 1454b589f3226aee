//! Reader and curve-building configuration.

use serde::{Deserialize, Serialize};

use crate::source::TextEncoding;

/// How rows are read from a resource.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Treat the first line as a header and drop it.
    pub skip_header: bool,
    /// Single field separator. No quoting or escaping is recognised.
    pub delimiter: char,
    pub encoding: TextEncoding,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            skip_header: true,
            delimiter: ',',
            encoding: TextEncoding::Utf8,
        }
    }
}

/// Which build operation turns rows into a curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveMode {
    /// Two-point linear segments per consecutive pair, concatenated.
    #[default]
    LinearSegments,
    /// One key per row with linear tangents computed in a single pass.
    LinearSinglePass,
    /// One key per row with auto-smoothed tangents.
    Smooth,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveConfig {
    pub mode: CurveMode,
    /// Raw values are divided by this before becoming key values.
    pub value_divisor: f32,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            mode: CurveMode::LinearSegments,
            value_divisor: 100.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub reader: ReaderConfig,
    pub curve: CurveConfig,
}

impl Config {
    /// Parse a JSON config; missing fields fall back to their defaults.
    pub fn from_json(s: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(s)?)
    }
}
