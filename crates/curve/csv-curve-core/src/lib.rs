//! CSV Curve Core
//!
//! Reads delimiter-separated resources into statically declared records and
//! turns time/value rows into keyframe curves. Tangent modes are kept in a
//! packed bitfield owned by [`Keyframe`].
//!
//! Data flow: [`ResourceLoader`] -> [`RowSource`] -> [`CsvReader`] (driven by a
//! [`ColumnSet`]) -> [`builder`] operations -> [`Curve`].

pub mod builder;
pub mod columns;
pub mod config;
pub mod convert;
pub mod curve;
pub mod duration;
pub mod error;
pub mod keyframe;
pub mod reader;
pub mod source;
pub mod tangent;

// Re-exports for consumers
pub use builder::{
    build_curve, build_linear_segments, build_linear_single_pass, build_smooth,
    read_time_value_rows, CurveCreator, TimeValueRow,
};
pub use columns::{ColumnSet, ColumnSetBuilder, ConvertFailed, CsvRecord};
pub use config::{Config, CurveConfig, CurveMode, ReaderConfig};
pub use convert::{ConvertError, FromField};
pub use curve::Curve;
pub use duration::{parse_duration_ms, parse_duration_seconds, DurationError};
pub use error::CurveError;
pub use keyframe::Keyframe;
pub use reader::{CsvReader, ReadOutcome};
pub use source::{FsResourceLoader, MemoryResourceLoader, ResourceLoader, RowSource, TextEncoding};
pub use tangent::{TangentDirection, TangentMode};

/// Crate-wide result type.
pub type Result<T> = core::result::Result<T, CurveError>;
