//! Time/value rows to curves.
//!
//! Three build operations, kept distinct because they disagree on key count
//! and tangents for the same input:
//! - [`build_linear_segments`]: one two-key linear segment per consecutive
//!   pair, concatenated. Shared boundaries yield two keys at the same time.
//! - [`build_linear_single_pass`]: one key per row, linear tangents.
//! - [`build_smooth`]: one key per row, auto-smoothed tangents.
//!
//! Row times are durations converted through milliseconds (`ms / 1000`), row
//! values are divided by [`CurveConfig::value_divisor`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::columns::{ColumnSet, ConvertFailed, CsvRecord};
use crate::config::{Config, CurveConfig, CurveMode, ReaderConfig};
use crate::curve::Curve;
use crate::duration::parse_duration_seconds;
use crate::error::CurveError;
use crate::keyframe::Keyframe;
use crate::reader::{CsvReader, ReadOutcome};
use crate::source::{ResourceLoader, RowSource};
use crate::tangent::TangentMode;
use crate::Result;

/// Two-column row: `time` as a duration string, `value` as an integer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TimeValueRow {
    pub time: String,
    pub value: i32,
}

impl TimeValueRow {
    pub fn new(time: impl Into<String>, value: i32) -> Self {
        Self {
            time: time.into(),
            value,
        }
    }

    /// Process-wide column table, built on first use.
    pub fn shared_columns() -> Arc<ColumnSet<Self>> {
        static COLUMNS: Lazy<Arc<ColumnSet<TimeValueRow>>> =
            Lazy::new(|| Arc::new(TimeValueRow::columns()));
        Arc::clone(&COLUMNS)
    }
}

impl CsvRecord for TimeValueRow {
    fn columns() -> ColumnSet<Self> {
        ColumnSet::builder()
            .column(0, "time", "0:00".to_string(), |r: &mut Self, v| r.time = v)
            .column(1, "value", 0i32, |r: &mut Self, v| r.value = v)
            .build()
    }
}

impl fmt::Display for TimeValueRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "time={}, value={}", self.time, self.value)
    }
}

/// `(seconds, scaled value)` per row. `row` in errors is the 0-based index.
fn points(rows: &[TimeValueRow], cfg: &CurveConfig) -> Result<Vec<(f32, f32)>> {
    rows.iter()
        .enumerate()
        .map(|(row, r)| -> Result<(f32, f32)> {
            let t = parse_duration_seconds(&r.time).map_err(|source| CurveError::RowTime {
                row,
                raw: r.time.clone(),
                source,
            })?;
            Ok((t, r.value as f32 / cfg.value_divisor))
        })
        .collect()
}

/// Concatenated two-point segments. Fewer than two rows give an empty curve.
pub fn build_linear_segments(rows: &[TimeValueRow], cfg: &CurveConfig) -> Result<Curve> {
    if rows.len() < 2 {
        return Ok(Curve::new());
    }
    let pts = points(rows, cfg)?;
    let mut keys = Vec::with_capacity(2 * (pts.len() - 1));
    for pair in pts.windows(2) {
        let ((t0, v0), (t1, v1)) = (pair[0], pair[1]);
        keys.extend(Curve::linear(t0, v0, t1, v1).into_keys());
    }
    Ok(Curve::from_keys(keys))
}

/// One linear key per row; each side's tangent is its adjacent segment slope.
pub fn build_linear_single_pass(rows: &[TimeValueRow], cfg: &CurveConfig) -> Result<Curve> {
    let mut curve = Curve::new();
    for (t, v) in points(rows, cfg)? {
        curve.add_key(Keyframe::with_mode(t, v, TangentMode::Linear));
    }
    curve.linear_tangents();
    Ok(curve)
}

/// One key per row with default mode bits and auto-smoothed tangents.
pub fn build_smooth(rows: &[TimeValueRow], cfg: &CurveConfig) -> Result<Curve> {
    let mut curve = Curve::new();
    for (t, v) in points(rows, cfg)? {
        curve.add_key(Keyframe::new(t, v));
    }
    curve.smooth_tangents();
    Ok(curve)
}

pub fn build_curve(rows: &[TimeValueRow], cfg: &CurveConfig) -> Result<Curve> {
    match cfg.mode {
        CurveMode::LinearSegments => build_linear_segments(rows, cfg),
        CurveMode::LinearSinglePass => build_linear_single_pass(rows, cfg),
        CurveMode::Smooth => build_smooth(rows, cfg),
    }
}

/// Read every row of `id` with the shared [`TimeValueRow`] column table.
pub fn read_time_value_rows<L>(
    loader: &L,
    id: &str,
    cfg: &ReaderConfig,
) -> Result<ReadOutcome<TimeValueRow>>
where
    L: ResourceLoader + ?Sized,
{
    let source = RowSource::open(loader, id, cfg.skip_header, cfg.encoding)?;
    let reader = CsvReader::with_columns(source, TimeValueRow::shared_columns(), cfg.delimiter);
    let outcome = reader.read_all();
    for record in &outcome.records {
        log::trace!("{record}");
    }
    Ok(outcome)
}

/// Holds the rows of the last read and builds curves from them.
#[derive(Clone, Debug, Default)]
pub struct CurveCreator {
    config: Config,
    rows: Vec<TimeValueRow>,
    failures: Vec<ConvertFailed>,
}

impl CurveCreator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            rows: Vec::new(),
            failures: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace the held rows with the contents of `id`. Returns the row count.
    pub fn read<L>(&mut self, loader: &L, id: &str) -> Result<usize>
    where
        L: ResourceLoader + ?Sized,
    {
        let outcome = read_time_value_rows(loader, id, &self.config.reader)?;
        self.rows = outcome.records;
        self.failures = outcome.failures;
        Ok(self.rows.len())
    }

    pub fn rows(&self) -> &[TimeValueRow] {
        &self.rows
    }

    pub fn failures(&self) -> &[ConvertFailed] {
        &self.failures
    }

    pub fn create_linear_curve(&self) -> Result<Curve> {
        build_linear_segments(&self.rows, &self.config.curve)
    }

    pub fn create_linear_single_pass_curve(&self) -> Result<Curve> {
        build_linear_single_pass(&self.rows, &self.config.curve)
    }

    pub fn create_smooth_curve(&self) -> Result<Curve> {
        build_smooth(&self.rows, &self.config.curve)
    }

    /// Build with the configured [`CurveMode`].
    pub fn create_curve(&self) -> Result<Curve> {
        build_curve(&self.rows, &self.config.curve)
    }

    /// Read `id`, then build with the configured mode.
    pub fn create<L>(&mut self, loader: &L, id: &str) -> Result<Curve>
    where
        L: ResourceLoader + ?Sized,
    {
        self.read(loader, id)?;
        self.create_curve()
    }
}
