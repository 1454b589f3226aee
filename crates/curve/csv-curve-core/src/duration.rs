//! Duration strings to milliseconds.
//!
//! Accepted forms:
//! - `M:SS[.fff]`      two components, minutes and seconds
//! - `H:MM:SS[.fff]`   three components, hours, minutes and seconds
//!
//! The leading component is unbounded; the others must be below 60. Only the
//! seconds component may carry a fraction (up to 7 digits). Seconds for
//! keyframes are always derived as `total_ms / 1000`.

use thiserror::Error;

const MAX_FRACTION_DIGITS: usize = 7;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DurationError {
    #[error("empty duration")]
    Empty,
    #[error("expected 2 or 3 ':'-separated components, found {0}")]
    ComponentCount(usize),
    #[error("component {component} ({text:?}) is not a number")]
    NotANumber { component: &'static str, text: String },
    #[error("component {component} = {value} must be below 60")]
    OutOfRange { component: &'static str, value: u64 },
    #[error("fraction {0:?} is invalid")]
    Fraction(String),
}

fn whole(component: &'static str, text: &str) -> Result<u64, DurationError> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DurationError::NotANumber {
            component,
            text: text.to_string(),
        });
    }
    text.parse().map_err(|_| DurationError::NotANumber {
        component,
        text: text.to_string(),
    })
}

fn bounded(component: &'static str, text: &str) -> Result<u64, DurationError> {
    let value = whole(component, text)?;
    if value >= 60 {
        return Err(DurationError::OutOfRange { component, value });
    }
    Ok(value)
}

/// Seconds component as milliseconds, fraction included.
fn seconds_ms(text: &str) -> Result<f64, DurationError> {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text, None),
    };
    let secs = bounded("seconds", int_part)?;
    let frac_ms = match frac_part {
        None => 0.0,
        Some(f) => {
            if f.is_empty()
                || f.len() > MAX_FRACTION_DIGITS
                || !f.bytes().all(|b| b.is_ascii_digit())
            {
                return Err(DurationError::Fraction(f.to_string()));
            }
            let digits: f64 = f.parse().map_err(|_| DurationError::Fraction(f.to_string()))?;
            digits * 1000.0 / 10f64.powi(f.len() as i32)
        }
    };
    Ok(secs as f64 * 1000.0 + frac_ms)
}

/// Total milliseconds of a duration string.
pub fn parse_duration_ms(s: &str) -> Result<f64, DurationError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DurationError::Empty);
    }
    let parts: Vec<&str> = s.split(':').collect();
    match parts.as_slice() {
        [m, sec] => {
            let minutes = whole("minutes", m)?;
            Ok(minutes as f64 * 60_000.0 + seconds_ms(sec)?)
        }
        [h, m, sec] => {
            let hours = whole("hours", h)?;
            let minutes = bounded("minutes", m)?;
            Ok(hours as f64 * 3_600_000.0 + minutes as f64 * 60_000.0 + seconds_ms(sec)?)
        }
        other => Err(DurationError::ComponentCount(other.len())),
    }
}

/// Keyframe seconds: total milliseconds divided by 1000.
pub fn parse_duration_seconds(s: &str) -> Result<f32, DurationError> {
    Ok((parse_duration_ms(s)? / 1000.0) as f32)
}
