//! Field converters: raw text to a member's declared type.
//!
//! [`FromField`] is the per-type converter consulted by column setters.
//! Numeric and boolean conversions ignore surrounding whitespace; `String`
//! keeps the field verbatim.

use thiserror::Error;

/// A field that could not be converted to its target type.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("cannot convert {raw:?} to {target}: {reason}")]
pub struct ConvertError {
    pub raw: String,
    pub target: &'static str,
    pub reason: String,
}

impl ConvertError {
    pub fn new(raw: &str, target: &'static str, reason: impl ToString) -> Self {
        Self {
            raw: raw.to_string(),
            target,
            reason: reason.to_string(),
        }
    }
}

/// Conversion from one raw field.
pub trait FromField: Sized {
    fn from_field(raw: &str) -> Result<Self, ConvertError>;
}

impl FromField for String {
    fn from_field(raw: &str) -> Result<Self, ConvertError> {
        Ok(raw.to_string())
    }
}

impl FromField for bool {
    fn from_field(raw: &str) -> Result<Self, ConvertError> {
        let t = raw.trim();
        if t.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if t.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(ConvertError::new(raw, "bool", "expected 'true' or 'false'"))
        }
    }
}

impl FromField for char {
    fn from_field(raw: &str) -> Result<Self, ConvertError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(ConvertError::new(raw, "char", "expected exactly one character")),
        }
    }
}

impl<V: FromField> FromField for Option<V> {
    fn from_field(raw: &str) -> Result<Self, ConvertError> {
        if raw.trim().is_empty() {
            Ok(None)
        } else {
            V::from_field(raw).map(Some)
        }
    }
}

macro_rules! from_str_field {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromField for $ty {
                fn from_field(raw: &str) -> Result<Self, ConvertError> {
                    raw.trim()
                        .parse::<$ty>()
                        .map_err(|e| ConvertError::new(raw, stringify!($ty), e))
                }
            }
        )*
    };
}

from_str_field!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
