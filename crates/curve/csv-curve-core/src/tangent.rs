//! Tangent-mode bit codec.
//!
//! Layout of the packed field:
//!
//! ```text
//! bit  0     broken (left and right tangents are independent)
//! bits 1-2   left  tangent mode
//! bits 3-4   right tangent mode
//! bits 5..   reserved, never modified
//! ```

use serde::{Deserialize, Serialize};

pub const BROKEN_BIT: i32 = 1;
const SLOT_MASK: i32 = 0b11;
const LEFT_SHIFT: u32 = 1;
const RIGHT_SHIFT: u32 = 3;

/// Interpolation behaviour approaching or leaving a key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum TangentMode {
    /// Free, user-edited tangent.
    #[default]
    Editable = 0,
    Smooth = 1,
    Linear = 2,
    /// `Smooth | Linear`; the tangent is infinite and the value jumps.
    Stepped = 3,
}

impl TangentMode {
    pub const ALL: [TangentMode; 4] = [
        TangentMode::Editable,
        TangentMode::Smooth,
        TangentMode::Linear,
        TangentMode::Stepped,
    ];

    #[inline]
    pub fn bits(self) -> i32 {
        self as i32
    }

    /// Interpret the low two bits of `bits`.
    #[inline]
    pub fn from_bits(bits: i32) -> Self {
        match bits & SLOT_MASK {
            0 => TangentMode::Editable,
            1 => TangentMode::Smooth,
            2 => TangentMode::Linear,
            _ => TangentMode::Stepped,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TangentDirection {
    Left,
    Right,
}

impl TangentDirection {
    /// 0 = left, 1 = right.
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TangentDirection::Left),
            1 => Some(TangentDirection::Right),
            _ => None,
        }
    }

    #[inline]
    fn shift(self) -> u32 {
        match self {
            TangentDirection::Left => LEFT_SHIFT,
            TangentDirection::Right => RIGHT_SHIFT,
        }
    }
}

/// Read one side's mode from a packed field.
#[inline]
pub fn decode(packed: i32, direction: TangentDirection) -> TangentMode {
    TangentMode::from_bits(packed >> direction.shift())
}

/// Write `mode` into `direction`'s slot, leaving every other bit untouched.
///
/// # Panics
/// If the written slot does not read back as `mode`; the layout constants
/// overlap and every key built since is corrupt.
pub fn encode(packed: i32, direction: TangentDirection, mode: TangentMode) -> i32 {
    let shift = direction.shift();
    let out = (packed & !(SLOT_MASK << shift)) | (mode.bits() << shift);
    let read_back = decode(out, direction);
    assert_eq!(
        read_back, mode,
        "tangent slot {direction:?} read back {read_back:?} after writing {mode:?} (packed {out:#b})"
    );
    out
}

#[inline]
pub fn set_broken(packed: i32, broken: bool) -> i32 {
    if broken {
        packed | BROKEN_BIT
    } else {
        packed & !BROKEN_BIT
    }
}

#[inline]
pub fn is_broken(packed: i32) -> bool {
    packed & BROKEN_BIT != 0
}
