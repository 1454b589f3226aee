//! Keyframe: one control point of a curve with packed tangent modes.

use serde::{Deserialize, Serialize};

use crate::tangent::{self, TangentDirection, TangentMode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    /// Seconds.
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
    /// Packed modes, see [`crate::tangent`] for the layout.
    pub tangent_mode: i32,
}

impl Keyframe {
    /// Key with zero tangents and an all-clear mode field.
    #[inline]
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_tangents(time: f32, value: f32, in_tangent: f32, out_tangent: f32) -> Self {
        Self {
            time,
            value,
            in_tangent,
            out_tangent,
            tangent_mode: 0,
        }
    }

    /// Same mode on both sides.
    pub fn with_mode(time: f32, value: f32, mode: TangentMode) -> Self {
        Self::with_modes(time, value, mode, mode)
    }

    /// Broken key with explicit left/right modes. A stepped side gets an
    /// infinite tangent.
    pub fn with_modes(time: f32, value: f32, left: TangentMode, right: TangentMode) -> Self {
        let mut key = Self::new(time, value);
        key.set_broken(true);
        key.set_tangent_mode(TangentDirection::Left, left);
        key.set_tangent_mode(TangentDirection::Right, right);
        if left == TangentMode::Stepped {
            key.in_tangent = f32::INFINITY;
        }
        if right == TangentMode::Stepped {
            key.out_tangent = f32::INFINITY;
        }
        key
    }

    pub fn set_tangent_mode(&mut self, direction: TangentDirection, mode: TangentMode) {
        self.tangent_mode = tangent::encode(self.tangent_mode, direction, mode);
    }

    #[inline]
    pub fn tangent_mode(&self, direction: TangentDirection) -> TangentMode {
        tangent::decode(self.tangent_mode, direction)
    }

    #[inline]
    pub fn left_mode(&self) -> TangentMode {
        self.tangent_mode(TangentDirection::Left)
    }

    #[inline]
    pub fn right_mode(&self) -> TangentMode {
        self.tangent_mode(TangentDirection::Right)
    }

    pub fn set_broken(&mut self, broken: bool) {
        self.tangent_mode = tangent::set_broken(self.tangent_mode, broken);
    }

    #[inline]
    pub fn is_broken(&self) -> bool {
        tangent::is_broken(self.tangent_mode)
    }
}
