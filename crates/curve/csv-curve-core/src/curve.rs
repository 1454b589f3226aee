//! Ordered keyframe list and tangent helpers.

use serde::{Deserialize, Serialize};

use crate::keyframe::Keyframe;

/// Keyframes ordered by time.
///
/// [`Curve::add_key`] keeps times unique (a key at an existing time replaces
/// it). [`Curve::from_keys`] only sorts, so duplicate times survive there.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<Keyframe>,
}

#[inline]
fn slope(a: &Keyframe, b: &Keyframe) -> f32 {
    let dt = b.time - a.time;
    if dt > 0.0 {
        (b.value - a.value) / dt
    } else {
        0.0
    }
}

impl Curve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stable sort by time; equal times keep their input order.
    pub fn from_keys(keys: impl Into<Vec<Keyframe>>) -> Self {
        let mut keys = keys.into();
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self { keys }
    }

    /// Straight segment from `(t0, v0)` to `(t1, v1)`.
    ///
    /// Two keys whose inner tangents are the segment slope and whose outer
    /// tangents are zero. Equal times give a single key at `(t0, v0)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        if t0 == t1 {
            return Self {
                keys: vec![Keyframe::new(t0, v0)],
            };
        }
        let tangent = (v1 - v0) / (t1 - t0);
        Self::from_keys(vec![
            Keyframe::with_tangents(t0, v0, 0.0, tangent),
            Keyframe::with_tangents(t1, v1, tangent, 0.0),
        ])
    }

    /// Insert in time order; replaces a key at the same time. Returns the index.
    pub fn add_key(&mut self, key: Keyframe) -> usize {
        match self
            .keys
            .binary_search_by(|probe| probe.time.total_cmp(&key.time))
        {
            Ok(i) => {
                self.keys[i] = key;
                i
            }
            Err(i) => {
                self.keys.insert(i, key);
                i
            }
        }
    }

    pub fn keys(&self) -> &[Keyframe] {
        &self.keys
    }

    pub fn into_keys(self) -> Vec<Keyframe> {
        self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Time of the last key minus time of the first; 0 when empty.
    pub fn duration(&self) -> f32 {
        match (self.keys.first(), self.keys.last()) {
            (Some(a), Some(b)) => b.time - a.time,
            _ => 0.0,
        }
    }

    /// Interior keys take the slope between their neighbours; end keys are flat.
    pub fn smooth_tangents(&mut self) {
        let n = self.keys.len();
        for i in 0..n {
            let t = if i == 0 || i + 1 == n {
                0.0
            } else {
                slope(&self.keys[i - 1], &self.keys[i + 1])
            };
            self.keys[i].in_tangent = t;
            self.keys[i].out_tangent = t;
        }
    }

    /// Each side takes the slope of its adjacent segment; outer sides are zero.
    pub fn linear_tangents(&mut self) {
        let n = self.keys.len();
        for i in 0..n {
            let in_t = if i == 0 {
                0.0
            } else {
                slope(&self.keys[i - 1], &self.keys[i])
            };
            let out_t = if i + 1 == n {
                0.0
            } else {
                slope(&self.keys[i], &self.keys[i + 1])
            };
            self.keys[i].in_tangent = in_t;
            self.keys[i].out_tangent = out_t;
        }
    }
}
