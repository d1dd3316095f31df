//! Designer-tunable fade curves
//!
//! A curve is a list of `(time, value)` keys with flat tangents: between two
//! keys the value follows a smoothstep, outside the key range it holds the
//! nearest end value.

use crate::error::{HyperzoomError, Result};

/// A single curve key
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

/// Piecewise curve sampled at the zoom value
#[derive(Debug, Clone, PartialEq)]
pub struct FadeCurve {
    keys: Vec<CurveKey>,
}

impl FadeCurve {
    /// Builds a curve from `[time, value]` pairs
    ///
    /// Keys must be non-empty, finite and strictly increasing in time.
    pub fn from_keys(name: &str, keys: &[[f32; 2]]) -> Result<Self> {
        if keys.is_empty() {
            return Err(HyperzoomError::InvalidCurve {
                name: name.to_string(),
                reason: "no keys".to_string(),
            });
        }
        if let Some(key) = keys.iter().find(|k| !(k[0].is_finite() && k[1].is_finite())) {
            return Err(HyperzoomError::InvalidCurve {
                name: name.to_string(),
                reason: format!("key [{}, {}] is not finite", key[0], key[1]),
            });
        }
        if let Some(pair) = keys.windows(2).find(|pair| pair[1][0] <= pair[0][0]) {
            return Err(HyperzoomError::InvalidCurve {
                name: name.to_string(),
                reason: format!("key at {} does not follow key at {}", pair[1][0], pair[0][0]),
            });
        }

        Ok(Self {
            keys: keys
                .iter()
                .map(|&[time, value]| CurveKey { time, value })
                .collect(),
        })
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// Sample the curve at `t`; a NaN `t` reads as the first key
    pub fn evaluate(&self, t: f32) -> f32 {
        let (first, last) = match (self.keys.first(), self.keys.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return 0.0,
        };
        if t.is_nan() || t <= first.time {
            return first.value;
        }
        if t >= last.time {
            return last.value;
        }

        // First key strictly after t; t > first.time so index >= 1
        let upper = self.keys.partition_point(|k| k.time <= t);
        let a = self.keys[upper - 1];
        let b = self.keys[upper];

        let u = (t - a.time) / (b.time - a.time);
        let eased = u * u * (3.0 - 2.0 * u);
        a.value + (b.value - a.value) * eased
    }
}
