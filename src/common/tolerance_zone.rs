//! A closed scalar interval, used to gate conditional thickness rules on a coordinate value.
use crate::{MeshError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct TolZone {
    /// The lower bound of the zone
    pub lower: f64,

    /// The upper bound of the zone
    pub upper: f64,
}

impl TolZone {
    /// Create a new zone, checking that the bounds are valid. Returns an error if the bounds are
    /// not finite or if `lower` > `upper`.
    pub fn new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(MeshError::InvalidThickness(format!(
                "range bounds must be finite, got [{}, {}]",
                lower, upper
            )));
        }
        if lower <= upper {
            Ok(Self { lower, upper })
        } else {
            Err(MeshError::InvalidThickness(format!(
                "range lower bound {} exceeds upper bound {}",
                lower, upper
            )))
        }
    }

    /// Returns true if the given value is within the zone, bounds included
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }
}

impl TryFrom<[f64; 2]> for TolZone {
    type Error = MeshError;

    fn try_from(value: [f64; 2]) -> Result<Self> {
        TolZone::new(value[0], value[1])
    }
}

impl From<TolZone> for [f64; 2] {
    fn from(value: TolZone) -> Self {
        [value.lower, value.upper]
    }
}
