//! Ply thickness rules and their evaluation over the points of a curve.

use crate::common::TolZone;
use crate::common::interp::LinearTable;
use crate::common::points::cumulative_lengths;
use crate::geom2::Point2;
use crate::{MeshError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// A named per-point coordinate which a thickness rule can be expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coordinate {
    /// The x coordinate of the point
    X,

    /// The y coordinate of the point
    Y,

    /// Absolute arc length from the first point of the curve
    Ta,

    /// Arc length relative to the total length of the curve, from 0 to 1
    Tr,

    /// The x coordinate relative to the x extent of the curve, from 0 at the minimum to 1 at the
    /// maximum
    Xr,
}

/// The per-point coordinate arrays of a curve, computed once and shared by every thickness rule
/// evaluated against that curve.
#[derive(Debug, Clone)]
pub struct CoordinateBundle {
    x: Vec<f64>,
    y: Vec<f64>,
    ta: Vec<f64>,
    tr: Vec<f64>,
    xr: Vec<f64>,
}

impl CoordinateBundle {
    pub fn from_points(points: &[Point2]) -> Self {
        let x = points.iter().map(|p| p.x).collect::<Vec<_>>();
        let y = points.iter().map(|p| p.y).collect::<Vec<_>>();
        let ta = cumulative_lengths(points);
        let total = ta.last().copied().unwrap_or(0.0);
        let tr = ta
            .iter()
            .map(|t| if total > 0.0 { t / total } else { 0.0 })
            .collect();

        let x_min = x.iter().copied().fold(f64::INFINITY, f64::min);
        let x_max = x.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = x_max - x_min;
        let xr = x
            .iter()
            .map(|v| if span > 0.0 { (v - x_min) / span } else { 0.0 })
            .collect();

        Self { x, y, ta, tr, xr }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn get(&self, coordinate: Coordinate) -> &[f64] {
        match coordinate {
            Coordinate::X => &self.x,
            Coordinate::Y => &self.y,
            Coordinate::Ta => &self.ta,
            Coordinate::Tr => &self.tr,
            Coordinate::Xr => &self.xr,
        }
    }
}

/// One entry of a `Thickness::Conditions` rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub range: TolZone,
    pub value: f64,
}

/// A rule producing one thickness value for every point of a curve. In JSON the rule is an
/// object tagged by `"type"`, or a bare number for a constant thickness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Thickness {
    /// The same thickness at every point
    Constant { value: f64 },

    /// Linear interpolation of `fp` over the breakpoints `xp` against a coordinate, clamped to
    /// the end values outside of the breakpoints
    Interp {
        coordinate: Coordinate,
        xp: Vec<f64>,
        fp: Vec<f64>,
    },

    /// `value` where the coordinate lies within `range` (bounds included), `else_value`
    /// everywhere else
    Conditional {
        coordinate: Coordinate,
        range: TolZone,
        value: f64,
        else_value: f64,
    },

    /// The value of the first condition whose range contains the coordinate, or `default` when
    /// none do
    Conditions {
        coordinate: Coordinate,
        conditions: Vec<Condition>,
        default: f64,
    },

    /// An explicit thickness for every point, which must match the point count exactly
    Array { values: Vec<f64> },
}

impl Thickness {
    pub fn constant(value: f64) -> Self {
        Thickness::Constant { value }
    }

    /// Evaluate the rule at every point of the bundle, returning one thickness per point.
    ///
    /// # Arguments
    ///
    /// * `bundle`: the coordinate arrays of the curve the thickness applies to
    ///
    /// returns: Result<Vec<f64, Global>, MeshError>
    ///
    /// # Examples
    ///
    /// ```
    /// use foilmesh::section::{CoordinateBundle, Coordinate, Thickness};
    /// use foilmesh::Point2;
    /// let points = [Point2::new(0.0, 0.0), Point2::new(1.0, 0.0), Point2::new(2.0, 0.0)];
    /// let bundle = CoordinateBundle::from_points(&points);
    /// let rule = Thickness::Interp { coordinate: Coordinate::Tr, xp: vec![0.0, 1.0], fp: vec![0.0, 0.2] };
    /// let values = rule.evaluate(&bundle).unwrap();
    /// assert_eq!(values, vec![0.0, 0.1, 0.2]);
    /// ```
    pub fn evaluate(&self, bundle: &CoordinateBundle) -> Result<Vec<f64>> {
        let n = bundle.len();
        match self {
            Thickness::Constant { value } => Ok(vec![*value; n]),
            Thickness::Interp { coordinate, xp, fp } => {
                let table = LinearTable::try_new(xp, fp)?;
                Ok(bundle.get(*coordinate).iter().map(|v| table.at(*v)).collect())
            }
            Thickness::Conditional {
                coordinate,
                range,
                value,
                else_value,
            } => Ok(bundle
                .get(*coordinate)
                .iter()
                .map(|v| if range.contains(*v) { *value } else { *else_value })
                .collect()),
            Thickness::Conditions {
                coordinate,
                conditions,
                default,
            } => Ok(bundle
                .get(*coordinate)
                .iter()
                .map(|v| {
                    conditions
                        .iter()
                        .find(|c| c.range.contains(*v))
                        .map(|c| c.value)
                        .unwrap_or(*default)
                })
                .collect()),
            Thickness::Array { values } => {
                if values.len() != n {
                    return Err(MeshError::length_mismatch(
                        "array thickness",
                        n,
                        values.len(),
                    ));
                }
                Ok(values.clone())
            }
        }
    }
}

impl From<f64> for Thickness {
    fn from(value: f64) -> Self {
        Thickness::constant(value)
    }
}

/// Deserializes a thickness given either as a bare number or as a tagged rule object
pub(crate) fn number_or_rule<'de, D>(deserializer: D) -> std::result::Result<Thickness, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Value(f64),
        Rule(Thickness),
    }

    Ok(match Repr::deserialize(deserializer)? {
        Repr::Value(value) => Thickness::constant(value),
        Repr::Rule(rule) => rule,
    })
}
