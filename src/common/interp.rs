//! Piecewise linear interpolation over a table of breakpoints, clamped to the end values outside
//! of the table's domain.

use crate::{MeshError, Result};

/// A validated table of breakpoints and values for piecewise linear interpolation. Breakpoints
/// are non-decreasing, finite, and there is exactly one value per breakpoint.
#[derive(Debug, Clone)]
pub struct LinearTable<'a> {
    xp: &'a [f64],
    fp: &'a [f64],
}

impl<'a> LinearTable<'a> {
    /// Validate the breakpoints and values, returning an error describing the first problem
    /// found.
    ///
    /// # Arguments
    ///
    /// * `xp`: the breakpoints, which must be finite and non-decreasing
    /// * `fp`: the values at each breakpoint
    ///
    /// returns: Result<LinearTable, MeshError>
    pub fn try_new(xp: &'a [f64], fp: &'a [f64]) -> Result<Self> {
        if xp.is_empty() {
            return Err(MeshError::InvalidThickness(
                "interpolation table has no breakpoints".to_string(),
            ));
        }
        if xp.len() != fp.len() {
            return Err(MeshError::InvalidThickness(format!(
                "interpolation table has {} breakpoints but {} values",
                xp.len(),
                fp.len()
            )));
        }
        if xp.iter().chain(fp.iter()).any(|v| !v.is_finite()) {
            return Err(MeshError::InvalidThickness(
                "interpolation table contains non-finite entries".to_string(),
            ));
        }
        if xp.windows(2).any(|w| w[1] < w[0]) {
            return Err(MeshError::InvalidThickness(
                "interpolation breakpoints must be in ascending order".to_string(),
            ));
        }

        Ok(Self { xp, fp })
    }

    /// Evaluate the table at `x`. Values left of the first breakpoint take the first value,
    /// values right of the last breakpoint take the last value. Where breakpoints repeat (a step
    /// in the profile), the value right of the step is used for `x` exactly at the step.
    pub fn at(&self, x: f64) -> f64 {
        // Index of the first breakpoint strictly greater than x
        let k = self.xp.partition_point(|&b| b <= x);
        if k == 0 {
            return self.fp[0];
        }
        if k == self.xp.len() {
            return self.fp[k - 1];
        }

        let (x0, x1) = (self.xp[k - 1], self.xp[k]);
        let (f0, f1) = (self.fp[k - 1], self.fp[k]);
        f0 + (f1 - f0) * (x - x0) / (x1 - x0)
    }
}
