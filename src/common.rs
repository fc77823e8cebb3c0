pub mod interp;
pub mod points;
mod tolerance_zone;

pub use tolerance_zone::TolZone;

/// How a curve is resampled by arc length
#[derive(Debug, Clone, Copy)]
pub enum Resample {
    /// A fixed number of points spread evenly over the curve
    ByCount(usize),

    /// A fixed spacing between points. When the spacing does not divide the curve length the
    /// remainder is left at the end.
    BySpacing(f64),

    /// The fewest evenly spaced points whose spacing does not exceed the given value
    ByMaxSpacing(f64),
}

/// `count` evenly spaced values from `start` to `end`, both ends included.
///
/// # Arguments
///
/// * `start`: the first value
/// * `end`: the last value
/// * `count`: how many values to produce
///
/// returns: Vec<f64, Global>
///
/// # Examples
///
/// ```
/// use foilmesh::common::linear_space;
/// let domain = linear_space(0.0, 1.0, 3);
/// assert_eq!(domain, vec![0.0, 0.5, 1.0]);
/// ```
pub fn linear_space(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count < 2 {
        return vec![start; count];
    }
    let mut result = Vec::with_capacity(count);
    let step = (end - start) / (count - 1) as f64;
    for i in 0..count {
        result.push(start + i as f64 * step);
    }
    result
}
