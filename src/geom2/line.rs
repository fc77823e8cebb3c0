use crate::common::points::cumulative_lengths;
use crate::common::{Resample, linear_space};
use crate::geom2::Point2;
use crate::{MeshError, Result};

/// Discretizes the straight line from `p1` to `p2` into `n_elements` equal elements, returning the
/// `n_elements + 1` points including both ends.
///
/// # Arguments
///
/// * `p1`: the start of the line
/// * `p2`: the end of the line
/// * `n_elements`: the number of elements, at least one
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, MeshError>
///
/// # Examples
///
/// ```
/// use foilmesh::geom2::create_line_mesh;
/// use foilmesh::Point2;
/// let points = create_line_mesh(&Point2::new(0.0, 0.0), &Point2::new(1.0, 0.0), 3).unwrap();
/// assert_eq!(points.len(), 4);
/// ```
pub fn create_line_mesh(p1: &Point2, p2: &Point2, n_elements: usize) -> Result<Vec<Point2>> {
    if n_elements == 0 {
        return Err(MeshError::not_enough_points("line mesh elements", 1, 0));
    }

    let mut points = Vec::with_capacity(n_elements + 1);
    points.push(*p1);
    for i in 1..n_elements {
        let t = i as f64 / n_elements as f64;
        points.push(p1 + (p2 - p1) * t);
    }
    points.push(*p2);
    Ok(points)
}

/// Resamples a closed contour by arc length around its full perimeter (including the implicit
/// closing edge). The first output point is the first input point, and the remaining points are
/// evenly spaced along the perimeter in the original direction of travel.
///
/// # Arguments
///
/// * `points`: the ordered points of the closed contour, at least three
/// * `mode`: how the new spacing is chosen
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, MeshError>
pub fn resample_closed(points: &[Point2], mode: Resample) -> Result<Vec<Point2>> {
    if points.len() < 3 {
        return Err(MeshError::not_enough_points(
            "resampled contour",
            3,
            points.len(),
        ));
    }

    match mode {
        Resample::BySpacing(d) | Resample::ByMaxSpacing(d) if !d.is_finite() || d <= 0.0 => {
            return Err(MeshError::InvalidSpacing(d));
        }
        _ => {}
    }

    let mut chain = points.to_vec();
    chain.push(points[0]);
    let lengths = cumulative_lengths(&chain);
    let perimeter = lengths[lengths.len() - 1];

    let count = match mode {
        Resample::ByCount(n) => n,
        Resample::BySpacing(d) => (perimeter / d).floor() as usize,
        Resample::ByMaxSpacing(d) => (perimeter / d).ceil() as usize,
    };
    if count < 3 {
        return Err(MeshError::not_enough_points("resampled contour", 3, count));
    }

    let spacing = match mode {
        Resample::BySpacing(d) => d,
        _ => perimeter / count as f64,
    };

    // The last station would land on the closing point, so it is excluded
    let stations = linear_space(0.0, spacing * count as f64, count + 1);
    let mut result = Vec::with_capacity(count);
    for s in stations.iter().take(count) {
        let k = lengths.partition_point(|&l| l <= *s).clamp(1, lengths.len() - 1);
        let (l0, l1) = (lengths[k - 1], lengths[k]);
        let f = if l1 > l0 { (s - l0) / (l1 - l0) } else { 0.0 };
        result.push(chain[k - 1] + (chain[k] - chain[k - 1]) * f);
    }

    Ok(result)
}
