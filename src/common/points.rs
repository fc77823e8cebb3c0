//! Common operations on f64 points in D-dimensional space.

use parry2d_f64::na::{Point, SVector};

/// Returns the distance between two points in D-dimensional space.
///
/// # Arguments
///
/// * `a`: the first point
/// * `b`: the second point
///
/// returns: f64
///
/// # Examples
///
/// ```
/// use foilmesh::common::points::dist;
/// use foilmesh::Point2;
/// let a = Point2::new(1.0, 2.0);
/// let b = Point2::new(3.0, 2.0);
/// let d = dist(&a, &b);
/// assert_eq!(d, 2.0);
/// ```
pub fn dist<const D: usize>(a: &Point<f64, D>, b: &Point<f64, D>) -> f64 {
    (a - b).norm()
}

/// Returns the mean point of a set of points in D-dimensional space.  The mean is found by summing
/// the coordinates of all points and dividing by the number of points.  There is no weighting of
/// the points in this calculation.
///
/// # Arguments
///
/// * `points`: a slice of points to compute the mean of
///
/// returns: OPoint<f64, Const<{ D }>>
///
/// # Examples
///
/// ```
/// use foilmesh::common::points::mean_point;
/// use foilmesh::Point2;
/// let points = vec![Point2::new(1.0, 2.0), Point2::new(3.0, 4.0), Point2::new(5.0, 6.0)];
/// let mean = mean_point(&points);
/// assert_eq!(mean, Point2::new(3.0, 4.0));
/// ```
pub fn mean_point<const D: usize>(points: &[Point<f64, D>]) -> Point<f64, D> {
    let mut sum = SVector::<f64, D>::zeros();
    for p in points {
        sum += p.coords;
    }
    Point::<f64, D>::from(sum / points.len() as f64)
}

/// Returns the cumulative length along an ordered chain of points, starting at zero for the first
/// point. The returned vec has the same length as `points`.
///
/// # Arguments
///
/// * `points`: the ordered points of an open chain
///
/// returns: Vec<f64, Global>
pub fn cumulative_lengths<const D: usize>(points: &[Point<f64, D>]) -> Vec<f64> {
    let mut lengths = Vec::with_capacity(points.len());
    let mut total = 0.0;
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            total += dist(&points[i - 1], p);
        }
        lengths.push(total);
    }
    lengths
}
