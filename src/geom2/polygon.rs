//! Closed polygon utilities: the ray casting containment test used to classify triangulation
//! faces, and shoelace areas.

use crate::geom2::{Aabb2, Point2};
use itertools::Itertools;

/// Returns true if `point` is inside the closed polygon described by `polygon` (the closing edge
/// from the last point back to the first is implicit). This is an even-odd ray casting test with
/// half-open edge spans (`y` strictly above the lower end and at or below the upper end), so a ray
/// passing exactly through a shared vertex is only counted once, and horizontal edges never count.
/// Points exactly on the boundary may be reported either way.
///
/// # Arguments
///
/// * `point`: the point to test
/// * `polygon`: the ordered vertices of the polygon, in either winding
///
/// returns: bool
///
/// # Examples
///
/// ```
/// use foilmesh::geom2::point_in_polygon;
/// use foilmesh::Point2;
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// assert!(point_in_polygon(&Point2::new(0.5, 0.5), &square));
/// assert!(!point_in_polygon(&Point2::new(2.0, 2.0), &square));
/// ```
pub fn point_in_polygon(point: &Point2, polygon: &[Point2]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let (x, y) = (point.x, point.y);
    let mut inside = false;
    for (p1, p2) in polygon.iter().circular_tuple_windows() {
        if y > p1.y.min(p2.y) && y <= p1.y.max(p2.y) && x <= p1.x.max(p2.x) {
            // The span test above already excludes horizontal edges
            let crosses = if p1.x == p2.x {
                true
            } else {
                let x_cross = (y - p1.y) * (p2.x - p1.x) / (p2.y - p1.y) + p1.x;
                x <= x_cross
            };
            if crosses {
                inside = !inside;
            }
        }
    }

    inside
}

/// Returns the signed area of the closed polygon by the shoelace formula. The area is positive for
/// counter-clockwise winding and negative for clockwise winding.
pub fn polygon_signed_area(polygon: &[Point2]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let twice: f64 = polygon
        .iter()
        .circular_tuple_windows()
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();
    twice * 0.5
}

/// Returns the unsigned area enclosed by the closed polygon.
pub fn polygon_area(polygon: &[Point2]) -> f64 {
    polygon_signed_area(polygon).abs()
}

/// Returns the unsigned area of the triangle `a`, `b`, `c`.
pub fn triangle_area(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    0.5 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)).abs()
}

/// A closed polygon with a cached bounding box, used when the same boundary is tested against
/// many points. The bounding box rejects most outside points before the ray cast runs.
#[derive(Debug, Clone)]
pub struct Polygon {
    points: Vec<Point2>,
    aabb: Aabb2,
}

impl Polygon {
    pub fn new(points: Vec<Point2>) -> Self {
        let mut mins = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut maxs = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &points {
            mins.x = mins.x.min(p.x);
            mins.y = mins.y.min(p.y);
            maxs.x = maxs.x.max(p.x);
            maxs.y = maxs.y.max(p.y);
        }
        Self {
            points,
            aabb: Aabb2::new(mins, maxs),
        }
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Ray casting containment test, identical in result to `point_in_polygon`.
    pub fn contains(&self, point: &Point2) -> bool {
        let (mins, maxs) = (self.aabb.mins, self.aabb.maxs);
        if point.x < mins.x || point.x > maxs.x || point.y < mins.y || point.y > maxs.y {
            return false;
        }
        point_in_polygon(point, &self.points)
    }
}
