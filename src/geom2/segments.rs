//! Segment-segment predicates. Orientation tests use adaptive exact arithmetic so that the
//! intersection decision is consistent for nearly collinear configurations, which are common when
//! offset curves fold back over themselves.

use crate::geom2::{Point2, Vector2};
use robust::{Coord, orient2d};

/// Orientation of `c` relative to the directed line `a -> b`: positive if counter-clockwise,
/// negative if clockwise, exactly zero if collinear.
fn orientation(a: &Point2, b: &Point2, c: &Point2) -> f64 {
    orient2d(
        Coord { x: a.x, y: a.y },
        Coord { x: b.x, y: b.y },
        Coord { x: c.x, y: c.y },
    )
}

/// For a point `p` already known to be collinear with `a` and `b`, returns true if it lies within
/// the closed segment between them.
fn within_collinear(a: &Point2, b: &Point2, p: &Point2) -> bool {
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}

fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}

/// Returns true if the closed segments `a1-a2` and `b1-b2` share at least one point. Proper
/// crossings, an endpoint touching the other segment, shared endpoints, and collinear overlaps
/// all count as intersecting.
///
/// # Arguments
///
/// * `a1`: first endpoint of segment a
/// * `a2`: second endpoint of segment a
/// * `b1`: first endpoint of segment b
/// * `b2`: second endpoint of segment b
///
/// returns: bool
///
/// # Examples
///
/// ```
/// use foilmesh::geom2::segments_intersect;
/// use foilmesh::Point2;
/// let hit = segments_intersect(
///     &Point2::new(0.0, 0.0),
///     &Point2::new(1.0, 1.0),
///     &Point2::new(0.0, 1.0),
///     &Point2::new(1.0, 0.0),
/// );
/// assert!(hit);
/// ```
pub fn segments_intersect(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> bool {
    let d1 = orientation(b1, b2, a1);
    let d2 = orientation(b1, b2, a2);
    let d3 = orientation(a1, a2, b1);
    let d4 = orientation(a1, a2, b2);

    if ((d1 > 0.0 && d2 < 0.0) || (d1 < 0.0 && d2 > 0.0))
        && ((d3 > 0.0 && d4 < 0.0) || (d3 < 0.0 && d4 > 0.0))
    {
        return true;
    }

    (d1 == 0.0 && within_collinear(b1, b2, a1))
        || (d2 == 0.0 && within_collinear(b1, b2, a2))
        || (d3 == 0.0 && within_collinear(a1, a2, b1))
        || (d4 == 0.0 && within_collinear(a1, a2, b2))
}

/// Returns the single point where segments `a1-a2` and `b1-b2` meet, or `None` if they do not
/// meet or if they are parallel (collinear overlaps have no single intersection point).
///
/// # Arguments
///
/// * `a1`: first endpoint of segment a
/// * `a2`: second endpoint of segment a
/// * `b1`: first endpoint of segment b
/// * `b2`: second endpoint of segment b
///
/// returns: Option<OPoint<f64, Const<2>>>
pub fn segment_intersection(a1: &Point2, a2: &Point2, b1: &Point2, b2: &Point2) -> Option<Point2> {
    if !segments_intersect(a1, a2, b1, b2) {
        return None;
    }

    let r = a2 - a1;
    let s = b2 - b1;
    let denom = cross(&r, &s);
    if denom == 0.0 {
        return None;
    }

    // Touching endpoints are returned exactly rather than through the parametric form
    for p in [a1, a2] {
        if orientation(b1, b2, p) == 0.0 {
            return Some(*p);
        }
    }
    for p in [b1, b2] {
        if orientation(a1, a2, p) == 0.0 {
            return Some(*p);
        }
    }

    let t = (cross(&(b1 - a1), &s) / denom).clamp(0.0, 1.0);
    Some(a1 + r * t)
}
