//! Trimming of offset curves and web lines. Every fallback is an explicit `TrimOutcome` so that
//! callers can see why a curve came back unchanged instead of guessing from its length.

use crate::geom2::{Point2, segment_intersection, segments_intersect};
use itertools::Itertools;

/// Why a trimming operation returned its input without modification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnmodifiedReason {
    /// No pair of non-adjacent edges intersect
    NoSelfIntersection,

    /// The line crossed the boundary fewer than two times (the count is attached), so there is
    /// no span to keep
    TooFewCrossings(usize),

    /// Trimming would have left fewer than three points of a closed curve
    WouldCollapse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// The curve was shortened. `passes` is the number of trim passes that removed points, and
    /// `removed` the number of input points that are no longer present.
    Trimmed { passes: usize, removed: usize },

    Unmodified(UnmodifiedReason),
}

/// The points left after a trimming operation and the outcome that produced them
#[derive(Debug, Clone)]
pub struct TrimResult {
    pub points: Vec<Point2>,
    pub outcome: TrimOutcome,
}

impl TrimResult {
    fn unmodified(points: &[Point2], reason: UnmodifiedReason) -> Self {
        Self {
            points: points.to_vec(),
            outcome: TrimOutcome::Unmodified(reason),
        }
    }

    pub fn is_trimmed(&self) -> bool {
        matches!(self.outcome, TrimOutcome::Trimmed { .. })
    }
}

/// Finds the lowest and highest edge index involved in any intersection between non-adjacent
/// open edges of the chain. Edge `i` runs from point `i` to point `i + 1`; the closing edge from
/// the last point back to the first is not tested.
fn intersecting_edge_span(points: &[Point2]) -> Option<(usize, usize)> {
    let n = points.len();
    let mut span: Option<(usize, usize)> = None;
    for i in 0..n.saturating_sub(1) {
        for j in (i + 2)..(n - 1) {
            if segments_intersect(&points[i], &points[i + 1], &points[j], &points[j + 1]) {
                span = Some(match span {
                    Some((lo, hi)) => (lo.min(i), hi.max(j)),
                    None => (i, j),
                });
            }
        }
    }
    span
}

/// Removes the folded "ears" from a closed curve whose offset has turned back over itself.
///
/// Every pair of non-adjacent edges is tested for intersection. When any intersect, the curve is
/// cut down to the points from the far end of the lowest intersecting edge up to the start of the
/// highest intersecting edge, `points[lo + 1..=hi]`. The cut is repeated until no intersections
/// remain, which makes the operation idempotent. Separate clusters of intersections are not
/// treated individually: the kept span always runs from the first to the last intersecting edge,
/// which can discard healthy curve outside of that span.
///
/// If a cut would leave fewer than three points, that cut is abandoned and the curve from the
/// previous pass is returned.
///
/// # Arguments
///
/// * `points`: the ordered points of the closed curve
///
/// returns: TrimResult
pub fn trim_self_intersecting_curve(points: &[Point2]) -> TrimResult {
    let mut current = points.to_vec();
    let mut passes = 0;

    while let Some((lo, hi)) = intersecting_edge_span(&current) {
        if hi - lo < 3 {
            if passes == 0 {
                return TrimResult::unmodified(points, UnmodifiedReason::WouldCollapse);
            }
            break;
        }
        current = current[lo + 1..=hi].to_vec();
        passes += 1;
    }

    if passes == 0 {
        return TrimResult::unmodified(points, UnmodifiedReason::NoSelfIntersection);
    }

    TrimResult {
        outcome: TrimOutcome::Trimmed {
            passes,
            removed: points.len() - current.len(),
        },
        points: current,
    }
}

/// Trims an open line to the span which threads through a closed boundary polygon.
///
/// Every edge of the line is intersected with every edge of the polygon (including the closing
/// edge). With at least two crossings, the crossings are merged with the line's own points, the
/// merged list is ordered by distance from the first point of the line, and the points from the
/// first crossing to the last crossing (both inclusive) are returned. With fewer than two
/// crossings the line is returned unchanged.
///
/// # Arguments
///
/// * `line`: the ordered points of the open line
/// * `polygon`: the ordered points of the closed boundary
///
/// returns: TrimResult
///
/// # Examples
///
/// ```
/// use foilmesh::geom2::trim_line;
/// use foilmesh::Point2;
/// let square = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(1.0, 1.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let line = [Point2::new(0.5, -1.0), Point2::new(0.5, 0.5), Point2::new(0.5, 2.0)];
/// let trimmed = trim_line(&line, &square);
/// assert_eq!(trimmed.points.len(), 3);
/// assert!(trimmed.points[0].y.abs() < 1e-12);
/// assert!((trimmed.points[2].y - 1.0).abs() < 1e-12);
/// ```
pub fn trim_line(line: &[Point2], polygon: &[Point2]) -> TrimResult {
    let mut crossings = Vec::new();
    for (a1, a2) in line.iter().tuple_windows() {
        for (b1, b2) in polygon.iter().circular_tuple_windows() {
            if let Some(p) = segment_intersection(a1, a2, b1, b2) {
                crossings.push(p);
            }
        }
    }

    if crossings.len() < 2 {
        return TrimResult::unmodified(line, UnmodifiedReason::TooFewCrossings(crossings.len()));
    }

    let start = line[0];
    let mut merged = line
        .iter()
        .map(|p| (*p, false))
        .chain(crossings.iter().map(|p| (*p, true)))
        .collect::<Vec<_>>();
    merged.sort_by(|a, b| {
        let da = (a.0 - start).norm();
        let db = (b.0 - start).norm();
        da.total_cmp(&db)
    });

    // At least two crossings were merged, so both ends exist
    let first = merged.iter().position(|(_, c)| *c).unwrap_or(0);
    let last = merged.iter().rposition(|(_, c)| *c).unwrap_or(merged.len() - 1);
    let kept = &merged[first..=last];
    let kept_line_points = kept.iter().filter(|(_, c)| !*c).count();

    TrimResult {
        points: kept.iter().map(|(p, _)| *p).collect(),
        outcome: TrimOutcome::Trimmed {
            passes: 1,
            removed: line.len() - kept_line_points,
        },
    }
}

/// Extends both ends of an open line along its overall chord direction: the first point moves
/// back by `distance` and the last point moves forward by `distance`, using the direction from
/// the first to the last point rather than the local end segments. Lines with fewer than two
/// points or a zero length chord are returned unchanged.
///
/// # Arguments
///
/// * `points`: the ordered points of the open line
/// * `distance`: how far to push each end outward
///
/// returns: Vec<OPoint<f64, Const<2>>, Global>
pub fn project_endpoints(points: &[Point2], distance: f64) -> Vec<Point2> {
    let mut result = points.to_vec();
    if result.len() < 2 {
        return result;
    }

    let last = result.len() - 1;
    let chord = result[last] - result[0];
    let length = chord.norm();
    if length == 0.0 {
        return result;
    }

    let direction = chord / length;
    result[0] -= direction * distance;
    result[last] += direction * distance;
    result
}
