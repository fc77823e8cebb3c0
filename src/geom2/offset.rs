use crate::geom2::{ContourFrames, CurveKind, Point2, Vector2};
use crate::{MeshError, Result};

/// Offsets every point of a curve along its local normal by a per-point distance, producing a new
/// curve with the same number of points.
///
/// Normals come from `ContourFrames`: the central difference tangent rotated 90 degrees
/// counter-clockwise. On a counter-clockwise closed contour a positive distance therefore moves
/// the curve inward. When a `reference` direction is given, every normal with a negative dot
/// product against it is flipped first, so all points of the curve move to the same side even
/// where the local curvature would turn the natural normal around. Points with a zero length
/// tangent (duplicate neighbors) are not moved.
///
/// # Arguments
///
/// * `points`: the ordered points of the curve
/// * `distances`: one offset distance per point, or a single distance applied to every point
/// * `kind`: whether the curve is closed (neighbors wrap around) or open
/// * `reference`: optional direction deciding which side the curve is offset toward
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, MeshError>
///
/// # Examples
///
/// ```
/// use foilmesh::geom2::{offset_curve, CurveKind};
/// use foilmesh::{Point2, Vector2};
/// let line = vec![Point2::new(0.0, 0.0), Point2::new(0.0, 1.0), Point2::new(0.0, 2.0)];
/// let moved = offset_curve(&line, &[0.5], CurveKind::Open, Some(&Vector2::new(1.0, 0.0))).unwrap();
/// assert_eq!(moved[1], Point2::new(0.5, 1.0));
/// ```
pub fn offset_curve(
    points: &[Point2],
    distances: &[f64],
    kind: CurveKind,
    reference: Option<&Vector2>,
) -> Result<Vec<Point2>> {
    if distances.len() != 1 && distances.len() != points.len() {
        return Err(MeshError::length_mismatch(
            "offset distances",
            points.len(),
            distances.len(),
        ));
    }

    let frames = ContourFrames::new(points, kind);
    let normals = frames.aligned_normals(reference);

    Ok(points
        .iter()
        .zip(normals.iter())
        .enumerate()
        .map(|(i, (p, n))| {
            let d = if distances.len() == 1 {
                distances[0]
            } else {
                distances[i]
            };
            p + n * d
        })
        .collect())
}
