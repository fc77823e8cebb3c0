//! Local tangent/normal frames along an ordered point sequence. The same frames drive both the
//! curve offsetting and the shell orientation lookup during face classification, so the two can
//! never disagree about which way a surface faces.

use crate::geom2::{Point2, Vector2, polygon_signed_area, rot90, rot270};

/// Whether a point sequence closes back on itself (an implicit edge from the last point to the
/// first) or is an open chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    Closed,
    Open,
}

/// Unit tangents and natural normals at every point of a curve.
///
/// The tangent at point `i` is the normalized central difference `(p[i+1] - p[i-1]) / 2`, with
/// indices wrapping for closed curves and one-sided differences at the ends of open curves. The
/// natural normal is the tangent rotated 90 degrees counter-clockwise `(-ty, tx)`. Where the
/// difference has zero length (duplicate neighbors) both the tangent and the normal are the zero
/// vector, which makes any offset along the normal a no-op at that point.
#[derive(Debug, Clone)]
pub struct ContourFrames {
    kind: CurveKind,
    tangents: Vec<Vector2>,
    normals: Vec<Vector2>,

    /// Sign of the enclosed signed area for closed curves: 1.0 for counter-clockwise, -1.0 for
    /// clockwise, 0.0 for open or degenerate curves.
    winding: f64,
}

impl ContourFrames {
    pub fn new(points: &[Point2], kind: CurveKind) -> Self {
        let n = points.len();
        let mut tangents = Vec::with_capacity(n);
        for i in 0..n {
            let (prev, next) = match kind {
                CurveKind::Closed => (points[(i + n - 1) % n], points[(i + 1) % n]),
                CurveKind::Open => (points[i.saturating_sub(1)], points[(i + 1).min(n - 1)]),
            };
            let diff = (next - prev) * 0.5;
            let length = diff.norm();
            tangents.push(if length > 0.0 {
                diff / length
            } else {
                Vector2::zeros()
            });
        }

        let normals = tangents.iter().map(rot90).collect();
        let winding = match kind {
            CurveKind::Closed => {
                let area = polygon_signed_area(points);
                if area > 0.0 {
                    1.0
                } else if area < 0.0 {
                    -1.0
                } else {
                    0.0
                }
            }
            CurveKind::Open => 0.0,
        };

        Self {
            kind,
            tangents,
            normals,
            winding,
        }
    }

    /// Frames for a closed contour
    pub fn closed(points: &[Point2]) -> Self {
        Self::new(points, CurveKind::Closed)
    }

    /// Frames for an open line
    pub fn open(points: &[Point2]) -> Self {
        Self::new(points, CurveKind::Open)
    }

    pub fn kind(&self) -> CurveKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }

    pub fn tangents(&self) -> &[Vector2] {
        &self.tangents
    }

    /// The natural normals, each the tangent rotated 90 degrees counter-clockwise. On a
    /// counter-clockwise closed contour these point into the enclosed region.
    pub fn normals(&self) -> &[Vector2] {
        &self.normals
    }

    /// The natural normals, each flipped where necessary so that it does not point away from the
    /// reference direction (a normal with a negative dot product against `reference` is reversed).
    /// A normal exactly perpendicular to the reference is left alone.
    ///
    /// # Arguments
    ///
    /// * `reference`: the direction whose half-plane the normals should point into, or `None` to
    /// keep the natural normals
    ///
    /// returns: Vec<Matrix<f64, Const<2>, Const<1>, ArrayStorage<f64, 2, 1>>, Global>
    pub fn aligned_normals(&self, reference: Option<&Vector2>) -> Vec<Vector2> {
        match reference {
            Some(r) => self
                .normals
                .iter()
                .map(|n| if n.dot(r) < 0.0 { -n } else { *n })
                .collect(),
            None => self.normals.clone(),
        }
    }

    /// Normals pointing out of the enclosed region of a closed curve, whatever its winding. For
    /// open or zero area curves the natural normals are returned.
    pub fn outward_normals(&self) -> Vec<Vector2> {
        if self.winding > 0.0 {
            self.tangents.iter().map(rot270).collect()
        } else {
            self.normals.clone()
        }
    }
}
