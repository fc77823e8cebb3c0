//! Assignment of a material and a local orientation to every triangulation face, by testing the
//! face centroid against the nested skin boundaries and the web ply ribbons.

use crate::geom2::{ContourFrames, KdTree2, Point2, Polygon, Vector2};
use crate::section::definitions::MaterialId;
use crate::section::triangulation::SectionTriangulation;
use kiddo::SquaredEuclidean;
use rayon::prelude::*;

/// The material and orientation given to one face
#[derive(Debug, Clone, PartialEq)]
pub struct FaceTag {
    pub material: MaterialId,

    /// The out-of-plane direction of the ply the face belongs to
    pub normal: Vector2,

    /// The fiber plane direction of the ply the face belongs to, perpendicular to `normal`
    pub in_plane: Vector2,
}

/// A closed ply ribbon of a web
#[derive(Debug, Clone)]
pub struct WebPlyRegion {
    polygon: Polygon,
    material: MaterialId,
    normal: Vector2,
}

impl WebPlyRegion {
    /// # Arguments
    ///
    /// * `points`: the closed loop of the ribbon
    /// * `material`: the ply material
    /// * `normal`: the web's stacking direction, or the zero vector when the web has none
    pub fn new(points: Vec<Point2>, material: MaterialId, normal: Vector2) -> Self {
        Self {
            polygon: Polygon::new(points),
            material,
            normal,
        }
    }

    pub fn points(&self) -> &[Point2] {
        self.polygon.points()
    }

    pub fn material(&self) -> &MaterialId {
        &self.material
    }

    fn tag(&self) -> FaceTag {
        FaceTag {
            material: self.material.clone(),
            normal: self.normal,
            in_plane: Vector2::new(self.normal.y, -self.normal.x),
        }
    }
}

/// Region lookup for a meshed section.
///
/// A centroid is classified in this order:
/// 1. Outside the outer contour: no region.
/// 2. The skin annuli from the outer surface inward. Annulus `k` lies inside boundary `k - 1`
///    (the outer contour for `k = 0`) and outside boundary `k`, and carries the material of skin
///    `k`. The first annulus that matches wins.
/// 3. The web ply ribbons in creation order, first match wins.
/// 4. Inside the innermost boundary: the core material.
/// 5. Anything left has no region, and the face is dropped from the mesh.
///
/// Skin and core faces take their orientation from the nearest point of the outer contour: the
/// outward normal there and the contour tangent as the in-plane direction. Web faces take the
/// web's stacking direction as the normal and that direction turned 90 degrees clockwise as the
/// in-plane direction.
pub struct FaceClassifier {
    outer: Polygon,
    boundaries: Vec<Polygon>,
    skin_materials: Vec<MaterialId>,
    webs: Vec<WebPlyRegion>,
    core: MaterialId,
    shell_normals: Vec<Vector2>,
    shell_tangents: Vec<Vector2>,
    nearest: NearestContourPoint,
}

/// Rotation of the frame the contour points are keyed in, in radians
const KEY_ROTATION: f64 = 0.4;

/// Nearest point lookup over a contour.
///
/// The mutable kiddo tree cannot split a bucket whose entries all share one value on the split
/// axis, which a long straight run of contour along x or y produces (flat bottoms, flat back
/// trailing edges, resampled rectangles). Points are keyed in a frame rotated by
/// `KEY_ROTATION`, where such runs have distinct coordinates on both axes. Rotation leaves
/// distances unchanged, so the nearest point is the same as in the contour's own frame.
///
/// When several points are equally near, the tree decides which one is returned. The choice is
/// deterministic for a given contour, but it is not necessarily the lowest index.
struct NearestContourPoint {
    tree: KdTree2,
}

impl NearestContourPoint {
    fn new(points: &[Point2]) -> Self {
        let mut tree = KdTree2::new();
        for (i, p) in points.iter().enumerate() {
            tree.add(&Self::key(p), i as u64);
        }
        Self { tree }
    }

    fn key(p: &Point2) -> [f64; 2] {
        let (sin, cos) = KEY_ROTATION.sin_cos();
        [p.x * cos - p.y * sin, p.x * sin + p.y * cos]
    }

    /// Index of the contour point nearest to `point`
    fn index(&self, point: &Point2) -> usize {
        self.tree
            .nearest_one::<SquaredEuclidean>(&Self::key(point))
            .item as usize
    }
}

impl FaceClassifier {
    /// # Arguments
    ///
    /// * `outer`: the outer contour
    /// * `skins`: the inner boundary of every skin paired with that skin's material, from the
    /// outer surface inward
    /// * `webs`: the web ply ribbons in creation order
    /// * `core`: the material inside the innermost boundary
    ///
    /// returns: FaceClassifier
    pub fn new(
        outer: &[Point2],
        skins: Vec<(Vec<Point2>, MaterialId)>,
        webs: Vec<WebPlyRegion>,
        core: MaterialId,
    ) -> Self {
        let frames = ContourFrames::closed(outer);

        let (boundaries, skin_materials) = skins
            .into_iter()
            .map(|(points, material)| (Polygon::new(points), material))
            .unzip();

        Self {
            outer: Polygon::new(outer.to_vec()),
            boundaries,
            skin_materials,
            webs,
            core,
            shell_normals: frames.outward_normals(),
            shell_tangents: frames.tangents().to_vec(),
            nearest: NearestContourPoint::new(outer),
        }
    }

    fn shell_tag(&self, point: &Point2, material: &MaterialId) -> FaceTag {
        let i = self.nearest.index(point);
        FaceTag {
            material: material.clone(),
            normal: self.shell_normals[i],
            in_plane: self.shell_tangents[i],
        }
    }

    /// Find the region containing a face centroid, or `None` if it is in no region.
    pub fn classify(&self, centroid: &Point2) -> Option<FaceTag> {
        if !self.outer.contains(centroid) {
            return None;
        }

        let mut inside_previous = true;
        for (boundary, material) in self.boundaries.iter().zip(self.skin_materials.iter()) {
            let inside = boundary.contains(centroid);
            if inside_previous && !inside {
                return Some(self.shell_tag(centroid, material));
            }
            inside_previous = inside;
        }

        if let Some(web) = self.webs.iter().find(|w| w.polygon.contains(centroid)) {
            return Some(web.tag());
        }

        // With no skins the core is everything inside the outer contour
        let in_core = self.boundaries.last().is_none_or(|b| b.contains(centroid));
        if in_core {
            Some(self.shell_tag(centroid, &self.core))
        } else {
            None
        }
    }

    /// Classify every face of a triangulation by its centroid. The result is in face order.
    pub fn classify_faces(&self, triangulation: &SectionTriangulation) -> Vec<Option<FaceTag>> {
        triangulation
            .faces()
            .par_iter()
            .map(|f| self.classify(&triangulation.centroid(f)))
            .collect()
    }
}
