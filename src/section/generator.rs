//! The meshing pipeline: skins, webs, triangulation, classification and areas, run once from
//! start to finish for each section.

use crate::Result;
use crate::geom2::{
    CurveKind, Point2, Vector2, offset_curve, polygon_signed_area, project_endpoints, trim_line,
    trim_self_intersecting_curve,
};
use crate::section::areas::material_areas;
use crate::section::classify::{FaceClassifier, WebPlyRegion};
use crate::section::contour::prepare_outer_contour;
use crate::section::definitions::{AirfoilMeshInput, MaterialId, WebDefinition};
use crate::section::report::{MeshEvent, Reporter};
use crate::section::result::MeshResult;
use crate::section::thickness::CoordinateBundle;
use crate::section::triangulation::SectionTriangulation;
use rayon::prelude::*;

/// Web ends are pushed at least this far past the innermost boundary, used when the last skin
/// has no thickness to take half of.
pub const MIN_PROTRUSION: f64 = 1e-3;

struct SkinStack {
    boundaries: Vec<Vec<Point2>>,
    materials: Vec<MaterialId>,
    last_thickness: Vec<f64>,
}

/// Offset each skin inward from the boundary left by the one before it, trimming the folds that
/// tight curvature leaves in the offset.
fn build_skins(
    input: &AirfoilMeshInput,
    outer: &[Point2],
    reporter: &dyn Reporter,
) -> Result<SkinStack> {
    // Skins always grow into the section, whichever way the contour winds
    let inward = if polygon_signed_area(outer) < 0.0 {
        -1.0
    } else {
        1.0
    };

    let mut stack = SkinStack {
        boundaries: Vec::new(),
        materials: Vec::new(),
        last_thickness: Vec::new(),
    };
    let mut current = outer.to_vec();

    for (index, skin) in input.sorted_skins().into_iter().enumerate() {
        let bundle = CoordinateBundle::from_points(&current);
        let thickness = skin.thickness.evaluate(&bundle)?;
        let distances = thickness.iter().map(|t| t * inward).collect::<Vec<_>>();
        let offset = offset_curve(&current, &distances, CurveKind::Closed, None)?;
        let trimmed = trim_self_intersecting_curve(&offset);

        reporter.report(&MeshEvent::SkinBoundary {
            index,
            name: skin.name.clone(),
            points: trimmed.points.len(),
            outcome: trimmed.outcome,
        });

        stack.boundaries.push(trimmed.points.clone());
        stack.materials.push(skin.material.clone());
        stack.last_thickness = thickness;
        current = trimmed.points;
    }

    Ok(stack)
}

/// Half of the largest thickness of the last skin, or `MIN_PROTRUSION` if that is not positive.
/// The second value is true when the minimum was used.
fn protrusion_distance(last_thickness: &[f64]) -> (f64, bool) {
    let max = last_thickness
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let half = 0.5 * max;
    if half > 0.0 {
        (half, false)
    } else {
        (MIN_PROTRUSION, true)
    }
}

struct WebPlies {
    untrimmed: Vec<Point2>,
    regions: Vec<WebPlyRegion>,
}

/// Build the ply ribbons of one web. Every ply's thickness is evaluated against the untrimmed
/// base line, each ply is offset from the untrimmed line of the ply before it, and each trimmed,
/// extended offset line closes the ribbon of the previous line.
fn build_web(
    web: &WebDefinition,
    scale: f64,
    boundary: &[Point2],
    protrusion: f64,
    reporter: &dyn Reporter,
) -> Result<WebPlies> {
    let untrimmed = web.base_line(scale)?;
    let normal = web.normal_ref();
    let bundle = CoordinateBundle::from_points(&untrimmed);

    let base = trim_line(&untrimmed, boundary);
    reporter.report(&MeshEvent::WebLine {
        web: web.name.clone(),
        ply: None,
        outcome: base.outcome,
    });

    let mut current_line = project_endpoints(&base.points, protrusion);
    let mut current_untrimmed = untrimmed.clone();
    let mut regions = Vec::with_capacity(web.plies.len());

    for (i, ply) in web.plies.iter().enumerate() {
        let thickness = ply.thickness.evaluate(&bundle)?;
        let offset_untrimmed =
            offset_curve(&current_untrimmed, &thickness, CurveKind::Open, normal.as_ref())?;
        let trimmed = trim_line(&offset_untrimmed, boundary);
        reporter.report(&MeshEvent::WebLine {
            web: web.name.clone(),
            ply: Some(i),
            outcome: trimmed.outcome,
        });
        let offset_line = project_endpoints(&trimmed.points, protrusion);

        let mut ribbon = current_line;
        ribbon.extend(offset_line.iter().rev());
        regions.push(WebPlyRegion::new(
            ribbon,
            ply.material.clone(),
            normal.unwrap_or_else(Vector2::zeros),
        ));

        current_line = offset_line;
        current_untrimmed = offset_untrimmed;
    }

    Ok(WebPlies { untrimmed, regions })
}

/// Generate the structural mesh of one airfoil section.
///
/// The outer contour is loaded and prepared, the skins are stacked inward from it, and the webs
/// are built between the walls of the innermost skin boundary. The outer contour, every skin
/// boundary and every web ply ribbon are then inserted into a constrained Delaunay triangulation,
/// each face is given a material and an orientation from the region its centroid falls in, and
/// faces in no region are dropped.
///
/// Malformed input (an array thickness of the wrong length, a contour with fewer than three
/// points, an unreadable contour file) fails the whole run. Degenerate geometry does not: a web
/// which never crosses the innermost boundary is left untrimmed, and a fold which cannot be
/// trimmed without collapsing a boundary is left in place, both reported through `reporter`.
///
/// # Arguments
///
/// * `input`: the section description
/// * `reporter`: receives the progress and diagnostic events of the run
///
/// returns: Result<MeshResult, MeshError>
///
/// # Examples
///
/// ```
/// use foilmesh::section::{AirfoilMeshInput, ContourSource, SilentReporter, generate_mesh};
/// let square = vec![[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];
/// let input = AirfoilMeshInput::new(ContourSource::Points(square));
/// let mesh = generate_mesh(&input, &SilentReporter).unwrap();
/// assert_eq!(mesh.num_faces(), 2);
/// assert!((mesh.total_area() - 1.0).abs() < 1e-12);
/// ```
pub fn generate_mesh(input: &AirfoilMeshInput, reporter: &dyn Reporter) -> Result<MeshResult> {
    let outer = prepare_outer_contour(input)?;
    reporter.report(&MeshEvent::OuterContour {
        points: outer.len(),
    });

    let skins = build_skins(input, &outer, reporter)?;

    let (protrusion, floored) = protrusion_distance(&skins.last_thickness);
    reporter.report(&MeshEvent::Protrusion {
        distance: protrusion,
        floored,
    });

    let innermost = skins.boundaries.last().unwrap_or(&outer);
    let mut untrimmed_lines = Vec::with_capacity(input.webs.len());
    let mut web_regions = Vec::new();
    for web in &input.webs {
        let plies = build_web(web, input.scale(), innermost, protrusion, reporter)?;
        untrimmed_lines.push(plies.untrimmed);
        web_regions.extend(plies.regions);
    }

    let mut loops: Vec<&[Point2]> = vec![outer.as_slice()];
    loops.extend(skins.boundaries.iter().map(|b| b.as_slice()));
    loops.extend(web_regions.iter().map(|w| w.points()));
    let triangulation = SectionTriangulation::from_loops(&loops)?;
    reporter.report(&MeshEvent::Triangulation {
        vertices: triangulation.num_vertices(),
        faces: triangulation.num_faces(),
    });

    let line_ply_list = web_regions
        .iter()
        .map(|w| w.points().to_vec())
        .collect::<Vec<_>>();
    let ply_ids = web_regions
        .iter()
        .map(|w| w.material().clone())
        .collect::<Vec<_>>();
    let mut airfoil_ids = skins.materials.clone();
    airfoil_ids.push(input.core_material());

    let classifier = FaceClassifier::new(
        &outer,
        skins
            .boundaries
            .iter()
            .cloned()
            .zip(skins.materials.iter().cloned())
            .collect(),
        web_regions,
        input.core_material(),
    );
    let tags = classifier.classify_faces(&triangulation);

    let mut kept_faces = Vec::with_capacity(tags.len());
    let mut face_material_ids = Vec::with_capacity(tags.len());
    let mut face_normals = Vec::with_capacity(tags.len());
    let mut face_inplanes = Vec::with_capacity(tags.len());
    for (face, tag) in triangulation.faces().iter().zip(tags) {
        if let Some(tag) = tag {
            kept_faces.push(*face);
            face_material_ids.push(tag.material);
            face_normals.push([tag.normal.x, tag.normal.y]);
            face_inplanes.push([tag.in_plane.x, tag.in_plane.y]);
        }
    }
    reporter.report(&MeshEvent::FacesDropped {
        count: triangulation.num_faces() - kept_faces.len(),
    });

    let areas = material_areas(triangulation.vertices(), &kept_faces, &face_material_ids);

    let result = MeshResult {
        vertices: triangulation
            .vertices()
            .iter()
            .map(|p| [p.x, p.y, 0.0])
            .collect(),
        faces: kept_faces.iter().map(|f| [3, f[0], f[1], f[2]]).collect(),
        face_material_ids,
        face_normals,
        face_inplanes,
        areas,
        outer_points: outer,
        inner_list: skins.boundaries,
        line_ply_list,
        untrimmed_lines,
        ply_ids,
        airfoil_ids,
        web_names: input.webs.iter().map(|w| w.name.clone()).collect(),
        materials: input.materials.clone(),
    };

    reporter.report(&MeshEvent::Finished {
        faces: result.num_faces(),
        materials: result.areas.keys().cloned().collect(),
        total_area: result.total_area(),
    });

    Ok(result)
}

/// Generate the meshes of many independent sections in parallel. The results are in the same
/// order as the inputs, and a failure in one section does not affect the others.
pub fn generate_meshes(
    inputs: &[AirfoilMeshInput],
    reporter: &dyn Reporter,
) -> Vec<Result<MeshResult>> {
    inputs
        .par_iter()
        .map(|input| generate_mesh(input, reporter))
        .collect()
}
