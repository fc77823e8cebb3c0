use crate::geom2::{Point2, triangle_area};
use crate::section::definitions::MaterialId;
use std::collections::BTreeMap;

/// Sum the areas of triangles per material.
///
/// # Arguments
///
/// * `vertices`: the vertex positions the faces index into
/// * `faces`: the triangles as vertex index triples
/// * `materials`: the material of each face, in face order
///
/// returns: BTreeMap<MaterialId, f64, Global>
pub fn material_areas(
    vertices: &[Point2],
    faces: &[[usize; 3]],
    materials: &[MaterialId],
) -> BTreeMap<MaterialId, f64> {
    let mut areas = BTreeMap::new();
    for (face, material) in faces.iter().zip(materials.iter()) {
        let area = triangle_area(&vertices[face[0]], &vertices[face[1]], &vertices[face[2]]);
        *areas.entry(material.clone()).or_insert(0.0) += area;
    }
    areas
}
