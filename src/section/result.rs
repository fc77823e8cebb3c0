//! The finished mesh of a section and the views downstream exporters need from it.

use crate::Result;
use crate::geom2::Point2;
use crate::section::definitions::{Material, MaterialId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A meshed section. Every face listed here has a material; faces which fell in no region have
/// already been removed, while every vertex of the triangulation is kept so that face indices
/// match the triangulation's vertex order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshResult {
    /// Vertex positions as `[x, y, 0]`
    pub vertices: Vec<[f64; 3]>,

    /// Triangles as `[3, v0, v1, v2]`, the leading 3 being the vertex count of the cell
    pub faces: Vec<[usize; 4]>,

    pub face_material_ids: Vec<MaterialId>,
    pub face_normals: Vec<[f64; 2]>,
    pub face_inplanes: Vec<[f64; 2]>,

    /// Total face area per material
    pub areas: BTreeMap<MaterialId, f64>,

    /// The outer contour as meshed
    pub outer_points: Vec<Point2>,

    /// The inner boundary of every skin, from the outer surface inward
    pub inner_list: Vec<Vec<Point2>>,

    /// The closed ribbon of every web ply, in creation order
    pub line_ply_list: Vec<Vec<Point2>>,

    /// The untrimmed base line of every web, in input order
    pub untrimmed_lines: Vec<Vec<Point2>>,

    /// The material of every web ply, parallel to `line_ply_list`
    pub ply_ids: Vec<MaterialId>,

    /// The material of every skin annulus from the outer surface inward, followed by the core
    /// material
    pub airfoil_ids: Vec<MaterialId>,

    pub web_names: Vec<String>,

    #[serde(default)]
    pub materials: Option<BTreeMap<MaterialId, Material>>,
}

/// One line of a mass summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub material: MaterialId,
    pub name: Option<String>,
    pub area: f64,

    /// Mass per unit length, `None` when the material has no library entry
    pub mass: Option<f64>,
}

/// Per-material areas and masses of a section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MassSummary {
    pub rows: Vec<SummaryRow>,

    /// Sum of the known masses, `None` when there is no material library
    pub total_mass: Option<f64>,
}

impl MeshResult {
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// The sum of the areas of every material
    pub fn total_area(&self) -> f64 {
        self.areas.values().sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The angle of each face's in-plane vector in degrees, folded into `[-90, 90)` since a ply
    /// direction and its reverse describe the same plane.
    pub fn plane_orientations(&self) -> Vec<f64> {
        self.face_inplanes
            .iter()
            .map(|v| (v[1].atan2(v[0]).to_degrees() + 90.0).rem_euclid(180.0) - 90.0)
            .collect()
    }

    /// Combine the areas with the densities of the material library. Materials without a
    /// library entry get no mass and do not count toward the total.
    pub fn summary(&self) -> MassSummary {
        let mut rows = Vec::with_capacity(self.areas.len());
        let mut total = 0.0;
        for (material, area) in &self.areas {
            let entry = self.materials.as_ref().and_then(|m| m.get(material));
            let mass = entry.map(|m| m.rho * area);
            if let Some(m) = mass {
                total += m;
            }
            rows.push(SummaryRow {
                material: material.clone(),
                name: entry.and_then(|m| m.name.clone()),
                area: *area,
                mass,
            });
        }

        MassSummary {
            rows,
            total_mass: self.materials.as_ref().map(|_| total),
        }
    }
}
