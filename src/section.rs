//! Meshing of layered airfoil cross-sections.
//!
//! A section is described by an `AirfoilMeshInput`: an outer contour, a stack of skins offset
//! inward from it, and webs spanning the interior as stacks of ply ribbons. `generate_mesh` turns
//! the description into a `MeshResult` of triangles tagged with a material, a normal and an
//! in-plane direction.

mod areas;
mod classify;
mod contour;
mod definitions;
mod generator;
mod report;
mod result;
mod thickness;
mod triangulation;

pub use areas::material_areas;
pub use classify::{FaceClassifier, FaceTag, WebPlyRegion};
pub use contour::{load_dat, parse_dat, prepare_outer_contour};
pub use definitions::{
    AirfoilMeshInput, ContourSource, Material, MaterialId, Ply, SkinDefinition, WebDefinition,
    WebLine,
};
pub use generator::{MIN_PROTRUSION, generate_mesh, generate_meshes};
pub use report::{MeshEvent, RecordingReporter, Reporter, SilentReporter, TracingReporter};
pub use result::{MassSummary, MeshResult, SummaryRow};
pub use thickness::{Condition, Coordinate, CoordinateBundle, Thickness};
pub use triangulation::SectionTriangulation;
