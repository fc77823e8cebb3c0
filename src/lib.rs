//! Structural cross-section meshing for layered airfoil sections.
//!
//! An outer airfoil contour is offset inward by a stack of skin plies, internal shear webs are
//! built from stacked ply ribbons, and the whole section is triangulated with a constrained
//! Delaunay triangulation whose faces carry a material id, a local normal and an in-plane
//! (fiber plane) direction.

pub mod common;
mod errors;
pub mod geom2;
pub mod section;

pub use errors::MeshError;
pub use geom2::{Point2, Vector2};
pub use section::{
    AirfoilMeshInput, MaterialId, MeshResult, SkinDefinition, Thickness, WebDefinition,
    generate_mesh, generate_meshes,
};

pub type Result<T> = std::result::Result<T, MeshError>;
