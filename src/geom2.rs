mod frames;
mod line;
mod offset;
mod polygon;
mod segments;
mod trim;

pub type Point2 = parry2d_f64::na::Point2<f64>;
pub type Vector2 = parry2d_f64::na::Vector2<f64>;
pub type Aabb2 = parry2d_f64::bounding_volume::Aabb;
pub type KdTree2 = kiddo::KdTree<f64, 2>;

pub use self::frames::{ContourFrames, CurveKind};
pub use self::line::{create_line_mesh, resample_closed};
pub use self::offset::offset_curve;
pub use self::polygon::{
    Polygon, point_in_polygon, polygon_area, polygon_signed_area, triangle_area,
};
pub use self::segments::{segment_intersection, segments_intersect};
pub use self::trim::{
    TrimOutcome, TrimResult, UnmodifiedReason, project_endpoints, trim_line,
    trim_self_intersecting_curve,
};

/// Rotates a vector by 90 degrees counter-clockwise, (x, y) -> (-y, x)
pub fn rot90(v: &Vector2) -> Vector2 {
    Vector2::new(-v.y, v.x)
}

/// Rotates a vector by 90 degrees clockwise, (x, y) -> (y, -x)
pub fn rot270(v: &Vector2) -> Vector2 {
    Vector2::new(v.y, -v.x)
}
