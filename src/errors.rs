use std::path::PathBuf;
use thiserror::Error;

/// Errors which abort a meshing run. Geometric degeneracies (a web that never crosses the skin,
/// a zero length tangent, a trim that would collapse a curve) are not errors; they are absorbed
/// by the component that meets them and reported through the `Reporter`.
#[derive(Debug, Error)]
pub enum MeshError {
    /// A per-point array does not have one entry per point of the curve it is applied to.
    #[error("{context}: expected {expected} values, got {actual}")]
    ThicknessLengthMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// A curve or point list is too short for the operation.
    #[error("{context}: at least {required} points are required, got {actual}")]
    NotEnoughPoints {
        context: String,
        required: usize,
        actual: usize,
    },

    /// A thickness rule is malformed (mismatched breakpoints, descending breakpoints, ...).
    #[error("invalid thickness rule: {0}")]
    InvalidThickness(String),

    /// A resampling spacing is zero, negative or not a finite number.
    #[error("resample spacing must be finite and positive, got {0}")]
    InvalidSpacing(f64),

    /// A web definition cannot be turned into a base line.
    #[error("invalid web '{web}': {reason}")]
    InvalidWeb { web: String, reason: String },

    /// A coordinate could not be inserted into the triangulation (NaN or out of range).
    #[error("triangulation rejected point ({x}, {y})")]
    Triangulation { x: f64, y: f64 },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MeshError {
    pub fn not_enough_points(context: impl Into<String>, required: usize, actual: usize) -> Self {
        MeshError::NotEnoughPoints {
            context: context.into(),
            required,
            actual,
        }
    }

    pub fn length_mismatch(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        MeshError::ThicknessLengthMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }
}
