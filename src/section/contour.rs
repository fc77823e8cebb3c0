//! Loading and preparation of the outer airfoil contour.

use crate::common::Resample;
use crate::geom2::{Point2, resample_closed};
use crate::section::definitions::{AirfoilMeshInput, ContourSource};
use crate::{MeshError, Result};
use std::path::Path;

/// Parse the text of a Selig style airfoil file. The first line is a header and is skipped; every
/// following line with exactly two whitespace separated fields is read as an `x y` pair, and all
/// other lines are ignored.
///
/// # Arguments
///
/// * `text`: the contents of the file
/// * `path`: the path the text came from, used only in error messages
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, MeshError>
pub fn parse_dat(text: &str, path: &Path) -> Result<Vec<Point2>> {
    let mut points = Vec::new();
    for (i, line) in text.lines().enumerate().skip(1) {
        let parts = line.split_whitespace().collect::<Vec<_>>();
        if parts.len() != 2 {
            continue;
        }

        let parse = |s: &str| {
            s.parse::<f64>().map_err(|e| MeshError::Parse {
                path: path.to_path_buf(),
                line: i + 1,
                message: format!("'{}' is not a number: {}", s, e),
            })
        };
        points.push(Point2::new(parse(parts[0])?, parse(parts[1])?));
    }

    Ok(points)
}

/// Read and parse a Selig style airfoil file, see `parse_dat`
pub fn load_dat(path: &Path) -> Result<Vec<Point2>> {
    let text = std::fs::read_to_string(path).map_err(|source| MeshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dat(&text, path)
}

impl ContourSource {
    /// The raw points of the contour, exactly as given
    pub fn load(&self) -> Result<Vec<Point2>> {
        match self {
            ContourSource::Path(path) => load_dat(path),
            ContourSource::Points(points) => {
                Ok(points.iter().map(|p| Point2::new(p[0], p[1])).collect())
            }
        }
    }
}

/// Build the outer contour for a section: load the points, drop a closing point which repeats the
/// first point, apply the scale, and resample when a point count is requested. The point order is
/// kept as given, since array thicknesses are matched to the points by position.
///
/// # Arguments
///
/// * `input`: the section description
///
/// returns: Result<Vec<OPoint<f64, Const<2>>, Global>, MeshError>
pub fn prepare_outer_contour(input: &AirfoilMeshInput) -> Result<Vec<Point2>> {
    let mut points = input.airfoil_input.load()?;
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    let scale = input.scale();
    if scale != 1.0 {
        points.iter_mut().for_each(|p| *p = Point2::from(p.coords * scale));
    }

    if points.len() < 3 {
        return Err(MeshError::not_enough_points(
            "outer contour",
            3,
            points.len(),
        ));
    }

    match input.n_elem {
        Some(n) => resample_closed(&points, Resample::ByCount(n)),
        None => Ok(points),
    }
}
