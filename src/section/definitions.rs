//! The serializable description of a section to be meshed: the outer contour source, the skin
//! stack, the webs and the optional material library.

use crate::geom2::{Point2, Vector2, create_line_mesh};
use crate::section::thickness::{Thickness, number_or_rule};
use crate::{MeshError, Result};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

/// A material tag, either an integer or a name. Integer ids sort before named ids, and both
/// sort in their natural order, so every per-material map iterates deterministically.
///
/// When deserializing, a string which parses as an integer becomes an `Index`. This keeps JSON
/// object keys (which are always strings) consistent with ids given as plain numbers elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MaterialId {
    Index(i64),
    Name(String),
}

impl Default for MaterialId {
    fn default() -> Self {
        MaterialId::Index(0)
    }
}

impl fmt::Display for MaterialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialId::Index(i) => write!(f, "{}", i),
            MaterialId::Name(n) => write!(f, "{}", n),
        }
    }
}

impl From<i64> for MaterialId {
    fn from(value: i64) -> Self {
        MaterialId::Index(value)
    }
}

impl From<&str> for MaterialId {
    fn from(value: &str) -> Self {
        match value.parse::<i64>() {
            Ok(i) => MaterialId::Index(i),
            Err(_) => MaterialId::Name(value.to_string()),
        }
    }
}

impl Serialize for MaterialId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            MaterialId::Index(i) => serializer.serialize_i64(*i),
            MaterialId::Name(n) => serializer.serialize_str(n),
        }
    }
}

struct MaterialIdVisitor;

impl Visitor<'_> for MaterialIdVisitor {
    type Value = MaterialId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer or string material id")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<MaterialId, E> {
        Ok(MaterialId::Index(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<MaterialId, E> {
        i64::try_from(v)
            .map(MaterialId::Index)
            .map_err(|_| E::custom(format!("material id {} is out of range", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<MaterialId, E> {
        Ok(MaterialId::from(v))
    }
}

impl<'de> Deserialize<'de> for MaterialId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(MaterialIdVisitor)
    }
}

/// A material library entry. Only the density is needed here, for the mass summary; other
/// properties in the input are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    #[serde(default)]
    pub name: Option<String>,
    pub rho: f64,
}

/// A skin ply: a layer following the outer surface, offset inward from the boundary left by the
/// skins before it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkinDefinition {
    pub name: String,

    #[serde(deserialize_with = "number_or_rule")]
    pub thickness: Thickness,

    pub material: MaterialId,

    /// Skins are stacked from the outer surface inward in ascending order of this index
    pub sort_index: i64,
}

/// One layer of a web
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ply {
    #[serde(deserialize_with = "number_or_rule")]
    pub thickness: Thickness,

    pub material: MaterialId,
}

/// How the untrimmed base line of a web is described
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WebLine {
    /// A straight line between two points, split into `n_cell` equal elements
    Straight { points: [[f64; 2]; 2], n_cell: usize },

    /// An explicit polyline
    Polyline { coords: Vec<[f64; 2]> },
}

/// An internal web, built as a stack of ply ribbons starting from a base line which spans the
/// section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebDefinition {
    pub name: String,

    #[serde(flatten)]
    pub line: WebLine,

    pub plies: Vec<Ply>,

    /// The side toward which successive plies are stacked. A zero vector leaves every ply on
    /// the natural normal side of the line.
    #[serde(default)]
    pub normal_ref: [f64; 2],
}

impl WebDefinition {
    /// The untrimmed base line of the web, with every coordinate multiplied by `scale`.
    pub fn base_line(&self, scale: f64) -> Result<Vec<Point2>> {
        let line = match &self.line {
            WebLine::Straight { points, n_cell } => {
                let p1 = Point2::new(points[0][0], points[0][1]);
                let p2 = Point2::new(points[1][0], points[1][1]);
                create_line_mesh(&p1, &p2, *n_cell).map_err(|_| MeshError::InvalidWeb {
                    web: self.name.clone(),
                    reason: "n_cell must be at least 1".to_string(),
                })?
            }
            WebLine::Polyline { coords } => {
                coords.iter().map(|c| Point2::new(c[0], c[1])).collect()
            }
        };

        if line.len() < 2 {
            return Err(MeshError::InvalidWeb {
                web: self.name.clone(),
                reason: format!("the base line has {} points, at least 2 are needed", line.len()),
            });
        }

        Ok(line.iter().map(|p| Point2::from(p.coords * scale)).collect())
    }

    /// The stacking direction, normalized, or `None` when it is the zero vector.
    pub fn normal_ref(&self) -> Option<Vector2> {
        let v = Vector2::new(self.normal_ref[0], self.normal_ref[1]);
        let length = v.norm();
        if length > 0.0 { Some(v / length) } else { None }
    }
}

/// Where the outer contour points come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContourSource {
    /// A Selig style `.dat` file: one header line followed by `x y` rows
    Path(PathBuf),

    /// An inline list of `[x, y]` points
    Points(Vec<[f64; 2]>),
}

/// The complete description of one section to mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfoilMeshInput {
    pub airfoil_input: ContourSource,

    /// If given, the outer contour is resampled to this many points by arc length
    #[serde(default)]
    pub n_elem: Option<usize>,

    #[serde(default)]
    pub skins: Vec<SkinDefinition>,

    #[serde(default)]
    pub webs: Vec<WebDefinition>,

    #[serde(default)]
    pub materials: Option<BTreeMap<MaterialId, Material>>,

    /// Uniform factor applied to the outer contour and web coordinates, not to thicknesses
    #[serde(default)]
    pub scale: Option<f64>,

    /// Material of the region inside the innermost skin boundary which is not part of a web.
    /// Defaults to id 0.
    #[serde(default)]
    pub core_material: Option<MaterialId>,
}

impl AirfoilMeshInput {
    /// Create an input with only an outer contour, to be filled in with skins and webs
    pub fn new(airfoil_input: ContourSource) -> Self {
        Self {
            airfoil_input,
            n_elem: None,
            skins: Vec::new(),
            webs: Vec::new(),
            materials: None,
            scale: None,
            core_material: None,
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load an input from a JSON file. A relative contour file path is resolved against the
    /// directory containing the JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| MeshError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut input = Self::from_json_str(&text)?;
        if let ContourSource::Path(contour) = &input.airfoil_input {
            if contour.is_relative() {
                if let Some(parent) = path.parent() {
                    input.airfoil_input = ContourSource::Path(parent.join(contour));
                }
            }
        }
        Ok(input)
    }

    /// The skins in stacking order: ascending `sort_index`, ties kept in input order
    pub fn sorted_skins(&self) -> Vec<&SkinDefinition> {
        let mut skins = self.skins.iter().collect::<Vec<_>>();
        skins.sort_by_key(|s| s.sort_index);
        skins
    }

    pub fn scale(&self) -> f64 {
        self.scale.unwrap_or(1.0)
    }

    pub fn core_material(&self) -> MaterialId {
        self.core_material.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const INPUT: &str = r#"{
        "airfoil_input": [[1.0, 0.0], [0.0, 0.1], [0.0, -0.1]],
        "n_elem": 120,
        "skins": [
            {"name": "core_skin", "thickness": 0.002, "material": 2, "sort_index": 2},
            {"name": "gelcoat", "thickness": {"type": "constant", "value": 0.001},
             "material": "gel", "sort_index": 1}
        ],
        "webs": [
            {"name": "spar", "points": [[0.3, -1.0], [0.3, 1.0]], "n_cell": 10,
             "plies": [{"thickness": 0.004, "material": 5}], "normal_ref": [1, 0]},
            {"name": "curved", "coords": [[0.6, -1.0], [0.62, 0.0], [0.6, 1.0]],
             "plies": [{"thickness": 0.004, "material": 5}]}
        ],
        "materials": {"2": {"name": "foam", "rho": 200.0}, "gel": {"rho": 1100.0}},
        "scale": 2.0
    }"#;

    #[test]
    fn loads_full_input() {
        let input = AirfoilMeshInput::from_json_str(INPUT).unwrap();
        assert_eq!(input.n_elem, Some(120));
        assert_eq!(input.skins.len(), 2);
        assert_eq!(input.webs.len(), 2);
        assert_eq!(input.scale(), 2.0);
        assert_eq!(input.core_material(), MaterialId::Index(0));

        let sorted = input.sorted_skins();
        assert_eq!(sorted[0].name, "gelcoat");
        assert_eq!(sorted[0].material, MaterialId::Name("gel".to_string()));
        assert_eq!(sorted[1].thickness, Thickness::constant(0.002));

        let materials = input.materials.unwrap();
        assert_eq!(materials[&MaterialId::Index(2)].rho, 200.0);
        assert_eq!(materials[&MaterialId::from("gel")].name, None);
    }

    #[test]
    fn web_lines() {
        let input = AirfoilMeshInput::from_json_str(INPUT).unwrap();
        let spar = &input.webs[0];
        let line = spar.base_line(input.scale()).unwrap();
        assert_eq!(line.len(), 11);
        assert_relative_eq!(line[0], Point2::new(0.6, -2.0), epsilon = 1e-12);
        assert_relative_eq!(line[10], Point2::new(0.6, 2.0), epsilon = 1e-12);
        assert_eq!(spar.normal_ref(), Some(Vector2::new(1.0, 0.0)));

        let curved = &input.webs[1];
        assert_eq!(curved.base_line(1.0).unwrap().len(), 3);
        assert_eq!(curved.normal_ref(), None);
    }

    #[test]
    fn web_without_cells_is_invalid() {
        let web = WebDefinition {
            name: "bad".to_string(),
            line: WebLine::Straight {
                points: [[0.0, 0.0], [0.0, 1.0]],
                n_cell: 0,
            },
            plies: Vec::new(),
            normal_ref: [0.0, 0.0],
        };
        assert!(matches!(
            web.base_line(1.0),
            Err(MeshError::InvalidWeb { .. })
        ));
    }

    #[test]
    fn material_id_order() {
        let mut ids = vec![
            MaterialId::from("b"),
            MaterialId::from(3),
            MaterialId::from("a"),
            MaterialId::from(-1),
        ];
        ids.sort();
        assert_eq!(
            ids,
            vec![
                MaterialId::Index(-1),
                MaterialId::Index(3),
                MaterialId::Name("a".to_string()),
                MaterialId::Name("b".to_string())
            ]
        );
    }

    #[test]
    fn material_id_round_trip_as_map_key() {
        let mut map = BTreeMap::new();
        map.insert(MaterialId::Index(4), 1.0);
        map.insert(MaterialId::from("glass"), 2.0);
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"4":1.0,"glass":2.0}"#);
        let back: BTreeMap<MaterialId, f64> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn contour_path_is_a_string() {
        let input = AirfoilMeshInput::from_json_str(r#"{"airfoil_input": "naca0018.dat"}"#).unwrap();
        assert_eq!(
            input.airfoil_input,
            ContourSource::Path(PathBuf::from("naca0018.dat"))
        );
        assert!(input.skins.is_empty());
    }
}
