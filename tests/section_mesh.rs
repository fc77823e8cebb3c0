use approx::assert_relative_eq;
use foilmesh::geom2::{point_in_polygon, polygon_area};
use foilmesh::section::{
    AirfoilMeshInput, ContourSource, Coordinate, MeshEvent, Ply, RecordingReporter,
    SilentReporter, TracingReporter, WebLine,
};
use foilmesh::{MaterialId, MeshError, Point2, SkinDefinition, Thickness, WebDefinition};
use foilmesh::{generate_mesh, generate_meshes};
use std::f64::consts::PI;

/// A NACA 4 digit symmetric section with cosine spacing, listed Selig style from the upper
/// trailing edge around the leading edge to the lower trailing edge.
fn naca_symmetric(thickness: f64, n_side: usize) -> Vec<[f64; 2]> {
    let half = |x: f64| {
        5.0 * thickness
            * (0.2969 * x.sqrt() - 0.1260 * x - 0.3516 * x.powi(2) + 0.2843 * x.powi(3)
                - 0.1015 * x.powi(4))
    };
    let xs = (0..=n_side)
        .map(|i| 0.5 * (1.0 - (PI * i as f64 / n_side as f64).cos()))
        .collect::<Vec<_>>();

    let mut points = Vec::with_capacity(2 * n_side);
    for x in xs.iter().rev() {
        points.push([*x, half(*x)]);
    }
    for x in xs.iter().skip(1) {
        points.push([*x, -half(*x)]);
    }
    points
}

fn skin(name: &str, thickness: f64, material: i64, sort_index: i64) -> SkinDefinition {
    SkinDefinition {
        name: name.to_string(),
        thickness: Thickness::constant(thickness),
        material: MaterialId::Index(material),
        sort_index,
    }
}

fn vertical_web(name: &str, x: f64, materials: &[i64]) -> WebDefinition {
    WebDefinition {
        name: name.to_string(),
        line: WebLine::Straight {
            points: [[x, -0.3], [x, 0.3]],
            n_cell: 20,
        },
        plies: materials
            .iter()
            .map(|m| Ply {
                thickness: Thickness::constant(0.004),
                material: MaterialId::Index(*m),
            })
            .collect(),
        normal_ref: [1.0, 0.0],
    }
}

fn layered_section() -> AirfoilMeshInput {
    let mut input = AirfoilMeshInput::new(ContourSource::Points(naca_symmetric(0.18, 100)));
    input.skins = vec![
        skin("gelcoat", 0.001, 1, 0),
        skin("triax", 0.002, 2, 1),
        skin("uniax", 0.003, 3, 2),
        skin("biax", 0.002, 4, 3),
        skin("liner", 0.001, 5, 4),
    ];
    input.webs = vec![
        vertical_web("front", 0.25, &[10, 11]),
        vertical_web("middle", 0.5, &[10]),
        vertical_web("rear", 0.7, &[12, 10, 11]),
    ];
    input
}

fn interp(coordinate: Coordinate, xp: &[f64], fp: &[f64]) -> Thickness {
    Thickness::Interp {
        coordinate,
        xp: xp.to_vec(),
        fp: fp.to_vec(),
    }
}

fn interp_skin(
    name: &str,
    thickness: Thickness,
    material: i64,
    sort_index: i64,
) -> SkinDefinition {
    SkinDefinition {
        name: name.to_string(),
        thickness,
        material: MaterialId::Index(material),
        sort_index,
    }
}

/// A vertical web of three plies, the middle one with its own thickness rule
fn sandwich_web(
    name: &str,
    x: f64,
    n_cell: usize,
    normal_ref: [f64; 2],
    middle: Thickness,
    face: f64,
) -> WebDefinition {
    let ply = |thickness: Thickness, material: i64| Ply {
        thickness,
        material: MaterialId::Index(material),
    };
    WebDefinition {
        name: name.to_string(),
        line: WebLine::Straight {
            points: [[x, -0.1], [x, 0.1]],
            n_cell,
        },
        plies: vec![
            ply(Thickness::constant(face), 5),
            ply(middle, 3),
            ply(Thickness::constant(face), 5),
        ],
        normal_ref,
    }
}

/// A section with tapered skins and webs whose middle ply runs out to zero thickness at its ends
fn tapered_section() -> AirfoilMeshInput {
    let shell = || interp(Coordinate::X, &[0.0, 0.9, 1.0], &[0.005, 0.005, 0.002]);
    let taper = || interp(Coordinate::Y, &[-0.04, -0.03, 0.03, 0.04], &[0.0, 0.01, 0.01, 0.0]);

    let mut input = AirfoilMeshInput::new(ContourSource::Points(naca_symmetric(0.18, 100)));
    input.skins = vec![
        interp_skin("outer_skin", shell(), 2, 1),
        interp_skin(
            "cap",
            interp(Coordinate::X, &[0.2, 0.2001, 0.5, 0.5001], &[0.0, 0.02, 0.02, 0.0]),
            1,
            2,
        ),
        interp_skin(
            "core",
            interp(
                Coordinate::X,
                &[0.05, 0.1, 0.2, 0.20001, 0.5, 0.5001, 0.7, 0.9],
                &[0.0, 0.01, 0.01, 0.0, 0.0, 0.02, 0.02, 0.0],
            ),
            3,
            3,
        ),
        interp_skin(
            "te_ud",
            interp(Coordinate::X, &[0.7, 0.75, 0.8, 0.85], &[0.0, 0.01, 0.01, 0.0]),
            4,
            4,
        ),
        interp_skin("inner_skin", shell(), 2, 5),
    ];
    input.webs = vec![
        sandwich_web("web1", 0.25, 20, [1.0, 0.0], taper(), 0.004),
        sandwich_web("web2", 0.4, 15, [-1.0, 0.0], taper(), 0.004),
        sandwich_web(
            "web3",
            0.775,
            15,
            [-1.0, 0.0],
            Thickness::constant(0.005),
            0.005,
        ),
    ];
    input
}

fn distance_to_segment(p: &Point2, a: &Point2, b: &Point2) -> f64 {
    let ab = b - a;
    let t = ((p - a).dot(&ab) / ab.norm_squared()).clamp(0.0, 1.0);
    (p - (a + ab * t)).norm()
}

fn distance_to_loop(p: &Point2, points: &[Point2]) -> f64 {
    (0..points.len())
        .map(|i| distance_to_segment(p, &points[i], &points[(i + 1) % points.len()]))
        .fold(f64::INFINITY, f64::min)
}

#[test]
fn single_skin_section() {
    let mut input = AirfoilMeshInput::new(ContourSource::Points(naca_symmetric(0.18, 100)));
    input.skins = vec![skin("shell", 0.005, 1, 0)];

    let mesh = generate_mesh(&input, &TracingReporter).unwrap();
    let outer_area = polygon_area(&mesh.outer_points);

    assert_eq!(
        mesh.areas.keys().cloned().collect::<Vec<_>>(),
        vec![MaterialId::Index(0), MaterialId::Index(1)]
    );
    assert_relative_eq!(mesh.total_area(), outer_area, max_relative = 1e-4);

    let shell = mesh.areas[&MaterialId::Index(1)];
    assert!(shell > 0.0 && shell < outer_area);

    // Roughly the perimeter times the thickness
    let perimeter = (0..mesh.outer_points.len())
        .map(|i| {
            (mesh.outer_points[(i + 1) % mesh.outer_points.len()] - mesh.outer_points[i]).norm()
        })
        .sum::<f64>();
    assert_relative_eq!(shell, perimeter * 0.005, max_relative = 0.05);

    assert_eq!(mesh.faces.len(), mesh.face_material_ids.len());
    assert_eq!(mesh.faces.len(), mesh.face_normals.len());
    assert_eq!(mesh.faces.len(), mesh.face_inplanes.len());
    assert!(mesh.faces.iter().all(|f| f[0] == 3));
    assert!(mesh.vertices.iter().all(|v| v[2] == 0.0));
}

#[test]
fn layered_section_areas_add_up() {
    let input = layered_section();
    let reporter = RecordingReporter::new();
    let mesh = generate_mesh(&input, &reporter).unwrap();

    let outer_area = polygon_area(&mesh.outer_points);
    assert!((mesh.total_area() - outer_area).abs() < 1e-4);

    assert_eq!(mesh.inner_list.len(), 5);
    assert_eq!(mesh.line_ply_list.len(), 6);
    assert_eq!(mesh.untrimmed_lines.len(), 3);
    assert_eq!(mesh.web_names, vec!["front", "middle", "rear"]);
    assert_eq!(
        mesh.ply_ids,
        [10, 11, 10, 12, 10, 11].map(MaterialId::Index).to_vec()
    );
    assert_eq!(
        mesh.airfoil_ids,
        [1, 2, 3, 4, 5, 0].map(MaterialId::Index).to_vec()
    );

    for id in [0, 1, 2, 3, 4, 5, 10, 11, 12] {
        assert!(
            mesh.areas.contains_key(&MaterialId::Index(id)),
            "material {} has no faces",
            id
        );
    }

    let events = reporter.events();
    assert!(matches!(events.first(), Some(MeshEvent::OuterContour { .. })));
    assert!(matches!(events.last(), Some(MeshEvent::Finished { .. })));
    let skin_events = events
        .iter()
        .filter(|e| matches!(e, MeshEvent::SkinBoundary { .. }))
        .count();
    assert_eq!(skin_events, 5);
}

#[test]
fn web_plies_stay_near_the_innermost_boundary() {
    let input = layered_section();
    let reporter = RecordingReporter::new();
    let mesh = generate_mesh(&input, &reporter).unwrap();

    let protrusion = reporter
        .events()
        .iter()
        .find_map(|e| match e {
            MeshEvent::Protrusion { distance, .. } => Some(*distance),
            _ => None,
        })
        .unwrap();
    assert_relative_eq!(protrusion, 0.0005);

    let innermost = mesh.inner_list.last().unwrap();
    for ply in &mesh.line_ply_list {
        for p in ply {
            let inside = point_in_polygon(p, innermost);
            let near = distance_to_loop(p, innermost) <= protrusion + 1e-9;
            assert!(inside || near, "ply vertex {:?} is too far outside", p);
        }
    }
}

#[test]
fn web_faces_carry_the_stacking_direction() {
    let mesh = generate_mesh(&layered_section(), &SilentReporter).unwrap();
    for (i, m) in mesh.face_material_ids.iter().enumerate() {
        if *m == MaterialId::Index(12) {
            assert_eq!(mesh.face_normals[i], [1.0, 0.0]);
            assert_eq!(mesh.face_inplanes[i], [0.0, -1.0]);
        }
    }

    // Skin faces are oriented by the surface, so their normals and in-plane vectors are unit
    // length and perpendicular
    for (i, m) in mesh.face_material_ids.iter().enumerate() {
        if *m == MaterialId::Index(1) {
            let n = mesh.face_normals[i];
            let t = mesh.face_inplanes[i];
            assert_relative_eq!((n[0] * n[0] + n[1] * n[1]).sqrt(), 1.0, epsilon = 1e-9);
            assert_relative_eq!(n[0] * t[0] + n[1] * t[1], 0.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn repeated_runs_are_identical() {
    let input = layered_section();
    let first = generate_mesh(&input, &SilentReporter).unwrap();
    let second = generate_mesh(&input, &SilentReporter).unwrap();
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());

    let batch = generate_meshes(&[input.clone(), input], &SilentReporter);
    for result in batch {
        assert_eq!(result.unwrap().to_json().unwrap(), first.to_json().unwrap());
    }
}

#[test]
fn array_thickness_length_is_checked() {
    let mut input = layered_section();
    input.skins[0].thickness = Thickness::Array {
        values: vec![0.001; 50],
    };
    let result = generate_mesh(&input, &SilentReporter);
    assert!(matches!(
        result,
        Err(MeshError::ThicknessLengthMismatch {
            expected: 201,
            actual: 50,
            ..
        })
    ));
}

const CONFIG: &str = r#"{
    "airfoil_input": "section.dat",
    "n_elem": 160,
    "skins": [
        {"name": "gelcoat", "thickness": 0.001, "material": "gel", "sort_index": 0},
        {"name": "triax", "material": 2, "sort_index": 1,
         "thickness": {"type": "conditional", "coordinate": "xr", "range": [0.0, 0.5],
                       "value": 0.004, "else_value": 0.002}}
    ],
    "webs": [
        {"name": "spar", "points": [[0.3, -0.3], [0.3, 0.3]], "n_cell": 12,
         "plies": [{"thickness": 0.005, "material": 7}], "normal_ref": [1.0, 0.0]}
    ],
    "materials": {
        "gel": {"name": "gelcoat", "rho": 1200.0},
        "2": {"name": "triax", "rho": 1850.0},
        "7": {"name": "biax", "rho": 1800.0}
    }
}"#;

#[test]
fn section_from_json_file() {
    let dir = std::env::temp_dir().join(format!("foilmesh-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let mut dat = String::from("NACA 0018\n");
    for p in naca_symmetric(0.18, 80) {
        dat.push_str(&format!("{:.8} {:.8}\n", p[0], p[1]));
    }
    std::fs::write(dir.join("section.dat"), dat).unwrap();
    let config = dir.join("section.json");
    std::fs::write(&config, CONFIG).unwrap();

    let input = AirfoilMeshInput::from_json_file(&config).unwrap();
    assert_eq!(
        input.airfoil_input,
        ContourSource::Path(dir.join("section.dat"))
    );

    let mesh = generate_mesh(&input, &TracingReporter).unwrap();
    assert_eq!(mesh.outer_points.len(), 160);
    assert!((mesh.total_area() - polygon_area(&mesh.outer_points)).abs() < 1e-4);

    let summary = mesh.summary();
    let gel = summary
        .rows
        .iter()
        .find(|r| r.material == MaterialId::from("gel"))
        .unwrap();
    assert_eq!(gel.name.as_deref(), Some("gelcoat"));
    assert_relative_eq!(gel.mass.unwrap(), gel.area * 1200.0);

    // The core has no library entry, so it adds area but no mass
    let core = summary
        .rows
        .iter()
        .find(|r| r.material == MaterialId::Index(0))
        .unwrap();
    assert_eq!(core.mass, None);
    let known = summary.rows.iter().filter_map(|r| r.mass).sum::<f64>();
    assert_relative_eq!(summary.total_mass.unwrap(), known);

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_contour_file_is_an_io_error() {
    let input = AirfoilMeshInput::new(ContourSource::Path(
        std::env::temp_dir().join("foilmesh-no-such-file.dat"),
    ));
    assert!(matches!(
        generate_mesh(&input, &SilentReporter),
        Err(MeshError::Io { .. })
    ));
}

#[test]
fn unknown_thickness_type_is_rejected() {
    let text = r#"{
        "airfoil_input": [[1.0, 0.0], [0.0, 0.1], [0.0, -0.1]],
        "skins": [{"name": "s", "material": 1, "sort_index": 0,
                   "thickness": {"type": "spline", "value": 0.1}}]
    }"#;
    assert!(matches!(
        AirfoilMeshInput::from_json_str(text),
        Err(MeshError::Json(_))
    ));
}

#[test]
fn tapered_section_areas_add_up() {
    let mesh = generate_mesh(&tapered_section(), &SilentReporter).unwrap();
    let outer_area = polygon_area(&mesh.outer_points);
    assert_relative_eq!(mesh.total_area(), outer_area, epsilon = 1e-4);
    for m in 1..=5 {
        assert!(mesh.areas[&MaterialId::Index(m)] > 0.0);
    }
}

#[test]
fn tapered_webs_follow_their_reference_direction() {
    let mesh = generate_mesh(&tapered_section(), &SilentReporter).unwrap();

    let mut forward = 0;
    let mut backward = 0;
    for (i, face) in mesh.faces.iter().enumerate() {
        if mesh.face_material_ids[i] != MaterialId::Index(5) {
            continue;
        }
        let x = face[1..].iter().map(|&v| mesh.vertices[v][0]).sum::<f64>() / 3.0;
        let (normal, in_plane) = if x < 0.33 {
            forward += 1;
            ([1.0, 0.0], [0.0, -1.0])
        } else {
            backward += 1;
            ([-1.0, 0.0], [0.0, 1.0])
        };
        assert_relative_eq!(mesh.face_normals[i][0], normal[0], epsilon = 1e-12);
        assert_relative_eq!(mesh.face_normals[i][1], normal[1], epsilon = 1e-12);
        assert_relative_eq!(mesh.face_inplanes[i][0], in_plane[0], epsilon = 1e-12);
        assert_relative_eq!(mesh.face_inplanes[i][1], in_plane[1], epsilon = 1e-12);
    }
    assert!(forward > 0);
    assert!(backward > 0);
}
