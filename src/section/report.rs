//! Progress and diagnostic events from a meshing run. The generator never logs directly; it
//! hands every event to the `Reporter` it was given, so callers decide whether events go to
//! `tracing`, get recorded for inspection, or are dropped.

use crate::geom2::{TrimOutcome, UnmodifiedReason};
use crate::section::definitions::MaterialId;
use std::sync::Mutex;
use tracing::{debug, info, warn};

/// Something that happened during a meshing run
#[derive(Debug, Clone, PartialEq)]
pub enum MeshEvent {
    /// The outer contour was loaded and prepared
    OuterContour { points: usize },

    /// A skin was offset and trimmed, producing the boundary on its inner side
    SkinBoundary {
        index: usize,
        name: String,
        points: usize,
        outcome: TrimOutcome,
    },

    /// The distance web ends are pushed past the innermost boundary. `floored` is set when there
    /// was no positive skin thickness to take half of and the minimum distance was used instead.
    Protrusion { distance: f64, floored: bool },

    /// A web line was trimmed against the innermost boundary. `ply` is `None` for the base line
    /// and the zero based ply index otherwise.
    WebLine {
        web: String,
        ply: Option<usize>,
        outcome: TrimOutcome,
    },

    /// The constrained triangulation was built
    Triangulation { vertices: usize, faces: usize },

    /// Faces whose centroid is in no region were removed from the mesh
    FacesDropped { count: usize },

    /// The mesh is complete
    Finished {
        faces: usize,
        materials: Vec<MaterialId>,
        total_area: f64,
    },
}

/// Receives the events of a meshing run. Reporters are shared between the parallel runs of a
/// batch, so they must be `Sync`.
pub trait Reporter: Sync {
    fn report(&self, event: &MeshEvent);
}

/// Forwards events to the `tracing` macros. Trimming fallbacks are warnings, everything else is
/// debug or info.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, event: &MeshEvent) {
        match event {
            MeshEvent::OuterContour { points } => {
                debug!("Outer contour has {} points", points);
            }
            MeshEvent::SkinBoundary {
                index,
                name,
                points,
                outcome,
            } => match outcome {
                TrimOutcome::Unmodified(UnmodifiedReason::WouldCollapse) => {
                    warn!(
                        "Skin {} ({}) boundary folds over itself but trimming would collapse it, kept {} points untrimmed",
                        index, name, points
                    );
                }
                TrimOutcome::Trimmed { passes, removed } => {
                    debug!(
                        "Skin {} ({}) boundary trimmed in {} passes, removed {} points, {} remain",
                        index, name, passes, removed, points
                    );
                }
                TrimOutcome::Unmodified(_) => {
                    debug!("Skin {} ({}) boundary has {} points", index, name, points);
                }
            },
            MeshEvent::Protrusion { distance, floored } => {
                if *floored {
                    warn!(
                        "No positive thickness on the last skin, using protrusion distance {}",
                        distance
                    );
                } else {
                    debug!("Protrusion distance {}", distance);
                }
            }
            MeshEvent::WebLine { web, ply, outcome } => {
                let which = match ply {
                    Some(i) => format!("ply {}", i),
                    None => "base line".to_string(),
                };
                match outcome {
                    TrimOutcome::Unmodified(UnmodifiedReason::TooFewCrossings(n)) => {
                        warn!(
                            "Web {} {} crosses the innermost boundary {} times, left untrimmed",
                            web, which, n
                        );
                    }
                    _ => debug!("Web {} {} trimmed: {:?}", web, which, outcome),
                }
            }
            MeshEvent::Triangulation { vertices, faces } => {
                debug!("Triangulation has {} vertices and {} faces", vertices, faces);
            }
            MeshEvent::FacesDropped { count } => {
                if *count > 0 {
                    debug!("Dropped {} unclassified faces", count);
                }
            }
            MeshEvent::Finished {
                faces,
                materials,
                total_area,
            } => {
                let ids = materials.iter().map(|m| m.to_string()).collect::<Vec<_>>();
                info!(
                    "Mesh finished with {} faces over materials [{}], total area {:.6e}",
                    faces,
                    ids.join(", "),
                    total_area
                );
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentReporter;

impl Reporter for SilentReporter {
    fn report(&self, _event: &MeshEvent) {}
}

/// Keeps every event in memory, in the order reported
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<MeshEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of the events recorded so far
    pub fn events(&self) -> Vec<MeshEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: &MeshEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}
