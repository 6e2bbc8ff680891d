//! Route alternatives and the active route's render arena

use domain::{BoundingBox, Coordinate, Route};
use serde::Serialize;
use tracing::debug;

use crate::error::ApplicationError;
use crate::services::transit_step_classifier::{RenderSegment, TransitStepClassifier};

/// What a marker on the map stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerKind {
    Origin,
    Destination,
    Boarding,
    Alighting,
}

/// A point marker drawn with the active route
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderMarker {
    pub kind: MarkerKind,
    pub position: Coordinate,
    pub label: Option<String>,
}

/// Everything currently drawn for the active route
///
/// Replaced wholesale whenever the active route changes; `generation`
/// increases with every replacement so renderers can drop outdated frames.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RenderArena {
    pub segments: Vec<RenderSegment>,
    pub markers: Vec<RenderMarker>,
    pub bounds: Option<BoundingBox>,
    pub generation: u64,
}

impl RenderArena {
    /// Whether nothing is drawn
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.markers.is_empty()
    }
}

/// Holds the loaded alternatives and which one is active
///
/// Single writer: the owning session mutates it, nothing else does.
#[derive(Debug, Default)]
pub struct RouteSelectionManager {
    routes: Vec<Route>,
    selected_index: usize,
    arena: RenderArena,
    classifier: TransitStepClassifier,
}

impl RouteSelectionManager {
    pub fn new(classifier: TransitStepClassifier) -> Self {
        Self {
            classifier,
            ..Self::default()
        }
    }

    /// Replace the alternatives and activate the first one
    ///
    /// # Errors
    ///
    /// Returns `EmptyRouteSet` for an empty list; the current state is kept.
    pub fn load(&mut self, routes: Vec<Route>) -> Result<(), ApplicationError> {
        if routes.is_empty() {
            return Err(ApplicationError::EmptyRouteSet);
        }

        debug!(alternatives = routes.len(), "Loading routes");
        self.routes = routes;
        self.selected_index = 0;
        self.rebuild_arena();
        Ok(())
    }

    /// Activate another alternative and re-render it
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index` is not a loaded alternative.
    pub fn select(&mut self, index: usize) -> Result<&Route, ApplicationError> {
        if index >= self.routes.len() {
            return Err(ApplicationError::IndexOutOfRange {
                index,
                len: self.routes.len(),
            });
        }

        self.selected_index = index;
        self.rebuild_arena();
        self.active()
    }

    /// Drop all routes and everything drawn for them
    pub fn clear(&mut self) {
        self.routes.clear();
        self.selected_index = 0;
        self.arena = RenderArena {
            generation: self.arena.generation + 1,
            ..RenderArena::default()
        };
    }

    /// The active route
    ///
    /// # Errors
    ///
    /// Returns `EmptyRouteSet` when nothing is loaded.
    pub fn active(&self) -> Result<&Route, ApplicationError> {
        self.routes
            .get(self.selected_index)
            .ok_or(ApplicationError::EmptyRouteSet)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub const fn arena(&self) -> &RenderArena {
        &self.arena
    }

    fn rebuild_arena(&mut self) {
        let generation = self.arena.generation + 1;
        self.arena = match self.routes.get(self.selected_index) {
            Some(route) => {
                let classified = self.classifier.classify(route);
                let markers = markers_for(route);
                let bounds = markers.iter().fold(classified.bounds, |acc, marker| {
                    let point = BoundingBox::around(marker.position);
                    Some(acc.map_or(point, |b| b.union(&point)))
                });
                RenderArena {
                    segments: classified.segments,
                    markers,
                    bounds,
                    generation,
                }
            },
            None => RenderArena {
                generation,
                ..RenderArena::default()
            },
        };
    }
}

/// Origin and destination of the route plus every boarding and alighting stop
fn markers_for(route: &Route) -> Vec<RenderMarker> {
    let mut markers = Vec::new();

    let origin = route
        .legs
        .first()
        .and_then(|leg| leg.start_location)
        .or_else(|| route.path.first().copied());
    if let Some(position) = origin {
        markers.push(RenderMarker {
            kind: MarkerKind::Origin,
            position,
            label: None,
        });
    }

    for details in route.steps().filter_map(|step| step.transit_details.as_ref()) {
        let stops = [
            (MarkerKind::Boarding, &details.departure_stop),
            (MarkerKind::Alighting, &details.arrival_stop),
        ];
        for (kind, stop) in stops {
            let Some(stop) = stop else { continue };
            if let Some(position) = stop.location {
                markers.push(RenderMarker {
                    kind,
                    position,
                    label: stop.name.clone(),
                });
            }
        }
    }

    let destination = route
        .legs
        .last()
        .and_then(|leg| leg.end_location)
        .or_else(|| route.path.last().copied());
    if let Some(position) = destination {
        markers.push(RenderMarker {
            kind: MarkerKind::Destination,
            position,
            label: None,
        });
    }

    markers
}
