//! Application services - Use case implementations

mod health_service;
mod place_search_service;
mod route_planning_service;
mod route_selection;
mod search_radius;
mod transit_step_classifier;

#[cfg(test)]
mod fixtures;

pub use health_service::{HealthConfig, HealthReport, HealthService, ServiceHealth};
pub use place_search_service::PlaceSearchService;
pub use route_planning_service::{PlanOutcome, RoutePlan, RoutePlanningService};
pub use route_selection::{MarkerKind, RenderArena, RenderMarker, RouteSelectionManager};
pub use search_radius::enforce_radius;
pub use transit_step_classifier::{
    ClassifiedRoute, DEFAULT_TRANSIT_COLOR, RenderSegment, StrokeStyle, TransitStepClassifier,
    WALK_STROKE_COLOR,
};
