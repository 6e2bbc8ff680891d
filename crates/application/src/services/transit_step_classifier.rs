//! Step classification and styling for map rendering
//!
//! Turns a [`Route`] into one [`RenderSegment`] per step. Transit rides are
//! drawn thick, colored and on top; walking connectors thin, gray, dashed and
//! underneath, so draw order never hides a line behind a footpath.

use domain::{BoundingBox, Coordinate, Route, Step, TravelMode};
use serde::Serialize;

/// Stroke color for walking steps
pub const WALK_STROKE_COLOR: &str = "#9AA0A6";

/// Brand color for transit lines without their own color
pub const DEFAULT_TRANSIT_COLOR: &str = "#1A73E8";

/// How a segment's line is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrokeStyle {
    Solid,
    Dashed,
}

/// A drawable polyline for a single step
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSegment {
    pub leg_index: usize,
    pub step_index: usize,
    pub travel_mode: TravelMode,
    pub path: Vec<Coordinate>,
    /// `None` means the renderer's default color
    pub stroke_color: Option<String>,
    pub stroke_weight: u8,
    pub z_index: u8,
    pub style: StrokeStyle,
    /// Transit line label, e.g. "U2"
    pub label: Option<String>,
}

/// Output of classifying one route
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClassifiedRoute {
    pub segments: Vec<RenderSegment>,
    /// Covers every decoded point of the route; `None` if it has none
    pub bounds: Option<BoundingBox>,
}

/// Stateless classifier; the same route always yields the same output
#[derive(Debug, Clone)]
pub struct TransitStepClassifier {
    default_transit_color: String,
}

impl Default for TransitStepClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_TRANSIT_COLOR)
    }
}

impl TransitStepClassifier {
    /// Create a classifier with a custom fallback transit color
    pub fn new(default_transit_color: impl Into<String>) -> Self {
        Self {
            default_transit_color: default_transit_color.into(),
        }
    }

    /// Classify every step of every leg, in order
    #[must_use]
    pub fn classify(&self, route: &Route) -> ClassifiedRoute {
        let mut bounds = BoundingBox::from_points(&route.path);
        let mut include = |points: &[Coordinate]| {
            if let Some(b) = BoundingBox::from_points(points) {
                bounds = Some(bounds.map_or(b, |acc| acc.union(&b)));
            }
        };

        let mut segments = Vec::with_capacity(route.steps().count());
        for (leg_index, leg) in route.legs.iter().enumerate() {
            include(leg.path.as_slice());
            for (step_index, step) in leg.steps.iter().enumerate() {
                let path = step_path(step);
                include(path.as_slice());
                segments.push(self.segment(leg_index, step_index, step, path));
            }
        }

        ClassifiedRoute { segments, bounds }
    }

    fn segment(
        &self,
        leg_index: usize,
        step_index: usize,
        step: &Step,
        path: Vec<Coordinate>,
    ) -> RenderSegment {
        let details = step.transit_details.as_ref();
        let (stroke_color, stroke_weight, z_index, style) = match step.travel_mode {
            TravelMode::Walk => (
                Some(WALK_STROKE_COLOR.to_string()),
                3,
                1,
                StrokeStyle::Dashed,
            ),
            TravelMode::Transit => (
                Some(
                    details
                        .and_then(|d| d.line_color.clone())
                        .filter(|c| !c.is_empty())
                        .unwrap_or_else(|| self.default_transit_color.clone()),
                ),
                6,
                3,
                StrokeStyle::Solid,
            ),
            TravelMode::Drive | TravelMode::Bicycle | TravelMode::TwoWheeler => {
                (None, 4, 2, StrokeStyle::Solid)
            },
        };

        RenderSegment {
            leg_index,
            step_index,
            travel_mode: step.travel_mode,
            path,
            stroke_color,
            stroke_weight,
            z_index,
            style,
            label: details.and_then(|d| d.line_label()).map(str::to_string),
        }
    }
}

/// Decoded step path, or its start/end locations when it has none
fn step_path(step: &Step) -> Vec<Coordinate> {
    if step.path.is_empty() {
        step.start_location
            .into_iter()
            .chain(step.end_location)
            .collect()
    } else {
        step.path.clone()
    }
}
