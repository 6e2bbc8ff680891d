//! Route planning session
//!
//! Owns the [`RouteSelectionManager`] for one map view. Every `plan` call
//! takes a new request token and drops the routes loaded so far; a response
//! that arrives after a newer call started is discarded instead of replacing
//! the newer routes.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::{Route, RouteRequest};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::ports::RoutingPort;
use crate::services::route_selection::{RenderArena, RouteSelectionManager};
use crate::services::transit_step_classifier::TransitStepClassifier;

/// Snapshot of the session after a successful load or selection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    /// Token of the request that produced the loaded routes
    pub token: u64,
    pub route: Route,
    pub selected_index: usize,
    pub alternatives: usize,
    pub arena: RenderArena,
}

/// Result of a `plan` call
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// Routes were loaded and the first one is active
    Loaded(RoutePlan),
    /// A newer request started while this one was in flight
    Superseded { token: u64 },
}

impl PlanOutcome {
    /// The plan, unless the response was discarded
    pub fn into_plan(self) -> Option<RoutePlan> {
        match self {
            Self::Loaded(plan) => Some(plan),
            Self::Superseded { .. } => None,
        }
    }
}

/// Latest-request-wins route planning over a routing port
pub struct RoutePlanningService {
    routing: Arc<dyn RoutingPort>,
    selection: Mutex<RouteSelectionManager>,
    latest_token: AtomicU64,
    applied_token: AtomicU64,
}

impl std::fmt::Debug for RoutePlanningService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoutePlanningService")
            .field("routing", &"<RoutingPort>")
            .field("latest_token", &self.latest_token.load(Ordering::Relaxed))
            .field("routes", &self.selection.lock().routes().len())
            .finish_non_exhaustive()
    }
}

impl RoutePlanningService {
    #[must_use]
    pub fn new(routing: Arc<dyn RoutingPort>) -> Self {
        Self::with_classifier(routing, TransitStepClassifier::default())
    }

    /// Create a session with a custom step classifier
    #[must_use]
    pub fn with_classifier(routing: Arc<dyn RoutingPort>, classifier: TransitStepClassifier) -> Self {
        Self {
            routing,
            selection: Mutex::new(RouteSelectionManager::new(classifier)),
            latest_token: AtomicU64::new(0),
            applied_token: AtomicU64::new(0),
        }
    }

    /// Compute routes for `request` and make the first one active
    ///
    /// Previously loaded routes are dropped as soon as the call starts, so a
    /// failed request leaves the session empty.
    ///
    /// Returns `Superseded` when another `plan` or `clear` happened while
    /// the provider call was in flight; errors of a superseded call are
    /// discarded as well.
    ///
    /// # Errors
    ///
    /// `EmptyRouteSet` if the provider found nothing, `Provider` for
    /// transport failures. Neither is retried.
    #[instrument(skip(self, request), fields(mode = %request.travel_mode()))]
    pub async fn plan(&self, request: &RouteRequest) -> Result<PlanOutcome, ApplicationError> {
        let token = self.begin();
        debug!(token, "Requesting routes");

        let result = self.routing.compute_routes(request).await;

        if self.is_stale(token) {
            debug!(token, "Discarding superseded route response");
            return Ok(PlanOutcome::Superseded { token });
        }
        let routes = result?;

        let mut selection = self.selection.lock();
        // A newer call may have finished while this one waited for the lock
        if self.is_stale(token) {
            debug!(token, "Discarding superseded route response");
            return Ok(PlanOutcome::Superseded { token });
        }

        selection.load(routes)?;
        self.applied_token.store(token, Ordering::SeqCst);
        info!(
            token,
            alternatives = selection.routes().len(),
            "Routes loaded"
        );

        Self::snapshot(&selection, token).map(PlanOutcome::Loaded)
    }

    /// Activate another alternative of the loaded routes
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` for an unknown alternative.
    pub fn select(&self, index: usize) -> Result<RoutePlan, ApplicationError> {
        let mut selection = self.selection.lock();
        selection.select(index)?;
        Self::snapshot(&selection, self.applied_token.load(Ordering::SeqCst))
    }

    /// Current state of the session
    ///
    /// # Errors
    ///
    /// `EmptyRouteSet` when nothing is loaded.
    pub fn current(&self) -> Result<RoutePlan, ApplicationError> {
        let selection = self.selection.lock();
        Self::snapshot(&selection, self.applied_token.load(Ordering::SeqCst))
    }

    /// Drop the loaded routes and invalidate in-flight requests
    pub fn clear(&self) {
        let token = self.begin();
        debug!(token, "Route session cleared");
    }

    /// Check if the routing provider is reachable
    pub async fn is_available(&self) -> bool {
        self.routing.is_available().await
    }

    /// Take a new token and empty the session
    ///
    /// Both happen under the selection lock so clears land in token order.
    fn begin(&self) -> u64 {
        let mut selection = self.selection.lock();
        let token = self.latest_token.fetch_add(1, Ordering::SeqCst) + 1;
        selection.clear();
        token
    }

    fn is_stale(&self, token: u64) -> bool {
        self.latest_token.load(Ordering::SeqCst) != token
    }

    fn snapshot(selection: &RouteSelectionManager, token: u64) -> Result<RoutePlan, ApplicationError> {
        Ok(RoutePlan {
            token,
            route: selection.active()?.clone(),
            selected_index: selection.selected_index(),
            alternatives: selection.routes().len(),
            arena: selection.arena().clone(),
        })
    }
}
