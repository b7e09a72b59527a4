//! Application assembly.
//!
//! Embedding applications describe their route groups as [`Blueprint`]s and
//! hand them to [`init_app`] together with a [`BlueprintRegistry`]. The
//! registry is an explicit object owned by the caller, so repeated
//! initialization (unit tests in particular) cannot trip over
//! process-global registration state; duplicates are skipped and logged.

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing::{debug, info};

use crate::middleware::auth;
use crate::pages;
use crate::routes;
use crate::state::AppState;

/// Globales Body-Limit (10 MB) – schützt vor übergroßen Requests
const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// A named, self-contained group of routes.
#[derive(Debug, Clone, Copy)]
pub struct Blueprint {
    pub name: &'static str,
    pub build: fn() -> Router<AppState>,
}

/// Tracks which blueprint names have been registered.
#[derive(Debug, Default)]
pub struct BlueprintRegistry {
    names: Vec<&'static str>,
}

impl BlueprintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a blueprint name. Returns false (and logs) when the name was
    /// already registered.
    pub fn add(&mut self, name: &'static str) -> bool {
        if self.names.contains(&name) {
            debug!("Blueprint {} already created", name);
            return false;
        }
        info!("Creating blueprint {}", name);
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| *n == name)
    }
}

fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/readyz", get(routes::health::readyz))
        .route("/version", get(routes::health::version))
}

/// The blueprints every application gets by default.
pub fn default_blueprints() -> Vec<Blueprint> {
    vec![Blueprint { name: "health", build: health_routes }]
}

/// Builds the application router from the default blueprints plus the
/// caller's, wiring up identity resolution, error pages, request tracing
/// and the global body limit.
pub fn init_app(state: &AppState, registry: &mut BlueprintRegistry, blueprints: Vec<Blueprint>) -> Router {
    let mut router = Router::new();
    for blueprint in default_blueprints().into_iter().chain(blueprints) {
        if registry.add(blueprint.name) {
            router = router.merge((blueprint.build)());
        }
    }

    router
        .with_state(state.clone())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(from_fn_with_state(state.config.clone(), pages::error_page_middleware))
        .layer(from_fn_with_state(state.clone(), auth::identify))
}
