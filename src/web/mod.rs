//! Dashboard web layer
//!
//! A single page: the tick loop publishes a bundle snapshot into
//! [`AppState`], and `GET /` renders it. The settings form posts back which
//! locations are active and the refresh rate; the tick loop picks both up
//! at the start of its next cycle.

pub mod dashboard;

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::sync::RwLock;

use crate::config::{clamp_refresh, Config};
use crate::models::MetricBundle;

/// State shared between the tick loop and the request handlers
pub struct AppState {
    pub config: Config,
    /// Bundle snapshot published after each tick
    pub latest: RwLock<HashMap<String, MetricBundle>>,
    /// Locations the tick loop currently fetches
    pub selected: RwLock<Vec<String>>,
    pub refresh_secs: AtomicU64,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let selected = config
            .locations
            .iter()
            .map(|location| location.name.clone())
            .collect();
        let refresh = clamp_refresh(config.dashboard.refresh_secs);
        Self {
            config,
            latest: RwLock::new(HashMap::new()),
            selected: RwLock::new(selected),
            refresh_secs: AtomicU64::new(refresh),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(dashboard_page))
        .with_state(state)
}

/// GET / — apply any settings-form changes, then render the dashboard
async fn dashboard_page(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Html<String> {
    // The settings form carries a marker field; a bare page load (or the
    // auto-refresh) must not change the selection
    let submitted = params.iter().any(|(key, _)| key == "sel");
    if submitted {
        let chosen: Vec<String> = state
            .config
            .locations
            .iter()
            .map(|location| location.name.clone())
            .filter(|name| params.iter().any(|(key, value)| key == "loc" && value == name))
            .collect();
        *state.selected.write().await = chosen;
    }

    if let Some((_, value)) = params.iter().find(|(key, _)| key == "refresh") {
        if let Ok(secs) = value.parse::<u64>() {
            state
                .refresh_secs
                .store(clamp_refresh(secs), Ordering::Relaxed);
        }
    }

    let names: Vec<String> = state
        .config
        .locations
        .iter()
        .map(|location| location.name.clone())
        .collect();
    let selected = state.selected.read().await.clone();
    let bundles = state.latest.read().await.clone();
    let refresh = state.refresh_secs.load(Ordering::Relaxed);

    Html(dashboard::render_dashboard(
        &names, &selected, &bundles, refresh,
    ))
}
