pub mod error;
pub mod rest;
pub mod setup;

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use devdash_indicators::catalog::{GENDER_INDICATORS, HDRO_INDICATORS, WORLD_BANK_INDICATORS};
use devdash_indicators::IndicatorService;
use devdash_store::ContentStore;

pub struct AppState {
    pub indicators: IndicatorService,
    pub store: Arc<dyn ContentStore>,
}

/// All JSON routes. Per-indicator routes are generated from the catalog.
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        // Health check
        .route("/", get(|| async { "ok" }))
        .route("/api/overview", get(rest::indicators::overview))
        .route("/api/indicators", get(rest::content::indicators))
        .route("/api/indicators/{slug}", get(rest::content::indicator_detail))
        .route("/api/sdg", get(rest::content::sdg))
        .route("/api/sdg/{number}", get(rest::content::sdg_goal))
        .route("/api/documents", get(rest::indicators::documents))
        .route("/api/who", get(rest::indicators::who))
        .route("/api/who/indicators", get(rest::indicators::who_indicators));

    for &def in HDRO_INDICATORS {
        app = app.route(
            &format!("/api/{}", def.slug),
            get(move |State(state): State<Arc<AppState>>| rest::indicators::hdro(state, def)),
        );
    }
    for &def in GENDER_INDICATORS {
        app = app.route(
            &format!("/api/{}", def.slug),
            get(move |State(state): State<Arc<AppState>>| rest::indicators::gender(state, def)),
        );
    }
    for &def in WORLD_BANK_INDICATORS {
        app = app.route(
            &format!("/api/{}", def.slug),
            get(move |State(state): State<Arc<AppState>>| rest::indicators::worldbank(state, def)),
        );
    }

    app.with_state(state)
}
