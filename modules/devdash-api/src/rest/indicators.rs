use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use devdash_common::{
    DevdashError, GenderDataPoint, IndicatorDataPoint, IndicatorResponse, SexFilter,
};
use devdash_indicators::catalog::{self, GenderIndicator, HdroIndicator, WorldBankIndicator};
use devdash_indicators::{DocumentParams, Overview};
use gho_client::GhoIndicator;
use worldbank_client::DocumentPage;

use crate::error::ApiResult;
use crate::AppState;

// --- Query structs ---

#[derive(Deserialize)]
pub struct DocumentsQuery {
    q: Option<String>,
    rows: Option<u32>,
    offset: Option<u32>,
}

#[derive(Deserialize)]
pub struct WhoQuery {
    indicator: Option<String>,
    filter: Option<String>,
}

#[derive(Deserialize)]
pub struct SearchQuery {
    search: Option<String>,
}

// --- Per-indicator handlers, bound to a catalog entry in `router` ---

pub async fn hdro(
    state: Arc<AppState>,
    def: &'static HdroIndicator,
) -> ApiResult<Json<IndicatorResponse<IndicatorDataPoint>>> {
    Ok(Json(state.indicators.hdro_indicator(def).await?))
}

pub async fn gender(
    state: Arc<AppState>,
    def: &'static GenderIndicator,
) -> ApiResult<Json<IndicatorResponse<GenderDataPoint>>> {
    Ok(Json(state.indicators.gender_indicator(def).await?))
}

pub async fn worldbank(
    state: Arc<AppState>,
    def: &'static WorldBankIndicator,
) -> ApiResult<Json<IndicatorResponse<IndicatorDataPoint>>> {
    Ok(Json(state.indicators.worldbank_indicator(def).await?))
}

// --- Aggregates ---

pub async fn overview(State(state): State<Arc<AppState>>) -> ApiResult<Json<Overview>> {
    Ok(Json(state.indicators.overview().await?))
}

pub async fn documents(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DocumentsQuery>,
) -> ApiResult<Json<DocumentPage>> {
    let page = state
        .indicators
        .documents(DocumentParams {
            q: params.q,
            rows: params.rows,
            offset: params.offset,
        })
        .await?;
    Ok(Json(page))
}

// --- WHO ---

/// Without `indicator`, the compiled catalog. With it, that indicator's
/// Kenya series, optionally narrowed to one sex.
pub async fn who(
    State(state): State<Arc<AppState>>,
    Query(params): Query<WhoQuery>,
) -> ApiResult<Response> {
    let filter: SexFilter = params.filter.as_deref().unwrap_or_default().parse()?;

    let Some(code) = params.indicator.filter(|c| !c.trim().is_empty()) else {
        return Ok(Json(catalog::WHO_INDICATORS).into_response());
    };

    let def = catalog::who_indicator(&code)
        .ok_or_else(|| DevdashError::NotFound(format!("Unknown WHO indicator '{code}'")))?;
    let series = state.indicators.who_series(def, filter).await?;
    Ok(Json(series).into_response())
}

pub async fn who_indicators(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchQuery>,
) -> ApiResult<Json<Vec<GhoIndicator>>> {
    let indicators = state
        .indicators
        .who_indicators(params.search.as_deref())
        .await?;
    Ok(Json(indicators))
}
