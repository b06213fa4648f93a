use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use devdash_common::DevdashError;
use devdash_indicators::CacheKey;
use devdash_store::{overall_score, IndicatorFilter, IndicatorRecord, SdgGoal};

use crate::error::ApiResult;
use crate::AppState;

const SDG_KEY: CacheKey = CacheKey::new("store", "sdg");

#[derive(Deserialize)]
pub struct IndicatorsQuery {
    search: Option<String>,
    category: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SdgOverview {
    pub overall_score: Option<f64>,
    pub goals: Vec<SdgGoal>,
}

pub async fn indicators(
    State(state): State<Arc<AppState>>,
    Query(params): Query<IndicatorsQuery>,
) -> ApiResult<Json<Vec<IndicatorRecord>>> {
    let records = state
        .store
        .find_indicators(IndicatorFilter {
            category: params.category,
            search: params.search,
        })
        .await?;
    Ok(Json(records))
}

pub async fn indicator_detail(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> ApiResult<Json<IndicatorRecord>> {
    let record = state
        .store
        .find_indicator(&slug)
        .await?
        .ok_or_else(|| DevdashError::NotFound(format!("Indicator '{slug}' not found")))?;
    Ok(Json(record))
}

/// Cached in the shared cache under the catalog TTL (24h by default), so goals
/// written by `seed sdg` show up only once the entry expires or the process restarts.
pub async fn sdg(State(state): State<Arc<AppState>>) -> ApiResult<Json<SdgOverview>> {
    let ttl = state.indicators.ttls().catalog;
    let store = state.store.clone();
    let overview = state
        .indicators
        .cache()
        .get_or_fetch(SDG_KEY, ttl, move || async move {
            let goals = store.list_sdg_goals().await?;
            Ok::<_, DevdashError>(SdgOverview {
                overall_score: overall_score(&goals),
                goals,
            })
        })
        .await?;
    Ok(Json(overview))
}

pub async fn sdg_goal(
    State(state): State<Arc<AppState>>,
    Path(number): Path<String>,
) -> ApiResult<Json<SdgGoal>> {
    let number: i32 = number
        .trim()
        .parse()
        .ok()
        .filter(|n| (1..=17).contains(n))
        .ok_or_else(|| {
            DevdashError::Validation(format!("Goal number must be 1-17, got '{number}'"))
        })?;

    let goal = state
        .store
        .find_sdg_goal(number)
        .await?
        .ok_or_else(|| DevdashError::NotFound(format!("SDG goal {number} not found")))?;
    Ok(Json(goal))
}
