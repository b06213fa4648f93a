use std::sync::Arc;

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use devdash_api::{router, AppState};
use devdash_indicators::{GhoSource, HdroSource, IndicatorService, TtlCache, WorldBankSource};
use devdash_store::{ContentStore, InMemoryStore, SdgGoal};
use gho_client::{GhoFact, GhoIndicator};
use hdro_client::HdroRecord;
use worldbank_client::{DocumentPage, DocumentQuery, WbObservation};

// Every upstream is down.
struct DownHdro;

#[async_trait]
impl HdroSource for DownHdro {
    async fn composite_indices(&self, _: &str, _: &[&str]) -> anyhow::Result<Vec<HdroRecord>> {
        anyhow::bail!("HDRO returned 503 Service Unavailable")
    }
}

struct StubGho;

#[async_trait]
impl GhoSource for StubGho {
    async fn facts(&self, _: &str, _: &str) -> anyhow::Result<Vec<GhoFact>> {
        anyhow::bail!("GHO timed out")
    }

    async fn indicators(&self) -> anyhow::Result<Vec<GhoIndicator>> {
        Ok(vec![GhoIndicator {
            indicator_code: "WHOSIS_000001".to_string(),
            indicator_name: "Life expectancy at birth (years)".to_string(),
            language: None,
        }])
    }
}

struct DownWorldBank;

#[async_trait]
impl WorldBankSource for DownWorldBank {
    async fn indicator(&self, _: &str, _: &str) -> anyhow::Result<Vec<WbObservation>> {
        anyhow::bail!("World Bank unreachable")
    }

    async fn search_documents(&self, _: &DocumentQuery) -> anyhow::Result<DocumentPage> {
        anyhow::bail!("World Bank unreachable")
    }
}

fn goal(number: i32, progress: f64) -> SdgGoal {
    SdgGoal {
        number,
        slug: format!("goal-{number}"),
        title: format!("Goal {number}"),
        description: String::new(),
        progress,
        color: "#000000".to_string(),
        indicators: vec![],
    }
}

fn state(goals: Vec<SdgGoal>) -> Arc<AppState> {
    let indicators = IndicatorService::new(
        Arc::new(DownHdro),
        Arc::new(StubGho),
        Arc::new(DownWorldBank),
        Arc::new(TtlCache::new()),
    );
    Arc::new(AppState {
        indicators,
        store: Arc::new(InMemoryStore::with_data(vec![], goals)),
    })
}

async fn get(state: &Arc<AppState>, uri: &str) -> (StatusCode, Value) {
    let response = router(state.clone())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn health_check_is_ok() {
    let response = router(state(vec![]))
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn upstream_failure_is_500_with_details() {
    let (status, body) = get(&state(vec![]), "/api/ihdi").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
    assert!(body["details"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn hdi_falls_back_when_upstream_is_down() {
    let (status, body) = get(&state(vec![]), "/api/hdi").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kenya"]["current"]["year"], 2022);
    assert_eq!(body["kenya"]["history"].as_array().unwrap().len(), 6);
    assert_eq!(body["comparison"][0]["country"], "Kenya");
}

#[tokio::test]
async fn every_catalog_route_is_registered() {
    let state = state(vec![]);
    for slug in [
        "ihdi", "phdi", "gdi", "gii", "mpi", "life-expectancy", "co2-emissions", "parliament",
        "gni-per-capita",
    ] {
        let (status, _) = get(&state, &format!("/api/{slug}")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{slug}");
    }
    let (status, _) = get(&state, "/api/not-an-indicator").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn who_without_indicator_lists_catalog() {
    let (status, body) = get(&state(vec![]), "/api/who").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 7);
    assert_eq!(body[0]["code"], "WHOSIS_000001");
}

#[tokio::test]
async fn unknown_who_indicator_is_404() {
    let (status, body) = get(&state(vec![]), "/api/who?indicator=NOT_A_CODE").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("NOT_A_CODE"));
}

#[tokio::test]
async fn bad_who_filter_is_400() {
    let (status, body) = get(&state(vec![]), "/api/who?indicator=WHOSIS_000001&filter=sideways").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn who_indicator_search_keeps_cache_bounded() {
    let state = state(vec![]);

    for i in 0..25 {
        let (status, body) = get(&state, &format!("/api/who/indicators?search=term{i}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 0);
    }
    let (_, body) = get(&state, "/api/who/indicators?search=life").await;

    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(state.indicators.cache().len().await, 1);
}

#[tokio::test]
async fn unknown_stored_indicator_is_404() {
    let (status, body) = get(&state(vec![]), "/api/indicators/cpi").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn stored_indicators_list_is_empty_without_data() {
    let (status, body) = get(&state(vec![]), "/api/indicators?search=health&category=").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn sdg_overview_reports_rounded_mean() {
    let state = state(vec![goal(2, 60.0), goal(1, 50.0), goal(3, 70.25)]);

    let (status, body) = get(&state, "/api/sdg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["overall_score"], 60.1);
    assert_eq!(body["goals"][0]["number"], 1);
}

#[tokio::test]
async fn sdg_overview_is_served_from_cache_after_store_writes() {
    let state = state(vec![goal(1, 50.0)]);

    let (_, before) = get(&state, "/api/sdg").await;
    state.store.upsert_sdg_goal(&goal(2, 70.0)).await.unwrap();
    let (status, after) = get(&state, "/api/sdg").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(after, before);
    assert_eq!(after["goals"].as_array().unwrap().len(), 1);
    assert_eq!(state.store.list_sdg_goals().await.unwrap().len(), 2);
}

#[tokio::test]
async fn sdg_goal_lookup_validates_range() {
    let state = state(vec![goal(5, 55.2)]);

    let (ok, body) = get(&state, "/api/sdg/5").await;
    let (missing, _) = get(&state, "/api/sdg/6").await;
    let (out_of_range, _) = get(&state, "/api/sdg/18").await;
    let (not_a_number, _) = get(&state, "/api/sdg/five").await;

    assert_eq!(ok, StatusCode::OK);
    assert_eq!(body["slug"], "goal-5");
    assert_eq!(missing, StatusCode::NOT_FOUND);
    assert_eq!(out_of_range, StatusCode::BAD_REQUEST);
    assert_eq!(not_a_number, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn documents_upstream_failure_is_500() {
    let (status, body) = get(&state(vec![]), "/api/documents?q=health&rows=10").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].is_string());
}
