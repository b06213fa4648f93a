use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use devdash_common::{DevdashError, SeriesShape, SexFilter};
use devdash_indicators::catalog::{self, WhoIndicator};
use devdash_indicators::{
    DocumentParams, GhoSource, HdroSource, IndicatorService, TtlCache, WorldBankSource,
};
use gho_client::{GhoFact, GhoIndicator};
use hdro_client::HdroRecord;
use worldbank_client::{DocumentPage, DocumentQuery, WbObservation, WbRef};

// --- Fakes ---

#[derive(Default)]
struct FakeHdro {
    records: HashMap<&'static str, Vec<HdroRecord>>,
    failing: HashSet<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl HdroSource for FakeHdro {
    async fn composite_indices(
        &self,
        country: &str,
        _codes: &[&str],
    ) -> anyhow::Result<Vec<HdroRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.contains(country) {
            anyhow::bail!("HDRO returned 503 for {country}");
        }
        Ok(self.records.get(country).cloned().unwrap_or_default())
    }
}

#[derive(Default)]
struct FakeGho {
    facts: HashMap<&'static str, Vec<GhoFact>>,
    indicators: Vec<GhoIndicator>,
    indicator_calls: AtomicUsize,
}

#[async_trait]
impl GhoSource for FakeGho {
    async fn facts(&self, indicator_code: &str, _country: &str) -> anyhow::Result<Vec<GhoFact>> {
        Ok(self.facts.get(indicator_code).cloned().unwrap_or_default())
    }

    async fn indicators(&self) -> anyhow::Result<Vec<GhoIndicator>> {
        self.indicator_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.indicators.clone())
    }
}

#[derive(Default)]
struct FakeWorldBank {
    observations: HashMap<&'static str, Vec<WbObservation>>,
    last_query: Mutex<Option<DocumentQuery>>,
}

#[async_trait]
impl WorldBankSource for FakeWorldBank {
    async fn indicator(&self, country: &str, _indicator_id: &str) -> anyhow::Result<Vec<WbObservation>> {
        Ok(self.observations.get(country).cloned().unwrap_or_default())
    }

    async fn search_documents(&self, query: &DocumentQuery) -> anyhow::Result<DocumentPage> {
        *self.last_query.lock().unwrap() = Some(query.clone());
        Ok(DocumentPage {
            total: 0,
            rows: query.rows,
            offset: query.offset,
            documents: vec![],
        })
    }
}

// --- Fixtures ---

fn hdro_row(country: &str, index: &str, indicator: &str, year: i32, value: f64) -> HdroRecord {
    HdroRecord {
        country: format!("{country} - {country}"),
        dimension: None,
        index: index.to_string(),
        indicator: indicator.to_string(),
        value: Some(value.to_string()),
        note: None,
        year: Some(year.to_string()),
    }
}

/// Three years of every HDRO series the overview needs, scaled by `base`.
fn hdro_rows(country: &str, base: f64) -> Vec<HdroRecord> {
    let mut rows = Vec::new();
    for (offset, year) in [2020, 2021, 2022].into_iter().enumerate() {
        let step = offset as f64 * 0.01;
        for def in [&catalog::HDI, &catalog::GDI, &catalog::GII, &catalog::PHDI, &catalog::IHDI] {
            rows.push(hdro_row(country, def.index, def.indicator, year, base + step));
        }
        let seats = &catalog::PARLIAMENT;
        rows.push(hdro_row(country, seats.index, seats.keys.female, year, 20.0 + base * 10.0));
        rows.push(hdro_row(country, seats.index, seats.keys.male, year, 80.0 - base * 10.0));
    }
    rows
}

fn gni_rows(country: &str, value: f64) -> Vec<WbObservation> {
    let wb_ref = |id: &str| WbRef {
        id: id.to_string(),
        value: id.to_string(),
    };
    ["2022", "2021"]
        .into_iter()
        .map(|date| WbObservation {
            indicator: wb_ref("NY.GNP.PCAP.CD"),
            country: wb_ref(country),
            countryiso3code: country.to_string(),
            date: date.to_string(),
            value: Some(value),
        })
        .collect()
}

fn gho_fact(year: i32, sex: &str, value: f64) -> GhoFact {
    GhoFact {
        indicator_code: "WHOSIS_000001".to_string(),
        spatial_dim: Some("KEN".to_string()),
        time_dim: Some(year),
        dim1: Some(sex.to_string()),
        numeric_value: Some(value),
        value: None,
    }
}

fn all_countries_hdro() -> FakeHdro {
    let mut hdro = FakeHdro::default();
    for (country, base) in [("KEN", 0.58), ("UGA", 0.53), ("TZA", 0.52), ("RWA", 0.53), ("ETH", 0.48)] {
        hdro.records.insert(country, hdro_rows(country, base));
    }
    hdro
}

fn service(hdro: Arc<FakeHdro>, gho: Arc<FakeGho>, world_bank: Arc<FakeWorldBank>) -> IndicatorService {
    IndicatorService::new(hdro, gho, world_bank, Arc::new(TtlCache::new()))
}

fn countries(points: &[devdash_common::ComparisonPoint]) -> Vec<&str> {
    points.iter().map(|p| p.country.as_str()).collect()
}

// --- HDRO ---

#[tokio::test]
async fn hdi_serves_static_fallback_when_hdro_is_down() {
    let hdro = FakeHdro {
        failing: ["KEN", "UGA", "TZA", "RWA", "ETH"].into_iter().collect(),
        ..Default::default()
    };
    let svc = service(Arc::new(hdro), Arc::default(), Arc::default());

    let resp = svc.hdro_indicator(&catalog::HDI).await.unwrap();

    assert_eq!(resp.kenya.current.year, 2022);
    assert_eq!(resp.kenya.current.value, 0.601);
    assert_eq!(resp.kenya.history.len(), 6);
    // Kenya plus the three averages; every neighbor failed.
    assert_eq!(
        countries(&resp.comparison),
        vec!["Kenya", "East Africa Average", "Africa Average", "World Average"]
    );
}

#[tokio::test]
async fn indicator_without_fallback_propagates_upstream_error() {
    let hdro = FakeHdro {
        failing: ["KEN"].into_iter().collect(),
        ..Default::default()
    };
    let svc = service(Arc::new(hdro), Arc::default(), Arc::default());

    let err = svc.hdro_indicator(&catalog::IHDI).await.unwrap_err();

    assert!(matches!(err, DevdashError::Upstream(_)), "got {err:?}");
}

#[tokio::test]
async fn empty_kenya_series_is_an_upstream_error() {
    let svc = service(Arc::default(), Arc::default(), Arc::default());

    let err = svc.hdro_indicator(&catalog::MPI).await.unwrap_err();

    assert!(matches!(err, DevdashError::Upstream(_)), "got {err:?}");
}

#[tokio::test]
async fn failed_neighbor_is_left_out_of_comparison() {
    let mut hdro = all_countries_hdro();
    hdro.failing.insert("TZA");
    let svc = service(Arc::new(hdro), Arc::default(), Arc::default());

    let resp = svc.hdro_indicator(&catalog::GII).await.unwrap();

    assert_eq!(
        countries(&resp.comparison),
        vec!["Kenya", "Uganda", "Rwanda", "Ethiopia", "Africa Average", "World Average"]
    );
    assert_eq!(resp.comparison[0].value, resp.kenya.current.value);
}

#[tokio::test]
async fn cached_indicator_does_not_hit_upstream_again() {
    let hdro = Arc::new(all_countries_hdro());
    let svc = service(hdro.clone(), Arc::default(), Arc::default());

    let first = svc.hdro_indicator(&catalog::HDI).await.unwrap();
    let calls_after_first = hdro.calls.load(Ordering::SeqCst);
    let second = svc.hdro_indicator(&catalog::HDI).await.unwrap();

    // Kenya plus four neighbors.
    assert_eq!(calls_after_first, 5);
    assert_eq!(hdro.calls.load(Ordering::SeqCst), 5);
    assert_eq!(first, second);
}

#[tokio::test]
async fn parliament_compares_on_female_share() {
    let svc = service(Arc::new(all_countries_hdro()), Arc::default(), Arc::default());

    let resp = svc.gender_indicator(&catalog::PARLIAMENT).await.unwrap();

    assert!((resp.kenya.current.female - 25.8).abs() < 1e-9);
    assert_eq!(resp.comparison[0].value, resp.kenya.current.female);
    assert_eq!(resp.comparison[1].country, "Uganda");
    assert!((resp.comparison[1].value - 25.3).abs() < 1e-9);
    assert!((resp.kenya.current.total - 50.0).abs() < 1e-9);
}

// --- World Bank ---

#[tokio::test]
async fn gni_per_capita_comes_from_world_bank() {
    let mut world_bank = FakeWorldBank::default();
    world_bank.observations.insert("KEN", gni_rows("KEN", 2170.0));
    world_bank.observations.insert("UGA", gni_rows("UGA", 930.0));
    let svc = service(Arc::default(), Arc::default(), Arc::new(world_bank));

    let resp = svc.worldbank_indicator(&catalog::GNI_PER_CAPITA).await.unwrap();

    assert_eq!(resp.kenya.current.year, 2022);
    assert_eq!(resp.kenya.history.len(), 2);
    assert_eq!(&countries(&resp.comparison)[..2], &["Kenya", "Uganda"]);
}

#[tokio::test]
async fn document_rows_are_clamped_and_scoped_to_kenya() {
    let world_bank = Arc::new(FakeWorldBank::default());
    let svc = service(Arc::default(), Arc::default(), world_bank.clone());

    let page = svc
        .documents(DocumentParams {
            q: Some("   ".to_string()),
            rows: Some(500),
            offset: Some(40),
        })
        .await
        .unwrap();

    let query = world_bank.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(query.rows, 50);
    assert_eq!(query.offset, 40);
    assert_eq!(query.query, None);
    assert_eq!(query.country.as_deref(), Some("Kenya"));
    assert_eq!(page.rows, 50);

    svc.documents(DocumentParams::default()).await.unwrap();
    let query = world_bank.last_query.lock().unwrap().clone().unwrap();
    assert_eq!(query.rows, 20);
}

// --- WHO ---

static LIFE_EXPECTANCY: WhoIndicator = WhoIndicator {
    code: "WHOSIS_000001",
    name: "Life expectancy at birth (years)",
};

#[tokio::test]
async fn who_series_is_gendered_and_filterable() {
    let mut gho = FakeGho::default();
    gho.facts.insert(
        "WHOSIS_000001",
        vec![
            gho_fact(2019, "SEX_MLE", 64.5),
            gho_fact(2019, "SEX_FMLE", 69.2),
            gho_fact(2019, "SEX_BTSX", 66.9),
            gho_fact(2015, "SEX_MLE", 62.0),
            gho_fact(2015, "SEX_FMLE", 66.8),
        ],
    );
    let svc = service(Arc::default(), Arc::new(gho), Arc::default());

    let both = svc.who_series(&LIFE_EXPECTANCY, SexFilter::Both).await.unwrap();
    assert!(matches!(both.series, SeriesShape::Gendered { .. }));

    let female = svc.who_series(&LIFE_EXPECTANCY, SexFilter::Female).await.unwrap();
    match female.series {
        SeriesShape::Single { history } => {
            assert_eq!(
                history.iter().map(|p| p.value).collect::<Vec<_>>(),
                vec![69.2, 66.8]
            );
        }
        other => panic!("expected single series, got {other:?}"),
    }
}

#[tokio::test]
async fn who_indicator_search_never_grows_the_cache() {
    let gho = Arc::new(FakeGho {
        indicators: vec![
            GhoIndicator {
                indicator_code: "WHOSIS_000001".to_string(),
                indicator_name: "Life expectancy at birth (years)".to_string(),
                language: Some("EN".to_string()),
            },
            GhoIndicator {
                indicator_code: "MDG_0000000001".to_string(),
                indicator_name: "Infant mortality rate".to_string(),
                language: Some("EN".to_string()),
            },
        ],
        ..Default::default()
    });
    let svc = service(Arc::default(), gho.clone(), Arc::default());

    for i in 0..100 {
        svc.who_indicators(Some(&format!("query-{i}"))).await.unwrap();
    }
    let hits = svc.who_indicators(Some("LIFE")).await.unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].indicator_code, "WHOSIS_000001");
    assert_eq!(svc.who_indicators(None).await.unwrap().len(), 2);
    assert_eq!(svc.cache().len().await, 1);
    assert_eq!(gho.indicator_calls.load(Ordering::SeqCst), 1);
}

// --- Overview ---

#[tokio::test]
async fn overview_summarizes_six_indicators() {
    let mut world_bank = FakeWorldBank::default();
    world_bank.observations.insert("KEN", gni_rows("KEN", 2170.0));
    let svc = service(Arc::new(all_countries_hdro()), Arc::default(), Arc::new(world_bank));

    let overview = svc.overview().await.unwrap();

    let slugs: Vec<_> = overview.indicators.iter().map(|s| s.slug).collect();
    assert_eq!(
        slugs,
        vec!["hdi", "gdi", "gii", "phdi", "gni-per-capita", "parliament"]
    );
    let parliament = &overview.indicators[5];
    assert!((parliament.value - 25.8).abs() < 1e-9);
    assert!(overview.indicators.iter().all(|s| s.year == 2022));
}

#[tokio::test]
async fn overview_fails_when_one_indicator_fails() {
    // No World Bank data for Kenya.
    let svc = service(Arc::new(all_countries_hdro()), Arc::default(), Arc::default());

    let err = svc.overview().await.unwrap_err();

    assert!(matches!(err, DevdashError::Upstream(_)), "got {err:?}");
}
