use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::info;

use devdash_common::{
    Config, CountrySeries, DevdashError, GenderDataPoint, IndicatorDataPoint, IndicatorResponse,
    Observation, Result, SeriesShape, SexFilter, Trend, KENYA, NEIGHBORS,
};
use gho_client::GhoIndicator;
use worldbank_client::{DocumentPage, DocumentQuery};

use crate::cache::{CacheKey, TtlCache};
use crate::catalog::{self, GenderIndicator, HdroIndicator, WhoIndicator, WorldBankIndicator};
use crate::comparison::build_comparison;
use crate::normalize;
use crate::sources::{GhoSource, HdroSource, WorldBankSource};
use crate::trend::TrendPolicy;

const DEFAULT_DOCUMENT_ROWS: u32 = 20;
const MAX_DOCUMENT_ROWS: u32 = 50;

#[derive(Debug, Clone, Copy)]
pub struct CacheTtls {
    pub default: Duration,
    /// Slow-moving catalogs: the GHO indicator list and SDG goals.
    pub catalog: Duration,
}

impl Default for CacheTtls {
    fn default() -> Self {
        Self {
            default: Duration::from_secs(3600),
            catalog: Duration::from_secs(86_400),
        }
    }
}

impl From<&Config> for CacheTtls {
    fn from(config: &Config) -> Self {
        Self {
            default: config.cache_ttl,
            catalog: config.catalog_cache_ttl,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WhoSeries {
    pub code: &'static str,
    pub name: &'static str,
    pub series: SeriesShape,
    pub trend: Trend,
}

/// Raw query parameters for a documents search. Clamped before use.
#[derive(Debug, Clone, Default)]
pub struct DocumentParams {
    pub q: Option<String>,
    pub rows: Option<u32>,
    pub offset: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorSummary {
    pub slug: &'static str,
    pub label: &'static str,
    pub year: i32,
    pub value: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub indicators: Vec<IndicatorSummary>,
}

/// Fetch, normalize, compare and cache every dashboard indicator.
#[derive(Clone)]
pub struct IndicatorService {
    hdro: Arc<dyn HdroSource>,
    gho: Arc<dyn GhoSource>,
    world_bank: Arc<dyn WorldBankSource>,
    cache: Arc<TtlCache>,
    trend: TrendPolicy,
    ttls: CacheTtls,
}

fn upstream(what: &str, err: impl Display) -> DevdashError {
    DevdashError::Upstream(format!("{what}: {err:#}"))
}

fn require_series<P: Observation + Clone>(slug: &str, history: Vec<P>) -> Result<CountrySeries<P>> {
    CountrySeries::from_history(history)
        .ok_or_else(|| DevdashError::Upstream(format!("{slug}: no Kenya observations")))
}

impl IndicatorService {
    pub fn new(
        hdro: Arc<dyn HdroSource>,
        gho: Arc<dyn GhoSource>,
        world_bank: Arc<dyn WorldBankSource>,
        cache: Arc<TtlCache>,
    ) -> Self {
        Self {
            hdro,
            gho,
            world_bank,
            cache,
            trend: TrendPolicy::default(),
            ttls: CacheTtls::default(),
        }
    }

    pub fn with_ttls(mut self, ttls: CacheTtls) -> Self {
        self.ttls = ttls;
        self
    }

    pub fn with_trend_policy(mut self, trend: TrendPolicy) -> Self {
        self.trend = trend;
        self
    }

    pub fn cache(&self) -> &Arc<TtlCache> {
        &self.cache
    }

    pub fn ttls(&self) -> CacheTtls {
        self.ttls
    }

    // --- HDRO ---

    pub async fn hdro_indicator(
        &self,
        def: &'static HdroIndicator,
    ) -> Result<IndicatorResponse<IndicatorDataPoint>> {
        self.cache
            .get_or_fetch(CacheKey::new("hdro", def.slug), self.ttls.default, move || {
                self.load_hdro(def)
            })
            .await
    }

    async fn load_hdro(
        &self,
        def: &'static HdroIndicator,
    ) -> Result<IndicatorResponse<IndicatorDataPoint>> {
        let fetched = self
            .hdro
            .composite_indices(KENYA.code, def.codes)
            .await
            .map(|records| normalize::hdro_single_series(&records, def.index, def.indicator));
        let history = def
            .fallback
            .resolve(def.slug, fetched)
            .map_err(|e| upstream(def.slug, e))?;
        let kenya = require_series(def.slug, history)?;

        let comparison = build_comparison(
            kenya.current.value,
            NEIGHBORS,
            move |country| async move {
                let records = self.hdro.composite_indices(country.code, def.codes).await?;
                let series = normalize::hdro_single_series(&records, def.index, def.indicator);
                Ok::<_, anyhow::Error>(series.first().map(|p| p.value))
            },
            def.averages,
        )
        .await;

        let trend = self.trend.direction(&kenya.history);
        info!(slug = def.slug, points = kenya.history.len(), "Loaded HDRO indicator");
        Ok(IndicatorResponse {
            kenya,
            comparison,
            trend,
        })
    }

    pub async fn gender_indicator(
        &self,
        def: &'static GenderIndicator,
    ) -> Result<IndicatorResponse<GenderDataPoint>> {
        self.cache
            .get_or_fetch(
                CacheKey::new("hdro-gender", def.slug),
                self.ttls.default,
                move || self.load_gender(def),
            )
            .await
    }

    async fn load_gender(
        &self,
        def: &'static GenderIndicator,
    ) -> Result<IndicatorResponse<GenderDataPoint>> {
        let records = self
            .hdro
            .composite_indices(KENYA.code, def.codes)
            .await
            .map_err(|e| upstream(def.slug, e))?;
        let kenya = require_series(
            def.slug,
            normalize::hdro_gender_series(&records, def.index, &def.keys),
        )?;

        let comparison = build_comparison(
            def.compare.value(&kenya.current),
            NEIGHBORS,
            move |country| async move {
                let records = self.hdro.composite_indices(country.code, def.codes).await?;
                let series = normalize::hdro_gender_series(&records, def.index, &def.keys);
                Ok::<_, anyhow::Error>(series.first().map(|p| def.compare.value(p)))
            },
            def.averages,
        )
        .await;

        let trend = self.trend.direction(&kenya.history);
        info!(slug = def.slug, points = kenya.history.len(), "Loaded gendered indicator");
        Ok(IndicatorResponse {
            kenya,
            comparison,
            trend,
        })
    }

    // --- World Bank ---

    pub async fn worldbank_indicator(
        &self,
        def: &'static WorldBankIndicator,
    ) -> Result<IndicatorResponse<IndicatorDataPoint>> {
        self.cache
            .get_or_fetch(CacheKey::new("worldbank", def.slug), self.ttls.default, move || {
                self.load_worldbank(def)
            })
            .await
    }

    async fn load_worldbank(
        &self,
        def: &'static WorldBankIndicator,
    ) -> Result<IndicatorResponse<IndicatorDataPoint>> {
        let fetched = self
            .world_bank
            .indicator(KENYA.code, def.id)
            .await
            .map(|rows| normalize::worldbank_series(&rows));
        let history = def
            .fallback
            .resolve(def.slug, fetched)
            .map_err(|e| upstream(def.slug, e))?;
        let kenya = require_series(def.slug, history)?;

        let comparison = build_comparison(
            kenya.current.value,
            NEIGHBORS,
            move |country| async move {
                let rows = self.world_bank.indicator(country.code, def.id).await?;
                let series = normalize::worldbank_series(&rows);
                Ok::<_, anyhow::Error>(series.first().map(|p| p.value))
            },
            def.averages,
        )
        .await;

        let trend = self.trend.direction(&kenya.history);
        info!(slug = def.slug, points = kenya.history.len(), "Loaded World Bank indicator");
        Ok(IndicatorResponse {
            kenya,
            comparison,
            trend,
        })
    }

    pub async fn documents(&self, params: DocumentParams) -> Result<DocumentPage> {
        let query = DocumentQuery {
            query: params
                .q
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            rows: params
                .rows
                .unwrap_or(DEFAULT_DOCUMENT_ROWS)
                .clamp(1, MAX_DOCUMENT_ROWS),
            offset: params.offset.unwrap_or(0),
            country: Some(KENYA.name.to_string()),
        };

        self.world_bank
            .search_documents(&query)
            .await
            .map_err(|e| upstream("documents", e))
    }

    // --- WHO ---

    /// The series for one catalog code. The unfiltered shape is cached; the
    /// sex filter is applied on every read.
    pub async fn who_series(&self, def: &'static WhoIndicator, filter: SexFilter) -> Result<WhoSeries> {
        let shape = self
            .cache
            .get_or_fetch(CacheKey::new("who", def.code), self.ttls.default, move || async move {
                let facts = self
                    .gho
                    .facts(def.code, KENYA.code)
                    .await
                    .map_err(|e| upstream(def.code, e))?;
                let shape = normalize::gho_series(&facts);
                if shape.is_empty() {
                    return Err(DevdashError::Upstream(format!(
                        "{}: no Kenya observations",
                        def.code
                    )));
                }
                info!(code = def.code, points = shape.len(), "Loaded WHO indicator");
                Ok(shape)
            })
            .await?;

        let series = normalize::select_sex(shape, filter);
        let trend = match &series {
            SeriesShape::Single { history } => self.trend.direction(history),
            SeriesShape::Gendered { history } => self.trend.direction(history),
        };

        Ok(WhoSeries {
            code: def.code,
            name: def.name,
            series,
            trend,
        })
    }

    /// The upstream GHO indicator list, optionally filtered by name.
    pub async fn who_indicators(&self, search: Option<&str>) -> Result<Vec<GhoIndicator>> {
        let all: Vec<GhoIndicator> = self
            .cache
            .get_or_fetch(CacheKey::new("who", "indicators"), self.ttls.catalog, move || async move {
                self.gho
                    .indicators()
                    .await
                    .map_err(|e| upstream("who indicators", e))
            })
            .await?;

        let needle = search
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());
        Ok(match needle {
            Some(needle) => all
                .into_iter()
                .filter(|i| i.indicator_name.to_lowercase().contains(&needle))
                .collect(),
            None => all,
        })
    }

    // --- Overview ---

    /// Headline numbers for the landing page. One failing indicator fails the
    /// whole overview.
    pub async fn overview(&self) -> Result<Overview> {
        let (hdi, gdi, gii, phdi, gni, parliament) = tokio::try_join!(
            self.hdro_indicator(&catalog::HDI),
            self.hdro_indicator(&catalog::GDI),
            self.hdro_indicator(&catalog::GII),
            self.hdro_indicator(&catalog::PHDI),
            self.worldbank_indicator(&catalog::GNI_PER_CAPITA),
            self.gender_indicator(&catalog::PARLIAMENT),
        )?;

        let single = |slug, label, resp: &IndicatorResponse<IndicatorDataPoint>| IndicatorSummary {
            slug,
            label,
            year: resp.kenya.current.year,
            value: resp.kenya.current.value,
            trend: resp.trend,
        };

        Ok(Overview {
            indicators: vec![
                single(catalog::HDI.slug, catalog::HDI.label, &hdi),
                single(catalog::GDI.slug, catalog::GDI.label, &gdi),
                single(catalog::GII.slug, catalog::GII.label, &gii),
                single(catalog::PHDI.slug, catalog::PHDI.label, &phdi),
                single(catalog::GNI_PER_CAPITA.slug, catalog::GNI_PER_CAPITA.label, &gni),
                IndicatorSummary {
                    slug: catalog::PARLIAMENT.slug,
                    label: catalog::PARLIAMENT.label,
                    year: parliament.kenya.current.year,
                    value: catalog::PARLIAMENT.compare.value(&parliament.kenya.current),
                    trend: parliament.trend,
                },
            ],
        })
    }
}
