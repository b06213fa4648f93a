//! Offline seed tool for the document store.
//!
//! Fetches catalog indicators through the same adapters the API uses and
//! upserts them by slug, and upserts the 17 SDG goals.

use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use devdash_api::setup;
use devdash_common::{Config, IndicatorDataPoint};
use devdash_indicators::catalog::{GENDER_INDICATORS, HDRO_INDICATORS, WORLD_BANK_INDICATORS};
use devdash_indicators::{IndicatorService, TtlCache};
use devdash_store::{ContentStore, IndicatorRecord, MongoStore, SDG_GOALS};

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the devdash document store")]
struct Cli {
    /// Fetch and log without writing
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Clone, Copy, PartialEq, Eq)]
enum Commands {
    /// Fetch every HDRO and World Bank indicator and upsert it by slug
    Indicators,
    /// Upsert the 17 SDG goals
    Sdg,
    /// Both of the above
    All,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup::init_tracing()?;

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let store: Option<MongoStore> = match (&config.mongodb_uri, cli.dry_run) {
        (_, true) => None,
        (Some(uri), false) => {
            let store = MongoStore::connect(uri, &config.mongodb_database).await?;
            store.ensure_indexes().await?;
            Some(store)
        }
        (None, false) => bail!("MONGODB_URI is required unless --dry-run is given"),
    };
    let store = store.as_ref().map(|s| s as &dyn ContentStore);

    if matches!(cli.command, Commands::Indicators | Commands::All) {
        let service = setup::indicator_service(&config, Arc::new(TtlCache::new()))?;
        seed_indicators(&service, store).await?;
    }
    if matches!(cli.command, Commands::Sdg | Commands::All) {
        seed_goals(store).await?;
    }

    Ok(())
}

fn record(
    slug: &str,
    name: &str,
    description: &str,
    category: &str,
    unit: &str,
    source: &str,
    data: Vec<IndicatorDataPoint>,
) -> IndicatorRecord {
    IndicatorRecord {
        slug: slug.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        unit: unit.to_string(),
        source: source.to_string(),
        data,
        updated_at: Utc::now(),
    }
}

async fn seed_indicators(service: &IndicatorService, store: Option<&dyn ContentStore>) -> Result<()> {
    let mut records = Vec::new();
    let mut failed = 0usize;

    for &def in HDRO_INDICATORS {
        match service.hdro_indicator(def).await {
            Ok(resp) => records.push(record(
                def.slug,
                def.label,
                def.description,
                def.category,
                def.unit,
                "hdro",
                resp.kenya.history,
            )),
            Err(e) => {
                warn!(slug = def.slug, error = %e, "Skipping indicator");
                failed += 1;
            }
        }
    }

    for &def in GENDER_INDICATORS {
        match service.gender_indicator(def).await {
            Ok(resp) => {
                let data = resp
                    .kenya
                    .history
                    .iter()
                    .map(|p| IndicatorDataPoint {
                        year: p.year,
                        value: def.compare.value(p),
                    })
                    .collect();
                records.push(record(
                    def.slug,
                    def.label,
                    def.description,
                    def.category,
                    def.unit,
                    "hdro",
                    data,
                ));
            }
            Err(e) => {
                warn!(slug = def.slug, error = %e, "Skipping indicator");
                failed += 1;
            }
        }
    }

    for &def in WORLD_BANK_INDICATORS {
        match service.worldbank_indicator(def).await {
            Ok(resp) => records.push(record(
                def.slug,
                def.label,
                def.description,
                def.category,
                def.unit,
                "worldbank",
                resp.kenya.history,
            )),
            Err(e) => {
                warn!(slug = def.slug, error = %e, "Skipping indicator");
                failed += 1;
            }
        }
    }

    for record in &records {
        info!(slug = %record.slug, points = record.data.len(), "Indicator fetched");
        if let Some(store) = store {
            store.upsert_indicator(record).await?;
        }
    }

    info!(
        seeded = records.len(),
        failed,
        dry_run = store.is_none(),
        "Indicator seed complete"
    );
    Ok(())
}

async fn seed_goals(store: Option<&dyn ContentStore>) -> Result<()> {
    for def in SDG_GOALS {
        let goal = def.to_goal();
        info!(number = goal.number, slug = %goal.slug, progress = goal.progress, "SDG goal");
        if let Some(store) = store {
            store.upsert_sdg_goal(&goal).await?;
        }
    }
    info!(count = SDG_GOALS.len(), dry_run = store.is_none(), "SDG seed complete");
    Ok(())
}
