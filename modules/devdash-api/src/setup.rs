// Process wiring shared by the `api` and `seed` binaries.

use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use devdash_common::Config;
use devdash_indicators::{CacheTtls, IndicatorService, TtlCache};
use devdash_store::{ContentStore, InMemoryStore, MongoStore};
use gho_client::GhoClient;
use hdro_client::HdroClient;
use worldbank_client::WorldBankClient;

pub fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("devdash=info".parse()?))
        .init();
    Ok(())
}

/// Build the upstream clients and the service that fronts them.
pub fn indicator_service(config: &Config, cache: Arc<TtlCache>) -> Result<IndicatorService> {
    let hdro = HdroClient::with_base_url(&config.hdro_base_url, config.hdro_api_key.clone())?;
    let gho = GhoClient::with_base_url(&config.gho_base_url)?;
    let world_bank =
        WorldBankClient::with_urls(&config.world_bank_api_url, &config.world_bank_search_url)?;

    Ok(
        IndicatorService::new(Arc::new(hdro), Arc::new(gho), Arc::new(world_bank), cache)
            .with_ttls(CacheTtls::from(config)),
    )
}

/// MongoDB when `MONGODB_URI` is set, otherwise an empty in-memory store.
pub async fn content_store(config: &Config) -> Result<Arc<dyn ContentStore>> {
    match &config.mongodb_uri {
        Some(uri) => {
            let store = MongoStore::connect(uri, &config.mongodb_database).await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("MONGODB_URI not set, serving content from an empty in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
    }
}

pub fn log_config(config: &Config) {
    info!(
        hdro = %config.hdro_base_url,
        gho = %config.gho_base_url,
        world_bank = %config.world_bank_api_url,
        cache_ttl_secs = config.cache_ttl.as_secs(),
        catalog_ttl_secs = config.catalog_cache_ttl.as_secs(),
        "Loaded configuration"
    );
}
