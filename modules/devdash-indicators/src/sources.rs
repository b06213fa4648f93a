// Trait boundary over the upstream clients. IndicatorService only sees these
// traits; production wires in the HTTP clients, tests use in-memory fakes.

use anyhow::Result;
use async_trait::async_trait;

use gho_client::{GhoClient, GhoFact, GhoIndicator};
use hdro_client::{HdroClient, HdroRecord};
use worldbank_client::{DocumentPage, DocumentQuery, WbObservation, WorldBankClient};

#[async_trait]
pub trait HdroSource: Send + Sync {
    async fn composite_indices(&self, country: &str, codes: &[&str]) -> Result<Vec<HdroRecord>>;
}

#[async_trait]
pub trait GhoSource: Send + Sync {
    async fn facts(&self, indicator_code: &str, country: &str) -> Result<Vec<GhoFact>>;
    async fn indicators(&self) -> Result<Vec<GhoIndicator>>;
}

#[async_trait]
pub trait WorldBankSource: Send + Sync {
    async fn indicator(&self, country: &str, indicator_id: &str) -> Result<Vec<WbObservation>>;
    async fn search_documents(&self, query: &DocumentQuery) -> Result<DocumentPage>;
}

#[async_trait]
impl HdroSource for HdroClient {
    async fn composite_indices(&self, country: &str, codes: &[&str]) -> Result<Vec<HdroRecord>> {
        Ok(HdroClient::composite_indices(self, country, codes).await?)
    }
}

#[async_trait]
impl GhoSource for GhoClient {
    async fn facts(&self, indicator_code: &str, country: &str) -> Result<Vec<GhoFact>> {
        Ok(GhoClient::facts(self, indicator_code, country).await?)
    }

    async fn indicators(&self) -> Result<Vec<GhoIndicator>> {
        Ok(GhoClient::indicators(self).await?)
    }
}

#[async_trait]
impl WorldBankSource for WorldBankClient {
    async fn indicator(&self, country: &str, indicator_id: &str) -> Result<Vec<WbObservation>> {
        Ok(WorldBankClient::indicator(self, country, indicator_id).await?)
    }

    async fn search_documents(&self, query: &DocumentQuery) -> Result<DocumentPage> {
        Ok(WorldBankClient::search_documents(self, query).await?)
    }
}
