pub mod error;
pub mod types;

pub use error::{GhoError, Result};
pub use types::{GhoFact, GhoIndicator, Sex};

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use types::ODataResponse;

const BASE_URL: &str = "https://ghoapi.azureedge.net/api";

pub struct GhoClient {
    client: reqwest::Client,
    base_url: String,
}

impl GhoClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// All observations of one indicator for one country (ISO3).
    pub async fn facts(&self, indicator_code: &str, country: &str) -> Result<Vec<GhoFact>> {
        let url = format!("{}/{}", self.base_url, indicator_code);
        let filter = format!("SpatialDim eq '{}'", odata_escape(country));
        tracing::debug!(indicator_code, country, "Querying GHO facts");

        let facts: Vec<GhoFact> = self.get_collection(&url, &[("$filter", filter)]).await?;
        tracing::debug!(indicator_code, count = facts.len(), "Fetched GHO facts");
        Ok(facts)
    }

    /// The full indicator dictionary.
    pub async fn indicators(&self) -> Result<Vec<GhoIndicator>> {
        let url = format!("{}/Indicator", self.base_url);
        self.get_collection(&url, &[]).await
    }

    async fn get_collection<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(GhoError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        if !content_type.contains("json") {
            return Err(GhoError::UnexpectedContentType(content_type));
        }

        let body = resp.text().await?;
        let envelope: ODataResponse<T> = serde_json::from_str(&body)?;
        Ok(envelope.value)
    }
}

/// OData string literals escape a single quote by doubling it.
fn odata_escape(raw: &str) -> String {
    raw.replace('\'', "''")
}
