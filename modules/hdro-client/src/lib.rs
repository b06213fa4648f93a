pub mod error;
pub mod types;

pub use error::{HdroError, Result};
pub use types::HdroRecord;

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;

const BASE_URL: &str = "https://hdrdata.org/api";

pub struct HdroClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HdroClient {
    pub fn new(api_key: String) -> Result<Self> {
        Self::with_base_url(BASE_URL, api_key)
    }

    /// Point the client at a different host (mirrors, tests).
    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    /// Query composite-index rows for one country.
    ///
    /// `codes` are the short indicator codes (`hdi`, `le`, `pr_f`, ...). An empty
    /// slice asks for every indicator the API knows for that country.
    pub async fn composite_indices(
        &self,
        country: &str,
        codes: &[&str],
    ) -> Result<Vec<HdroRecord>> {
        let url = format!("{}/CompositeIndices/query", self.base_url);
        let mut query = vec![
            ("apikey", self.api_key.clone()),
            ("countryOrAggregation", country.to_string()),
        ];
        if !codes.is_empty() {
            query.push(("indicator", codes.join(",")));
        }

        tracing::debug!(country, codes = %codes.join(","), "Querying HDRO composite indices");

        let resp = self.client.get(&url).query(&query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(HdroError::Api {
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
            return Err(HdroError::UnexpectedContentType(content_type));
        }

        let body = resp.text().await?;
        let records: Vec<HdroRecord> = serde_json::from_str(&body)?;
        tracing::debug!(country, count = records.len(), "Fetched HDRO records");

        Ok(records)
    }
}
