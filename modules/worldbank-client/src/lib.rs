pub mod error;
pub mod types;

pub use error::{Result, WorldBankError};
pub use types::{DocumentPage, DocumentQuery, PageMeta, WbDocument, WbObservation, WbRef};

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use types::{ErrorEnvelope, RawDocumentPage};

const API_URL: &str = "https://api.worldbank.org/v2";
const SEARCH_URL: &str = "https://search.worldbank.org/api/v2";

/// Rows requested per page from the indicators API.
const PER_PAGE: u32 = 100;

/// Hard stop for runaway pagination.
const MAX_PAGES: u32 = 50;

pub struct WorldBankClient {
    client: reqwest::Client,
    api_url: String,
    search_url: String,
}

impl WorldBankClient {
    pub fn new() -> Result<Self> {
        Self::with_urls(API_URL, SEARCH_URL)
    }

    pub fn with_urls(api_url: &str, search_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            search_url: search_url.trim_end_matches('/').to_string(),
        })
    }

    /// Every observation of `indicator_id` for `country`, across all pages.
    pub async fn indicator(&self, country: &str, indicator_id: &str) -> Result<Vec<WbObservation>> {
        let url = format!(
            "{}/country/{}/indicator/{}",
            self.api_url, country, indicator_id
        );
        let mut observations = Vec::new();
        let mut page = 1u32;

        loop {
            let query = [
                ("format", "json".to_string()),
                ("per_page", PER_PAGE.to_string()),
                ("page", page.to_string()),
            ];
            let body = self.get_json(&url, &query).await?;
            let (meta, rows) = split_indicator_page(body)?;
            tracing::debug!(
                country,
                indicator_id,
                page = meta.page,
                pages = meta.pages,
                rows = rows.len(),
                "Fetched World Bank indicator page"
            );
            observations.extend(rows);

            if meta.page >= meta.pages || page >= MAX_PAGES {
                break;
            }
            page += 1;
        }

        Ok(observations)
    }

    /// Full-text search over the Documents & Reports catalog.
    pub async fn search_documents(&self, query: &DocumentQuery) -> Result<DocumentPage> {
        let url = format!("{}/wds", self.search_url);
        let mut params = vec![
            ("format", "json".to_string()),
            (
                "fl",
                "id,display_title,docdt,docty,url,pdfurl,abstracts".to_string(),
            ),
            ("rows", query.rows.to_string()),
            ("os", query.offset.to_string()),
        ];
        if let Some(q) = query.query.as_deref().filter(|q| !q.trim().is_empty()) {
            params.push(("qterm", q.trim().to_string()));
        }
        if let Some(country) = &query.country {
            params.push(("count_exact", country.clone()));
        }

        let body = self.get_json(&url, &params).await?;
        let raw: RawDocumentPage = serde_json::from_value(body)?;
        let page = raw.into_page();
        tracing::debug!(total = page.total, returned = page.documents.len(), "Searched World Bank documents");
        Ok(page)
    }

    async fn get_json(&self, url: &str, query: &[(&str, String)]) -> Result<serde_json::Value> {
        let resp = self.client.get(url).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(WorldBankError::Api {
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
            return Err(WorldBankError::UnexpectedContentType(content_type));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Split `[meta, rows]`. The API reports bad requests with HTTP 200 and a
/// `[{"message": [...]}]` body, and an empty result as `[meta, null]`.
fn split_indicator_page(body: serde_json::Value) -> Result<(PageMeta, Vec<WbObservation>)> {
    let mut parts = match body {
        serde_json::Value::Array(parts) => parts.into_iter(),
        other => {
            return Err(WorldBankError::Parse(format!(
                "expected a JSON array, got {}",
                json_kind(&other)
            )))
        }
    };

    let head = parts
        .next()
        .ok_or_else(|| WorldBankError::Parse("empty response array".to_string()))?;

    if head.get("message").is_some() {
        let envelope: ErrorEnvelope = serde_json::from_value(head)?;
        let message = envelope
            .message
            .iter()
            .map(|m| format!("{}: {}", m.key, m.value))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(WorldBankError::Api {
            status: 200,
            message,
        });
    }

    let meta: PageMeta = serde_json::from_value(head)?;
    let rows = match parts.next() {
        Some(serde_json::Value::Null) | None => Vec::new(),
        Some(rows) => serde_json::from_value(rows)?,
    };
    Ok((meta, rows))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
