use serde::{Deserialize, Deserializer, Serialize};

// --- Indicators API ---

/// First element of every indicators-API response array.
#[derive(Debug, Clone, Deserialize)]
pub struct PageMeta {
    #[serde(deserialize_with = "lenient_u32")]
    pub page: u32,
    #[serde(deserialize_with = "lenient_u32")]
    pub pages: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbRef {
    pub id: String,
    pub value: String,
}

/// One country-year observation of an indicator. `value` is `null` when the
/// World Bank has no estimate for that year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbObservation {
    pub indicator: WbRef,
    pub country: WbRef,
    #[serde(default)]
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

/// Shape of `[{"message": [{"id": "120", "key": "Invalid value", "value": "..."}]}]`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub message: Vec<ErrorMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorMessage {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

// --- Documents & Reports search API ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentQuery {
    pub query: Option<String>,
    pub rows: u32,
    pub offset: u32,
    /// `count_exact` filter; the dashboard pins this to Kenya.
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WbDocument {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub doc_type: Option<String>,
    pub url: Option<String>,
    pub pdf_url: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentPage {
    pub total: u32,
    pub rows: u32,
    pub offset: u32,
    pub documents: Vec<WbDocument>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDocumentPage {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub total: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub rows: u32,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub os: u32,
    /// Keyed by document id, plus a `facets` entry that is not a document.
    #[serde(default)]
    pub documents: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawDocument {
    pub id: String,
    #[serde(default)]
    pub display_title: Option<String>,
    #[serde(default)]
    pub docdt: Option<String>,
    #[serde(default)]
    pub docty: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pdfurl: Option<String>,
    #[serde(default)]
    pub abstracts: Option<serde_json::Value>,
}

impl RawDocument {
    pub(crate) fn into_document(self) -> WbDocument {
        let summary = self.abstracts.and_then(|a| match a {
            serde_json::Value::String(s) => Some(s),
            serde_json::Value::Object(map) => map
                .get("cdata!")
                .and_then(|v| v.as_str())
                .map(|s| s.trim().to_string()),
            _ => None,
        });
        WbDocument {
            title: self.display_title.unwrap_or_else(|| self.id.clone()),
            id: self.id,
            date: self.docdt,
            doc_type: self.docty,
            url: self.url,
            pdf_url: self.pdfurl,
            summary,
        }
    }
}

impl RawDocumentPage {
    pub(crate) fn into_page(self) -> DocumentPage {
        let documents = self
            .documents
            .into_iter()
            .filter(|(key, _)| key != "facets")
            .filter_map(|(_, value)| serde_json::from_value::<RawDocument>(value).ok())
            .map(RawDocument::into_document)
            .collect();
        DocumentPage {
            total: self.total,
            rows: self.rows,
            offset: self.os,
            documents,
        }
    }
}

/// The World Bank APIs mix numeric and string encodings for counters.
fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(match raw {
        serde_json::Value::Number(n) => n.as_u64().unwrap_or(0) as u32,
        serde_json::Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}
