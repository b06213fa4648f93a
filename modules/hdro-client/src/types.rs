use serde::{Deserialize, Deserializer, Serialize};

/// One flat row from `/CompositeIndices/query`.
///
/// The API reports every observation as a string (including the `".."`
/// sentinel for missing values), but some mirrors emit plain numbers, so
/// `value` and `year` accept either and are kept as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HdroRecord {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub index: String,
    #[serde(default)]
    pub indicator: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub value: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
