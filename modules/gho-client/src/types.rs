use serde::{Deserialize, Serialize};

/// OData envelope: every GHO collection comes back as `{"value": [...]}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ODataResponse<T> {
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// A single observation row from an indicator collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GhoFact {
    #[serde(default)]
    pub indicator_code: String,
    #[serde(default)]
    pub spatial_dim: Option<String>,
    #[serde(default)]
    pub time_dim: Option<i32>,
    #[serde(default)]
    pub dim1: Option<String>,
    #[serde(default)]
    pub numeric_value: Option<f64>,
    /// Display string, e.g. `"66.1 [64.2-67.9]"`.
    #[serde(default)]
    pub value: Option<String>,
}

impl GhoFact {
    pub fn sex(&self) -> Option<Sex> {
        self.dim1.as_deref().and_then(Sex::from_dim)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GhoIndicator {
    pub indicator_code: String,
    pub indicator_name: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// The `SEX` dimension values GHO uses in `Dim1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    BothSexes,
}

impl Sex {
    pub fn from_dim(dim: &str) -> Option<Self> {
        match dim {
            "SEX_MLE" | "MLE" => Some(Sex::Male),
            "SEX_FMLE" | "FMLE" => Some(Sex::Female),
            "SEX_BTSX" | "BTSX" => Some(Sex::BothSexes),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_odata_fact_rows() {
        let resp: ODataResponse<GhoFact> = serde_json::from_str(
            r#"{
                "@odata.context": "https://ghoapi.azureedge.net/api/$metadata#WHOSIS_000001",
                "value": [
                    {"Id": 1, "IndicatorCode": "WHOSIS_000001", "SpatialDim": "KEN",
                     "TimeDim": 2019, "Dim1": "SEX_FMLE", "NumericValue": 69.2,
                     "Value": "69.2"},
                    {"Id": 2, "IndicatorCode": "WHOSIS_000001", "SpatialDim": "KEN",
                     "TimeDim": 2019, "Dim1": null, "NumericValue": null, "Value": ""}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(resp.value.len(), 2);
        assert_eq!(resp.value[0].sex(), Some(Sex::Female));
        assert_eq!(resp.value[0].time_dim, Some(2019));
        assert_eq!(resp.value[1].numeric_value, None);
        assert_eq!(resp.value[1].sex(), None);
    }
}
