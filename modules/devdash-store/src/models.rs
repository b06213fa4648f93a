use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use devdash_common::IndicatorDataPoint;

/// One persisted indicator, collection `indicators`. Unique by `slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    pub slug: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub unit: String,
    /// Upstream the series was seeded from, e.g. `hdro` or `worldbank`.
    pub source: String,
    #[serde(default)]
    pub data: Vec<IndicatorDataPoint>,
    pub updated_at: DateTime<Utc>,
}

/// A Sustainable Development Goal, collection `sdggoals`. Unique by
/// `number` (1-17) and by `slug`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgGoal {
    pub number: i32,
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Percent of the way to the 2030 target.
    pub progress: f64,
    pub color: String,
    #[serde(default)]
    pub indicators: Vec<SdgTarget>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgTarget {
    pub code: String,
    pub name: String,
    pub value: Option<f64>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndicatorFilter {
    pub category: Option<String>,
    pub search: Option<String>,
}

impl IndicatorFilter {
    /// Blank strings count as absent.
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| {
            v.map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        Self {
            category: clean(self.category),
            search: clean(self.search),
        }
    }
}
