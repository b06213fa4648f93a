use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DevdashError;

// --- Countries ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-3.
    pub code: &'static str,
    pub name: &'static str,
}

pub const KENYA: Country = Country {
    code: "KEN",
    name: "Kenya",
};

/// Countries shown next to Kenya in every comparison set, in display order.
pub const NEIGHBORS: &[Country] = &[
    Country {
        code: "UGA",
        name: "Uganda",
    },
    Country {
        code: "TZA",
        name: "Tanzania",
    },
    Country {
        code: "RWA",
        name: "Rwanda",
    },
    Country {
        code: "ETH",
        name: "Ethiopia",
    },
];

// --- Observations ---

/// A single observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorDataPoint {
    pub year: i32,
    pub value: f64,
}

/// A male/female pair for one year. `total` is the reported both-sexes value
/// when the source has one, otherwise the mean of `male` and `female`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderDataPoint {
    pub year: i32,
    pub male: f64,
    pub female: f64,
    pub total: f64,
}

/// Anything that can sit in a year-ordered series.
pub trait Observation {
    fn year(&self) -> i32;
    /// The number used for trend direction.
    fn headline(&self) -> f64;
}

impl Observation for IndicatorDataPoint {
    fn year(&self) -> i32 {
        self.year
    }

    fn headline(&self) -> f64 {
        self.value
    }
}

impl Observation for GenderDataPoint {
    fn year(&self) -> i32 {
        self.year
    }

    fn headline(&self) -> f64 {
        self.total
    }
}

/// A country's history, newest first, with `current == history[0]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries<P> {
    pub current: P,
    pub history: Vec<P>,
}

impl<P: Observation + Clone> CountrySeries<P> {
    /// Sorts descending by year. `None` for an empty history.
    pub fn from_history(mut history: Vec<P>) -> Option<Self> {
        history.sort_by(|a, b| b.year().cmp(&a.year()));
        let current = history.first()?.clone();
        Some(Self { current, history })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub country: String,
    pub value: f64,
}

/// A hardcoded regional or world reference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StaticAverage {
    pub label: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorResponse<P> {
    pub kenya: CountrySeries<P>,
    pub comparison: Vec<ComparisonPoint>,
    pub trend: Trend,
}

/// The two series shapes an upstream can produce. Decided once at the
/// adapter boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SeriesShape {
    Single { history: Vec<IndicatorDataPoint> },
    Gendered { history: Vec<GenderDataPoint> },
}

impl SeriesShape {
    pub fn len(&self) -> usize {
        match self {
            SeriesShape::Single { history } => history.len(),
            SeriesShape::Gendered { history } => history.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// `filter` query value for sex-disaggregated series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SexFilter {
    Male,
    Female,
    #[default]
    Both,
}

impl FromStr for SexFilter {
    type Err = DevdashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(SexFilter::Male),
            "female" | "f" => Ok(SexFilter::Female),
            "both" | "total" | "" => Ok(SexFilter::Both),
            other => Err(DevdashError::Validation(format!(
                "unknown filter '{other}', expected male, female or both"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_is_most_recent_year() {
        let series = CountrySeries::from_history(vec![
            IndicatorDataPoint {
                year: 2019,
                value: 0.58,
            },
            IndicatorDataPoint {
                year: 2022,
                value: 0.601,
            },
            IndicatorDataPoint {
                year: 2021,
                value: 0.59,
            },
        ])
        .unwrap();

        assert_eq!(series.current, series.history[0]);
        assert_eq!(series.current.year, 2022);
        assert_eq!(
            series.history.iter().map(|p| p.year).collect::<Vec<_>>(),
            vec![2022, 2021, 2019]
        );
    }

    #[test]
    fn empty_history_has_no_series() {
        assert!(CountrySeries::<IndicatorDataPoint>::from_history(vec![]).is_none());
    }

    #[test]
    fn series_shape_is_tagged() {
        let shape = SeriesShape::Single {
            history: vec![IndicatorDataPoint {
                year: 2020,
                value: 1.0,
            }],
        };
        let json = serde_json::to_value(&shape).unwrap();
        assert_eq!(json["shape"], "single");
        assert_eq!(json["history"][0]["year"], 2020);
    }

    #[test]
    fn sex_filter_parsing() {
        assert_eq!("Female".parse::<SexFilter>().unwrap(), SexFilter::Female);
        assert_eq!("".parse::<SexFilter>().unwrap(), SexFilter::Both);
        assert!(matches!(
            "other".parse::<SexFilter>(),
            Err(DevdashError::Validation(_))
        ));
    }
}
