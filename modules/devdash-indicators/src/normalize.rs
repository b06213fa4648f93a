// Normalization: raw upstream rows -> canonical year-keyed series.
//
// Every function here is pure. Rows with a missing value, the ".." sentinel,
// or an unparseable year are dropped without error. Output is newest first
// with at most one point per year (first row wins).

use std::collections::BTreeMap;

use devdash_common::{GenderDataPoint, IndicatorDataPoint, Observation, SeriesShape, SexFilter};
use gho_client::{GhoFact, Sex};
use hdro_client::HdroRecord;
use worldbank_client::WbObservation;

/// Upstream marker for "no observation".
pub const MISSING_SENTINEL: &str = "..";

/// Indicator names of a male/female pair within one HDRO index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenderKeys {
    pub male: &'static str,
    pub female: &'static str,
    /// Reported both-sexes series, when the source has one.
    pub total: Option<&'static str>,
}

fn parse_value(raw: Option<&str>) -> Option<f64> {
    let raw = raw?.trim();
    if raw.is_empty() || raw == MISSING_SENTINEL {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_year(raw: Option<&str>) -> Option<i32> {
    raw?.trim().parse().ok()
}

fn newest_first<P: Observation>(points: impl IntoIterator<Item = P>) -> Vec<P> {
    let mut by_year: BTreeMap<i32, P> = BTreeMap::new();
    for point in points {
        by_year.entry(point.year()).or_insert(point);
    }
    by_year.into_values().rev().collect()
}

/// Rows matching exactly `(index, indicator)`.
pub fn hdro_single_series(
    records: &[HdroRecord],
    index: &str,
    indicator: &str,
) -> Vec<IndicatorDataPoint> {
    newest_first(
        records
            .iter()
            .filter(|r| r.index == index && r.indicator == indicator)
            .filter_map(|r| {
                Some(IndicatorDataPoint {
                    year: parse_year(r.year.as_deref())?,
                    value: parse_value(r.value.as_deref())?,
                })
            }),
    )
}

/// Male and female rows paired by year. A year missing either side is dropped.
pub fn hdro_gender_series(
    records: &[HdroRecord],
    index: &str,
    keys: &GenderKeys,
) -> Vec<GenderDataPoint> {
    let mut male = BTreeMap::new();
    let mut female = BTreeMap::new();
    let mut total = BTreeMap::new();

    for record in records.iter().filter(|r| r.index == index) {
        let (Some(year), Some(value)) = (
            parse_year(record.year.as_deref()),
            parse_value(record.value.as_deref()),
        ) else {
            continue;
        };

        let target = if record.indicator == keys.male {
            &mut male
        } else if record.indicator == keys.female {
            &mut female
        } else if keys.total == Some(record.indicator.as_str()) {
            &mut total
        } else {
            continue;
        };
        target.entry(year).or_insert(value);
    }

    pair_by_year(&male, &female, &total)
}

fn pair_by_year(
    male: &BTreeMap<i32, f64>,
    female: &BTreeMap<i32, f64>,
    total: &BTreeMap<i32, f64>,
) -> Vec<GenderDataPoint> {
    male.iter()
        .rev()
        .filter_map(|(&year, &male)| {
            let female = *female.get(&year)?;
            let total = total
                .get(&year)
                .copied()
                .unwrap_or((male + female) / 2.0);
            Some(GenderDataPoint {
                year,
                male,
                female,
                total,
            })
        })
        .collect()
}

pub fn worldbank_series(rows: &[WbObservation]) -> Vec<IndicatorDataPoint> {
    newest_first(rows.iter().filter_map(|row| {
        Some(IndicatorDataPoint {
            year: parse_year(Some(row.date.as_str()))?,
            value: row.value.filter(|v| v.is_finite())?,
        })
    }))
}

/// Decide the series shape once. Any male or female row makes it gendered,
/// with `SEX_BTSX` rows supplying the reported total. A single series only
/// takes rows with no `Dim1` or `SEX_BTSX`; rows split by any other dimension
/// are dropped.
pub fn gho_series(facts: &[GhoFact]) -> SeriesShape {
    let observed = facts.iter().filter_map(|fact| {
        let year = fact.time_dim?;
        let value = fact.numeric_value.filter(|v| v.is_finite())?;
        Some((fact, year, value))
    });

    let gendered = facts
        .iter()
        .any(|f| matches!(f.sex(), Some(Sex::Male) | Some(Sex::Female)));

    if gendered {
        let mut male = BTreeMap::new();
        let mut female = BTreeMap::new();
        let mut total = BTreeMap::new();
        for (fact, year, value) in observed {
            let target = match fact.sex() {
                Some(Sex::Male) => &mut male,
                Some(Sex::Female) => &mut female,
                Some(Sex::BothSexes) => &mut total,
                None => continue,
            };
            target.entry(year).or_insert(value);
        }
        SeriesShape::Gendered {
            history: pair_by_year(&male, &female, &total),
        }
    } else {
        SeriesShape::Single {
            history: newest_first(
                observed
                    .filter(|(fact, _, _)| {
                        fact.dim1.is_none() || fact.sex() == Some(Sex::BothSexes)
                    })
                    .map(|(_, year, value)| IndicatorDataPoint { year, value }),
            ),
        }
    }
}

/// Project a gendered series onto one sex. Single series carry no sex
/// breakdown and pass through unchanged.
pub fn select_sex(shape: SeriesShape, filter: SexFilter) -> SeriesShape {
    match (shape, filter) {
        (SeriesShape::Gendered { history }, SexFilter::Male) => SeriesShape::Single {
            history: history
                .iter()
                .map(|p| IndicatorDataPoint {
                    year: p.year,
                    value: p.male,
                })
                .collect(),
        },
        (SeriesShape::Gendered { history }, SexFilter::Female) => SeriesShape::Single {
            history: history
                .iter()
                .map(|p| IndicatorDataPoint {
                    year: p.year,
                    value: p.female,
                })
                .collect(),
        },
        (shape, _) => shape,
    }
}
