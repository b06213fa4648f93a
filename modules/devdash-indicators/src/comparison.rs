use std::fmt::Display;
use std::future::Future;

use devdash_common::{ComparisonPoint, Country, StaticAverage, KENYA};
use tracing::warn;

/// Kenya first, then each neighbor fetched one at a time, then the static
/// averages. A neighbor whose fetch fails or has no data is left out.
pub async fn build_comparison<F, Fut, E>(
    kenya_value: f64,
    neighbors: &[Country],
    mut fetch: F,
    averages: &[StaticAverage],
) -> Vec<ComparisonPoint>
where
    F: FnMut(Country) -> Fut,
    Fut: Future<Output = Result<Option<f64>, E>>,
    E: Display,
{
    let mut points = Vec::with_capacity(1 + neighbors.len() + averages.len());
    points.push(ComparisonPoint {
        country: KENYA.name.to_string(),
        value: kenya_value,
    });

    for &country in neighbors {
        match fetch(country).await {
            Ok(Some(value)) => points.push(ComparisonPoint {
                country: country.name.to_string(),
                value,
            }),
            Ok(None) => {
                warn!(country = country.code, "No data for comparison country, omitting");
            }
            Err(e) => {
                warn!(country = country.code, error = %e, "Comparison fetch failed, omitting");
            }
        }
    }

    points.extend(averages.iter().map(|avg| ComparisonPoint {
        country: avg.label.to_string(),
        value: avg.value,
    }));

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use devdash_common::NEIGHBORS;

    const AVERAGES: &[StaticAverage] = &[
        StaticAverage {
            label: "Sub-Saharan Africa",
            value: 0.549,
        },
        StaticAverage {
            label: "World",
            value: 0.739,
        },
    ];

    #[tokio::test]
    async fn failed_neighbor_is_omitted() {
        let points = build_comparison(
            0.601,
            NEIGHBORS,
            |country| async move {
                match country.code {
                    "TZA" => Err("connection reset"),
                    "ETH" => Ok(None),
                    "UGA" => Ok(Some(0.55)),
                    _ => Ok(Some(0.548)),
                }
            },
            AVERAGES,
        )
        .await;

        let labels: Vec<&str> = points.iter().map(|p| p.country.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Kenya", "Uganda", "Rwanda", "Sub-Saharan Africa", "World"]
        );
        assert_eq!(points[0].value, 0.601);
    }

    #[tokio::test]
    async fn neighbors_are_fetched_in_order() {
        let mut seen = Vec::new();
        build_comparison(
            1.0,
            NEIGHBORS,
            |country| {
                seen.push(country.code);
                async { Ok::<_, String>(Some(1.0)) }
            },
            &[],
        )
        .await;

        assert_eq!(seen, vec!["UGA", "TZA", "RWA", "ETH"]);
    }
}
