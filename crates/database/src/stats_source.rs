use crate::repository::{DbRepository, PercentileAggregate};
use async_trait::async_trait;
use core_types::ZoneStats;
use valuation::{StatsSource, ValuationError};

/// The live statistics source: resolves zones against the PostgreSQL store.
///
/// Performs one registry lookup plus two independent dataset reads per
/// request. No caching, no retries; a query failure surfaces as
/// `StoreUnavailable`, distinct from the two not-found conditions.
#[derive(Debug, Clone)]
pub struct DbStatsSource {
    repo: DbRepository,
}

impl DbStatsSource {
    pub fn new(repo: DbRepository) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl StatsSource for DbStatsSource {
    async fn resolve(&self, zone: &str, year: i32) -> Result<ZoneStats, ValuationError> {
        let record = self
            .repo
            .find_zone_by_name(zone)
            .await
            .map_err(store_unavailable)?
            .ok_or_else(|| ValuationError::ZoneNotFound(zone.to_string()))?;

        let aggregate = self
            .repo
            .aggregate_percentiles(record.id, year)
            .await
            .map_err(store_unavailable)?;
        let mean_price = self
            .repo
            .mean_price(record.id, year)
            .await
            .map_err(store_unavailable)?;

        zone_stats_from_rows(zone, year, aggregate, mean_price)
    }
}

fn store_unavailable(err: crate::DbError) -> ValuationError {
    ValuationError::StoreUnavailable(err.to_string())
}

/// Combines the two dataset reads into one `ZoneStats`, treating NULL
/// percentiles or a missing mean as a data-coverage gap for the year.
fn zone_stats_from_rows(
    zone: &str,
    year: i32,
    aggregate: PercentileAggregate,
    mean_price: Option<f64>,
) -> Result<ZoneStats, ValuationError> {
    let no_data = || ValuationError::ZoneDataNotFound {
        zone: zone.to_string(),
        year,
    };

    let (Some(p25), Some(p50), Some(p75)) = (aggregate.p25_m2, aggregate.p50_m2, aggregate.p75_m2)
    else {
        return Err(no_data());
    };
    let Some(mean_price_per_m2) = mean_price else {
        return Err(no_data());
    };

    Ok(ZoneStats {
        mean_price_per_m2,
        p25_per_m2: p25,
        p50_per_m2: p50,
        p75_per_m2: p75,
        sample_size: aggregate.sample_size.unwrap_or(0),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn aggregate(p25: Option<f64>, p50: Option<f64>, p75: Option<f64>) -> PercentileAggregate {
        PercentileAggregate {
            p25_m2: p25,
            p50_m2: p50,
            p75_m2: p75,
            sample_size: Some(42),
        }
    }

    #[test]
    fn complete_rows_map_onto_zone_stats() {
        let stats = zone_stats_from_rows(
            "Madrid",
            2026,
            aggregate(Some(1800.0), Some(2200.0), Some(2600.0)),
            Some(2100.0),
        )
        .unwrap();

        assert_eq!(stats.p25_per_m2, 1800.0);
        assert_eq!(stats.p50_per_m2, 2200.0);
        assert_eq!(stats.p75_per_m2, 2600.0);
        assert_eq!(stats.mean_price_per_m2, 2100.0);
        assert_eq!(stats.sample_size, 42);
    }

    #[test]
    fn a_null_percentile_means_no_data_for_the_year() {
        let result = zone_stats_from_rows(
            "Madrid",
            2026,
            aggregate(Some(1800.0), None, Some(2600.0)),
            Some(2100.0),
        );
        assert_matches!(
            result,
            Err(ValuationError::ZoneDataNotFound { zone, year })
                if zone == "Madrid" && year == 2026
        );
    }

    #[test]
    fn a_missing_mean_means_no_data_for_the_year() {
        let result = zone_stats_from_rows(
            "Madrid",
            2024,
            aggregate(Some(1800.0), Some(2200.0), Some(2600.0)),
            None,
        );
        assert_matches!(result, Err(ValuationError::ZoneDataNotFound { year: 2024, .. }));
    }

    #[test]
    fn a_null_sample_size_defaults_to_zero() {
        let mut agg = aggregate(Some(1800.0), Some(2200.0), Some(2600.0));
        agg.sample_size = None;
        let stats = zone_stats_from_rows("Madrid", 2026, agg, Some(2100.0)).unwrap();
        assert_eq!(stats.sample_size, 0);
    }
}
