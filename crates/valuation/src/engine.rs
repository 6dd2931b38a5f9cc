use crate::StatsSource;
use crate::adjustments;
use crate::error::ValuationError;
use chrono::{Datelike, Utc};
use core_types::{MODEL_VERSION, ValuationRequest, ValuationResult};
use std::sync::Arc;

/// The deterministic pricing pipeline over the three percentile anchors.
///
/// The engine is a stateless calculator: it fetches the zone's statistics
/// fresh from its source, pushes each anchor through the adjustment chain,
/// scales by area, and derives the score and the overvaluation flag. Rounding
/// happens only at the result boundary, never mid-pipeline.
pub struct ValuationEngine {
    stats_source: Arc<dyn StatsSource>,
}

impl ValuationEngine {
    /// Creates an engine bound to one statistics source. The source is fixed
    /// for the lifetime of the engine; swapping sources means constructing a
    /// new engine, never branching inside the pipeline.
    pub fn new(stats_source: Arc<dyn StatsSource>) -> Self {
        Self { stats_source }
    }

    /// Prices a property against the current calendar year's statistics.
    pub async fn estimate(
        &self,
        request: &ValuationRequest,
    ) -> Result<ValuationResult, ValuationError> {
        self.estimate_for_year(request, Utc::now().year()).await
    }

    /// Prices a property against an explicit year's statistics.
    ///
    /// Attribute range validation is a precondition enforced at the boundary;
    /// it is deliberately not re-checked here.
    pub async fn estimate_for_year(
        &self,
        request: &ValuationRequest,
        year: i32,
    ) -> Result<ValuationResult, ValuationError> {
        let stats = self.stats_source.resolve(&request.zone, year).await?;

        let chain = adjustments::chain(request);
        let low = adjustments::apply(&chain, stats.p25_per_m2) * request.area_m2;
        let estimated = adjustments::apply(&chain, stats.p50_per_m2) * request.area_m2;
        let high = adjustments::apply(&chain, stats.p75_per_m2) * request.area_m2;

        // A degenerate or inverted range gets the neutral 0.5 score. This is a
        // defined success-path policy, not an error.
        let score = if high > low {
            ((estimated - low) / (high - low)).clamp(0.0, 1.0)
        } else {
            0.5
        };
        let overvalued = estimated > high;

        Ok(ValuationResult {
            zone: request.zone.clone(),
            price_range_eur: (round2(low), round2(high)),
            estimated_price_eur: round2(estimated),
            overvalued,
            score: round3(score),
            model_version: MODEL_VERSION.to_string(),
        })
    }
}

/// Currency-standard rounding to 2 decimal places, result boundary only.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FixedStatsSource;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use core_types::ZoneStats;
    use std::sync::Mutex;

    fn stats(p25: f64, p50: f64, p75: f64) -> ZoneStats {
        ZoneStats {
            mean_price_per_m2: (p25 + p50 + p75) / 3.0,
            p25_per_m2: p25,
            p50_per_m2: p50,
            p75_per_m2: p75,
            sample_size: 100,
        }
    }

    fn engine(p25: f64, p50: f64, p75: f64) -> ValuationEngine {
        ValuationEngine::new(Arc::new(FixedStatsSource::new(stats(p25, p50, p75))))
    }

    fn request(area_m2: f64, rooms: Option<i32>, year_built: Option<i32>) -> ValuationRequest {
        ValuationRequest {
            zone: "Madrid".to_string(),
            area_m2,
            rooms,
            year_built,
            lat: None,
            lon: None,
        }
    }

    /// A source that always reports the zone as unknown.
    struct UnknownZoneSource;

    #[async_trait]
    impl StatsSource for UnknownZoneSource {
        async fn resolve(&self, zone: &str, _year: i32) -> Result<ZoneStats, ValuationError> {
            Err(ValuationError::ZoneNotFound(zone.to_string()))
        }
    }

    /// A source that records the (zone, year) it was asked for.
    struct RecordingSource {
        seen: Mutex<Option<(String, i32)>>,
    }

    #[async_trait]
    impl StatsSource for RecordingSource {
        async fn resolve(&self, zone: &str, year: i32) -> Result<ZoneStats, ValuationError> {
            *self.seen.lock().unwrap() = Some((zone.to_string(), year));
            Ok(stats(1800.0, 2200.0, 2600.0))
        }
    }

    #[tokio::test]
    async fn unadjusted_request_yields_the_anchor_prices() {
        let result = engine(1800.0, 2200.0, 2600.0)
            .estimate_for_year(&request(80.0, None, None), 2026)
            .await
            .unwrap();

        assert_eq!(result.zone, "Madrid");
        assert_eq!(result.price_range_eur, (144000.0, 208000.0));
        assert_eq!(result.estimated_price_eur, 176000.0);
        assert_eq!(result.score, 0.5);
        assert!(!result.overvalued);
        assert_eq!(result.model_version, MODEL_VERSION);
    }

    #[tokio::test]
    async fn studio_new_build_applies_both_premiums() {
        let result = engine(1800.0, 2200.0, 2600.0)
            .estimate_for_year(&request(50.0, Some(1), Some(2015)), 2026)
            .await
            .unwrap();

        let expected = |anchor: f64| ((anchor * 1.05 * 1.03) * 50.0 * 100.0).round() / 100.0;
        assert_eq!(result.price_range_eur.0, expected(1800.0));
        assert_eq!(result.estimated_price_eur, expected(2200.0));
        assert_eq!(result.price_range_eur.1, expected(2600.0));
        // Identical factors on every anchor keep the estimate's relative
        // position unchanged.
        assert_eq!(result.score, 0.5);
        assert!(!result.overvalued);
    }

    #[tokio::test]
    async fn room_count_boundaries_are_inclusive() {
        let base = engine(1800.0, 2200.0, 2600.0);
        let one = base
            .estimate_for_year(&request(80.0, Some(1), None), 2026)
            .await
            .unwrap();
        let two = base
            .estimate_for_year(&request(80.0, Some(2), None), 2026)
            .await
            .unwrap();
        let four = base
            .estimate_for_year(&request(80.0, Some(4), None), 2026)
            .await
            .unwrap();

        let round2 = |v: f64| (v * 100.0).round() / 100.0;
        assert_eq!(one.estimated_price_eur, round2(2200.0 * 1.05 * 80.0));
        assert_eq!(two.estimated_price_eur, round2(2200.0 * 80.0));
        assert_eq!(four.estimated_price_eur, round2(2200.0 * 0.97 * 80.0));
    }

    #[tokio::test]
    async fn construction_year_boundaries_switch_at_1970_and_2010() {
        let base = engine(1800.0, 2200.0, 2600.0);
        let round2 = |v: f64| (v * 100.0).round() / 100.0;

        for (year_built, factor) in [(1969, 0.94), (1970, 1.0), (2009, 1.0), (2010, 1.03)] {
            let result = base
                .estimate_for_year(&request(80.0, None, Some(year_built)), 2026)
                .await
                .unwrap();
            assert_eq!(
                result.estimated_price_eur,
                round2(2200.0 * factor * 80.0),
                "year_built {year_built}"
            );
        }
    }

    #[tokio::test]
    async fn larger_area_scales_every_bound_proportionally() {
        let base = engine(1800.0, 2200.0, 2600.0);
        let small = base
            .estimate_for_year(&request(50.0, None, None), 2026)
            .await
            .unwrap();
        let large = base
            .estimate_for_year(&request(80.0, None, None), 2026)
            .await
            .unwrap();

        assert!(large.price_range_eur.0 > small.price_range_eur.0);
        assert!(large.estimated_price_eur > small.estimated_price_eur);
        assert!(large.price_range_eur.1 > small.price_range_eur.1);
        let ratio = large.estimated_price_eur / small.estimated_price_eur;
        assert!((ratio - 1.6).abs() < 1e-9);
    }

    #[tokio::test]
    async fn identical_percentiles_fall_back_to_the_neutral_score() {
        let result = engine(2000.0, 2000.0, 2000.0)
            .estimate_for_year(&request(80.0, None, None), 2026)
            .await
            .unwrap();

        assert_eq!(result.score, 0.5);
        // estimated == high, and the flag is strictly greater-than.
        assert!(!result.overvalued);
    }

    #[tokio::test]
    async fn inverted_percentiles_still_produce_a_result() {
        // p75 < p25 in malformed source data: nonsensical but not rejected.
        let result = engine(2600.0, 2400.0, 1800.0)
            .estimate_for_year(&request(80.0, None, None), 2026)
            .await
            .unwrap();

        assert_eq!(result.score, 0.5);
        assert!(result.overvalued);
        assert!(result.price_range_eur.0 > result.price_range_eur.1);
    }

    #[tokio::test]
    async fn score_is_clamped_when_the_median_escapes_the_range() {
        let result = engine(1000.0, 3000.0, 2000.0)
            .estimate_for_year(&request(80.0, None, None), 2026)
            .await
            .unwrap();

        assert_eq!(result.score, 1.0);
        assert!(result.overvalued);
    }

    #[tokio::test]
    async fn identical_requests_yield_identical_results() {
        let base = engine(1800.0, 2200.0, 2600.0);
        let req = request(73.4, Some(3), Some(1995));
        let first = base.estimate_for_year(&req, 2026).await.unwrap();
        let second = base.estimate_for_year(&req, 2026).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn an_unknown_zone_is_surfaced_and_never_defaulted() {
        let base = ValuationEngine::new(Arc::new(UnknownZoneSource));
        let mut req = request(80.0, None, None);
        req.zone = "Atlantis".to_string();

        let result = base.estimate_for_year(&req, 2026).await;
        assert_matches!(result, Err(ValuationError::ZoneNotFound(zone)) if zone == "Atlantis");
    }

    #[tokio::test]
    async fn the_requested_zone_and_year_reach_the_source_unchanged() {
        let source = Arc::new(RecordingSource {
            seen: Mutex::new(None),
        });
        let base = ValuationEngine::new(source.clone());
        base.estimate_for_year(&request(80.0, None, None), 2023)
            .await
            .unwrap();

        let seen = source.seen.lock().unwrap().clone();
        assert_eq!(seen, Some(("Madrid".to_string(), 2023)));
    }
}
