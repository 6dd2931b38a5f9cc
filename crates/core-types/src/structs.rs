use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Identifier of the adjustment ruleset currently in effect. Bumped whenever
/// the numeric policy of the valuation pipeline changes.
pub const MODEL_VERSION: &str = "baseline-0.2";

/// The canonical per-m² price statistics for one zone and one year.
///
/// This is the output of a statistics source. It is recomputed for every
/// request and never cached or persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneStats {
    /// Arithmetic mean of the price index over the zone/year.
    pub mean_price_per_m2: f64,
    /// 25th percentile of listing price per m².
    pub p25_per_m2: f64,
    /// 50th percentile (median) of listing price per m².
    pub p50_per_m2: f64,
    /// 75th percentile of listing price per m².
    pub p75_per_m2: f64,
    /// Number of underlying observations backing the percentiles.
    ///
    /// The ordering `p25 <= p50 <= p75` is expected of the source data but is
    /// deliberately NOT enforced here; the engine tolerates violations.
    pub sample_size: i64,
}

/// A caller's request for a valuation of a single property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationRequest {
    /// Name of the zone or municipality. Matched case-insensitively.
    pub zone: String,
    /// Usable surface of the property in m². Must be strictly positive.
    pub area_m2: f64,
    /// Number of rooms, if known.
    #[serde(default)]
    pub rooms: Option<i32>,
    /// Construction year, if known.
    #[serde(default)]
    pub year_built: Option<i32>,
    /// Reserved for future spatial refinement; currently unused by the engine.
    #[serde(default)]
    pub lat: Option<f64>,
    /// Reserved for future spatial refinement; currently unused by the engine.
    #[serde(default)]
    pub lon: Option<f64>,
}

impl ValuationRequest {
    /// Validates the attribute ranges of the request.
    ///
    /// This is a boundary check: it runs where requests enter the system,
    /// never inside the valuation engine itself.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.zone.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "zone".to_string(),
                "must not be empty".to_string(),
            ));
        }
        if !(self.area_m2 > 0.0) {
            return Err(CoreError::InvalidRequest(
                "area_m2".to_string(),
                "must be greater than 0".to_string(),
            ));
        }
        if let Some(rooms) = self.rooms {
            if rooms < 0 {
                return Err(CoreError::InvalidRequest(
                    "rooms".to_string(),
                    "must be 0 or greater".to_string(),
                ));
            }
        }
        if let Some(year_built) = self.year_built {
            if year_built < 1800 {
                return Err(CoreError::InvalidRequest(
                    "year_built".to_string(),
                    "must be 1800 or later".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// The outcome of a valuation: an absolute price range plus a point estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Echo of the requested zone name.
    pub zone: String,
    /// Absolute (low, high) bounds in euros, derived from the p25/p75 anchors.
    pub price_range_eur: (f64, f64),
    /// Point estimate in euros, derived from the p50 anchor.
    pub estimated_price_eur: f64,
    /// Whether the point estimate exceeds the high bound.
    pub overvalued: bool,
    /// Normalized position of the estimate inside the range, in [0.0, 1.0].
    pub score: f64,
    /// The adjustment ruleset that produced this result.
    pub model_version: String,
}
