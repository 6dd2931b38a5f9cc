use crate::StatsSource;
use crate::error::ValuationError;
use async_trait::async_trait;
use core_types::ZoneStats;

/// A statistics source that serves one constant `ZoneStats` for every zone
/// and year. Used when no live store is configured; the adjustment pipeline
/// on top of it is identical to the live one.
#[derive(Debug, Clone, Copy)]
pub struct FixedStatsSource {
    stats: ZoneStats,
}

impl FixedStatsSource {
    pub fn new(stats: ZoneStats) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl StatsSource for FixedStatsSource {
    async fn resolve(&self, _zone: &str, _year: i32) -> Result<ZoneStats, ValuationError> {
        Ok(self.stats)
    }
}
