use core_types::ZoneStats;
use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub application: Application,
    pub server: Server,
    pub valuation: Valuation,
}

/// Application-wide identity and CORS policy.
#[derive(Debug, Clone, Deserialize)]
pub struct Application {
    /// Display name of the service (e.g., "Inmo Analytics").
    pub name: String,
    /// The origins the web server will accept cross-origin requests from.
    /// A single "*" entry allows any origin.
    pub allowed_origins: Vec<String>,
}

/// Bind address for the web server.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

/// Selects and parameterizes the statistics source behind the engine.
#[derive(Debug, Clone, Deserialize)]
pub struct Valuation {
    /// Which statistics source to construct at startup. The engine itself
    /// never branches on this; the choice is made once, at wiring time.
    pub stats_source: StatsSourceKind,
    /// The constant statistics served when no live store is configured.
    pub fixed_stats: FixedStats,
}

/// The two available statistics-source implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsSourceKind {
    /// Resolve zones against the live PostgreSQL store.
    Database,
    /// Serve the configured constant stats regardless of zone name.
    Fixed,
}

/// Constant per-m² statistics for the data-independent mode.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FixedStats {
    pub mean_price_per_m2: f64,
    pub p25_per_m2: f64,
    pub p50_per_m2: f64,
    pub p75_per_m2: f64,
    pub sample_size: i64,
}

impl FixedStats {
    pub fn as_zone_stats(&self) -> ZoneStats {
        ZoneStats {
            mean_price_per_m2: self.mean_price_per_m2,
            p25_per_m2: self.p25_per_m2,
            p50_per_m2: self.p50_per_m2,
            p75_per_m2: self.p75_per_m2,
            sample_size: self.sample_size,
        }
    }
}
