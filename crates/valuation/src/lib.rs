//! # Inmo Valuation Engine
//!
//! This crate contains the pricing logic of the system: resolving a zone's
//! price statistics through a swappable source and transforming them into a
//! price range, a point estimate, an overvaluation flag, and a score.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   databases or HTTP. It depends only on `core-types`.
//! - **Source Agnostic Engine:** By using the `StatsSource` trait, the engine
//!   can price against any statistics provider (the live store, or a fixed
//!   constant source) without knowing its internal details. The source is
//!   chosen at construction time; the adjustment pipeline never branches on it.
//! - **Deterministic:** Given a request and the source's current contents, the
//!   output is fully determined. The engine holds no mutable state, performs
//!   no caching, no retries, and no logging.
//!
//! ## Public API
//!
//! - `StatsSource`: The capability trait all statistics sources implement.
//! - `ValuationEngine`: The adjustment pipeline over the percentile anchors.
//! - `FixedStatsSource`: The constant source for store-less environments.
//! - `ValuationError`: The specific error types that can be returned here.

// Declare all the modules that constitute this crate.
pub mod adjustments;
pub mod engine;
pub mod error;
pub mod fixed;

// Re-export the key components to create a clean, public-facing API.
pub use engine::ValuationEngine;
pub use error::ValuationError;
pub use fixed::FixedStatsSource;

use async_trait::async_trait;
use core_types::ZoneStats;

/// The core capability every statistics source must provide: given a zone
/// name and a target year, produce that zone's canonical per-m² statistics
/// or fail with a named condition.
///
/// Zone matching is a case-insensitive exact match against whatever registry
/// backs the implementation. The `Send + Sync` bounds allow one source to be
/// shared across the server's worker tasks.
#[async_trait]
pub trait StatsSource: Send + Sync {
    /// Resolves the statistics for `zone` in `year`.
    ///
    /// # Returns
    ///
    /// * `Ok(ZoneStats)` - the zone's aggregated statistics for the year.
    /// * `Err(ValuationError::ZoneNotFound)` - no registry entry matches.
    /// * `Err(ValuationError::ZoneDataNotFound)` - the zone exists but has no
    ///   statistics for the requested year.
    /// * `Err(ValuationError::StoreUnavailable)` - the backing store could not
    ///   be queried. Never retried here; the caller decides.
    async fn resolve(&self, zone: &str, year: i32) -> Result<ZoneStats, ValuationError>;
}
