//! # Inmo Database Crate
//!
//! This crate acts as a high-level, application-specific interface to the
//! PostgreSQL store that holds the zone registry and the price statistics.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** This crate is an adapter that encapsulates all
//!   database-specific logic. The rest of the application sees the three
//!   statistics queries and the backfill write-side, never SQL.
//! - **Read-mostly:** The valuation path only reads. Writes happen exclusively
//!   during statistics backfills.
//! - **Asynchronous & Pooled:** All operations are asynchronous, and it uses a
//!   connection pool (`PgPool`) for concurrent access. Concurrency control is
//!   the pool's business; nothing above it holds locks.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations at startup.
//! - `DbRepository`: The main struct that holds the connection pool and
//!   provides the data access methods (e.g., `find_zone_by_name`).
//! - `DbStatsSource`: The live `valuation::StatsSource` backed by the store.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod stats_source;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use repository::{DbRepository, DbZone, PercentileAggregate};
pub use stats_source::DbStatsSource;
