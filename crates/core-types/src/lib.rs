//! # Inmo Core Types
//!
//! This crate is the shared vocabulary of the system. It defines the
//! request/response contract of the valuation service and the zone-level
//! statistics that feed it.
//!
//! ## Architectural Principles
//!
//! - **Layer 0:** This crate sits at the very bottom of the dependency graph.
//!   It knows nothing about databases, HTTP, or the valuation rules themselves.
//! - **Plain Data:** Everything here is a plain, serializable value type that
//!   can cross crate boundaries (and the wire) without ceremony.

pub mod error;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use structs::{MODEL_VERSION, ValuationRequest, ValuationResult, ZoneStats};
