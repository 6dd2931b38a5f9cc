//! # INE API Client
//!
//! A thin client for the Spanish statistics institute's "wstempus" JSON API,
//! used to download the housing price index (IPV) tables that back the
//! `price_index` dataset. Downloading and ingestion live entirely outside the
//! valuation core; this crate only fetches and normalizes series.

use chrono::{DateTime, NaiveDate};

pub mod error;
pub mod responses;

// --- Public API ---
pub use error::IneError;
pub use responses::{DataPoint, SeriesResponse};

/// The production endpoint of the INE JSON API (Spanish locale).
pub const DEFAULT_BASE_URL: &str = "https://servicios.ine.es/wstempus/js/ES";

/// An HTTP client for one INE API host.
#[derive(Debug, Clone)]
pub struct IneClient {
    client: reqwest::Client,
    base_url: String,
}

impl IneClient {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Points the client at an alternate host. Used by tests and mirrors.
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches every series of one JAXI table, e.g. table 25171 for the IPV
    /// index by autonomous community.
    pub async fn fetch_table(&self, table_id: u32) -> Result<Vec<SeriesResponse>, IneError> {
        let url = format!("{}/DATOS_TABLA/{}", self.base_url, table_id);
        tracing::debug!(%url, "Fetching INE table");

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(IneError::Api(format!(
                "unexpected status {} from {}",
                response.status(),
                url
            )));
        }

        let series = response
            .json::<Vec<SeriesResponse>>()
            .await
            .map_err(|e| IneError::Deserialization(e.to_string()))?;

        Ok(series)
    }
}

impl Default for IneClient {
    fn default() -> Self {
        Self::new()
    }
}

/// One usable observation extracted from a series: the zone it belongs to,
/// the calendar period, and the index value.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexRow {
    pub zone: String,
    pub measure: String,
    pub series_code: Option<String>,
    pub period: NaiveDate,
    pub value: f64,
}

/// Flattens the raw series into index rows, dropping confidential and
/// valueless observations. `metric_filter`, when present, keeps only series
/// whose name contains the filter text (case-insensitively); the IPV tables
/// mix index, variation and repeat-sales series under one table id.
pub fn index_rows(series: &[SeriesResponse], metric_filter: Option<&str>) -> Vec<IndexRow> {
    let filter = metric_filter.map(str::to_lowercase);

    series
        .iter()
        .filter(|s| match &filter {
            Some(needle) => s.name.to_lowercase().contains(needle),
            None => true,
        })
        .flat_map(|s| {
            let (zone, measure) = split_zone_and_measure(&s.name);
            s.data.iter().filter_map(move |point| {
                if point.confidential == Some(true) {
                    return None;
                }
                let value = point.value?;
                let period = DateTime::from_timestamp_millis(point.timestamp_ms?)?.date_naive();

                Some(IndexRow {
                    zone: zone.clone(),
                    measure: measure.clone(),
                    series_code: s.code.clone(),
                    period,
                    value,
                })
            })
        })
        .collect()
}

/// Splits an INE series name like "Madrid. Índice. Vivienda nueva." into the
/// zone ("Madrid") and the measure description ("Índice. Vivienda nueva").
fn split_zone_and_measure(name: &str) -> (String, String) {
    let parts: Vec<&str> = name
        .split('.')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();

    match parts.split_first() {
        None => (name.trim().to_string(), String::new()),
        Some((zone, rest)) => (zone.to_string(), rest.join(". ")),
    }
}
