use thiserror::Error;

#[derive(Error, Debug)]
pub enum ValuationError {
    #[error("Zone not found: {0}")]
    ZoneNotFound(String),

    #[error("No data for zone '{zone}' in year {year}")]
    ZoneDataNotFound { zone: String, year: i32 },

    #[error("The statistics store could not be reached: {0}")]
    StoreUnavailable(String),
}
