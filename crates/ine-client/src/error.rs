use thiserror::Error;

#[derive(Error, Debug)]
pub enum IneError {
    #[error("Failed to build or send the HTTP request: {0}")]
    Request(#[from] reqwest::Error),

    #[error("The INE API returned an error: {0}")]
    Api(String),

    #[error("Failed to deserialize the INE response: {0}")]
    Deserialization(String),
}
