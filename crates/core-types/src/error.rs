use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid request field '{0}': {1}")]
    InvalidRequest(String, String),
}
