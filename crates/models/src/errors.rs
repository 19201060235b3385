use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid startdate '{0}': expected 8 digits (YYYYMMDD)")]
    InvalidStartdate(String),
}
