use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("index {index} is out of range for {len} images")]
    IndexOutOfRange { index: i64, len: usize },
    #[error("no image found for date {0}")]
    DateNotFound(String),
    #[error("store read error: {0}")]
    StoreRead(String),
    #[error("store write error: {0}")]
    StoreWrite(String),
    #[error("upstream fetch error: {0}")]
    UpstreamFetch(String),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self { Self::Validation(msg.into()) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::IndexOutOfRange { .. } => 1101,
            ServiceError::DateNotFound(_) => 1102,
            ServiceError::StoreRead(_) => 1201,
            ServiceError::StoreWrite(_) => 1202,
            ServiceError::UpstreamFetch(_) => 1301,
        }
    }

    /// Short label used as a metrics dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Validation(_) => "validation",
            ServiceError::IndexOutOfRange { .. } => "index_out_of_range",
            ServiceError::DateNotFound(_) => "date_not_found",
            ServiceError::StoreRead(_) => "store_read",
            ServiceError::StoreWrite(_) => "store_write",
            ServiceError::UpstreamFetch(_) => "upstream_fetch",
        }
    }

    /// Caller asked for something that does not exist or is malformed.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::Validation(_) | ServiceError::IndexOutOfRange { .. } | ServiceError::DateNotFound(_)
        )
    }
}
