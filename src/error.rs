use thiserror::Error;

/// Failure of a single page request
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("API returned status {status}")]
    Status { status: reqwest::StatusCode },
    #[error("malformed response body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("csv error on {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("vacancy {id}: cannot parse publication date '{value}'")]
    InvalidDate { id: String, value: String },
    #[error("vacancy {id}: {source}")]
    InvalidLevel {
        id: String,
        #[source]
        source: crate::models::UnknownLevel,
    },
}
