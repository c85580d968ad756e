use thiserror::Error;

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("backend request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned status {0}")]
    Status(reqwest::StatusCode),
}
