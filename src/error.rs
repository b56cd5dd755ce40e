use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },
}
