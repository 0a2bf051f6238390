use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("User not authenticated")]
    AuthRequired,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Partial write failure: {failed} of {total} records failed: {first_error}")]
    PartialWrite {
        failed: usize,
        total: usize,
        first_error: String,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Cache I/O error: {0}")]
    CacheIo(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SyncError>;

impl From<reqwest::Error> for SyncError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Serialization(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for SyncError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
